use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use config::book::FORBIDDEN_CHARS;
use errors::book::AddressBookError;
use serde::{Deserialize, Serialize};

/// A labelled address. Identity is the address alone, the label is metadata
/// that can be rewritten at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressBookEntry {
    label: String,
    addr: String,
}

impl AddressBookEntry {
    pub fn new(label: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            addr: addr.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Checks that the entry can be written to the address book file and
    /// read back unchanged.
    pub fn validate(&self) -> Result<(), AddressBookError> {
        if self.addr.is_empty() {
            return Err(AddressBookError::EmptyAddress);
        }

        if self.addr.contains(&FORBIDDEN_CHARS[..]) {
            return Err(AddressBookError::ForbiddenChar {
                field: "address",
                value: self.addr.clone(),
            });
        }

        if self.label.contains(&FORBIDDEN_CHARS[..]) {
            return Err(AddressBookError::ForbiddenChar {
                field: "label",
                value: self.label.clone(),
            });
        }

        Ok(())
    }
}

impl PartialEq for AddressBookEntry {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl Eq for AddressBookEntry {}

impl Hash for AddressBookEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
    }
}

impl PartialOrd for AddressBookEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AddressBookEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.addr.cmp(&other.addr)
    }
}
