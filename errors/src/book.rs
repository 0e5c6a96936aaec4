use thiserror::Error;

use crate::storage::LocalStorageError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressBookError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("{field} contains a forbidden character: {value:?}")]
    ForbiddenChar { field: &'static str, value: String },

    #[error("LocalStorageError error: {0}")]
    StorageError(LocalStorageError),

    #[error("Failed to write address book: {0}")]
    WriteError(String),
}

impl From<LocalStorageError> for AddressBookError {
    fn from(error: LocalStorageError) -> Self {
        AddressBookError::StorageError(error)
    }
}

impl From<std::io::Error> for AddressBookError {
    fn from(error: std::io::Error) -> Self {
        AddressBookError::WriteError(error.to_string())
    }
}
