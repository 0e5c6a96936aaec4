use std::collections::BTreeMap;

use crate::entry::AddressBookEntry;
use crate::traits::WalletKeys;

type Entries = BTreeMap<String, AddressBookEntry>;

/// In-memory address book of one wallet session.
///
/// Receiving addresses live in two collections: `candidates_receiving` holds
/// whatever the address book file listed, including addresses of keys from
/// other wallets, and `active_receiving` holds only addresses whose keys the
/// current wallet owns. Only the active set is visible to callers; the
/// candidates are kept so that a rewrite of the file does not lose them.
#[derive(Debug, Default, Clone)]
pub struct AddressBook {
    candidates_receiving: Entries,
    active_receiving: Entries,
    sending: Entries,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a receiving address, or replaces the label of the entry already
    /// holding that address.
    ///
    /// * `as_candidate` - stage the entry as a candidate instead of an active address
    pub fn upsert_receiving(&mut self, entry: AddressBookEntry, as_candidate: bool) {
        let target = if as_candidate {
            &mut self.candidates_receiving
        } else {
            &mut self.active_receiving
        };

        upsert(target, entry);
    }

    /// Adds a sending address, or replaces the label of the existing one.
    pub fn upsert_sending(&mut self, entry: AddressBookEntry) {
        upsert(&mut self.sending, entry);
    }

    /// Marks `addr` as backed by a key of the current wallet. The label is
    /// taken from a matching candidate, if any. Returns `true` when the
    /// address was newly added to the active set.
    pub fn discover_key(&mut self, addr: &str) -> bool {
        if self.active_receiving.contains_key(addr) {
            return false;
        }

        let label = self
            .candidates_receiving
            .get(addr)
            .map(|c| c.label().to_string())
            .unwrap_or_default();
        let entry = AddressBookEntry::new(label, addr);

        if let Err(e) = entry.validate() {
            log::warn!("ignoring discovered key address {:?}: {}", addr, e);
            return false;
        }

        log::debug!("promoting receiving address {}", addr);
        self.active_receiving.insert(addr.to_string(), entry);

        true
    }

    /// Runs [`discover_key`](Self::discover_key) for every address and returns
    /// how many were promoted.
    pub fn discover_keys<I, S>(&mut self, addrs: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        addrs
            .into_iter()
            .filter(|addr| self.discover_key(addr.as_ref()))
            .count()
    }

    pub fn sync_with_wallet<W: WalletKeys + ?Sized>(&mut self, wallet: &W) -> usize {
        self.discover_keys(wallet.key_addresses())
    }

    pub fn contains_receiving(&self, addr: &str) -> bool {
        self.active_receiving.contains_key(addr)
    }

    pub fn contains_sending(&self, addr: &str) -> bool {
        self.sending.contains_key(addr)
    }

    /// Label of an active receiving address, empty when the address is unknown.
    pub fn lookup_label_receiving(&self, addr: &str) -> &str {
        lookup_label(&self.active_receiving, addr)
    }

    pub fn lookup_label_sending(&self, addr: &str) -> &str {
        lookup_label(&self.sending, addr)
    }

    /// Active receiving addresses, ordered by address.
    pub fn receiving_addresses(&self) -> impl Iterator<Item = &AddressBookEntry> {
        self.active_receiving.values()
    }

    pub fn sending_addresses(&self) -> impl Iterator<Item = &AddressBookEntry> {
        self.sending.values()
    }

    /// Replaces the whole active receiving set. Candidates are left alone.
    pub fn set_receiving_addresses<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = AddressBookEntry>,
    {
        self.active_receiving.clear();
        entries
            .into_iter()
            .for_each(|entry| upsert(&mut self.active_receiving, entry));
    }

    pub fn set_sending_addresses<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = AddressBookEntry>,
    {
        self.sending.clear();
        entries
            .into_iter()
            .for_each(|entry| upsert(&mut self.sending, entry));
    }

    /// Forgets a receiving address in both the active and the candidate set,
    /// so the next save no longer writes it.
    pub fn remove_receiving(&mut self, addr: &str) -> bool {
        let active = self.active_receiving.remove(addr).is_some();
        let candidate = self.candidates_receiving.remove(addr).is_some();

        active || candidate
    }

    pub fn remove_sending(&mut self, addr: &str) -> bool {
        self.sending.remove(addr).is_some()
    }

    pub fn len_receiving(&self) -> usize {
        self.active_receiving.len()
    }

    pub fn len_candidates(&self) -> usize {
        self.candidates_receiving.len()
    }

    pub fn len_sending(&self) -> usize {
        self.sending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates_receiving.is_empty()
            && self.active_receiving.is_empty()
            && self.sending.is_empty()
    }

    /// Union of candidate and active receiving entries keyed by address,
    /// active labels win. Ordered by address.
    pub(crate) fn all_receiving(&self) -> Vec<&AddressBookEntry> {
        let mut union: BTreeMap<&str, &AddressBookEntry> = self
            .candidates_receiving
            .iter()
            .map(|(addr, entry)| (addr.as_str(), entry))
            .collect();

        union.extend(
            self.active_receiving
                .iter()
                .map(|(addr, entry)| (addr.as_str(), entry)),
        );

        union.into_values().collect()
    }
}

fn upsert(entries: &mut Entries, entry: AddressBookEntry) {
    if let Err(e) = entry.validate() {
        log::warn!("ignoring address book entry {:?}: {}", entry.addr(), e);
        return;
    }

    match entries.get_mut(entry.addr()) {
        Some(existing) => existing.set_label(entry.label()),
        None => {
            entries.insert(entry.addr().to_string(), entry);
        }
    }
}

fn lookup_label<'a>(entries: &'a Entries, addr: &str) -> &'a str {
    entries.get(addr).map(|e| e.label()).unwrap_or_default()
}
