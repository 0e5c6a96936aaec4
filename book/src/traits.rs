/// Implemented by the wallet layer: the canonical text form of every address
/// backed by a key the wallet holds.
pub trait WalletKeys {
    fn key_addresses(&self) -> Vec<String>;
}

impl<S: AsRef<str>> WalletKeys for [S] {
    fn key_addresses(&self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> WalletKeys for Vec<S> {
    fn key_addresses(&self) -> Vec<String> {
        self.as_slice().key_addresses()
    }
}
