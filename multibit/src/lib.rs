pub use book;
pub use config;
pub use errors;
pub use storage;

use std::path::Path;

use book::AddressBookStore;

/// Installs an `env_logger` backend for embedders without their own logger.
pub fn init() -> Result<(), String> {
    env_logger::try_init().map_err(|e| e.to_string())?;
    log::info!("MultiBit core initialized");

    Ok(())
}

/// Opens the address book file at an absolute `path` and promotes every
/// address the wallet holds a key for.
pub fn open_address_book<P, W>(path: P, wallet: &W) -> book::Result<AddressBookStore>
where
    P: AsRef<Path>,
    W: book::WalletKeys + ?Sized,
{
    let mut store = AddressBookStore::from_path(path)?;
    let promoted = store.book_mut().sync_with_wallet(wallet);

    log::debug!("{} receiving addresses backed by wallet keys", promoted);

    Ok(store)
}
