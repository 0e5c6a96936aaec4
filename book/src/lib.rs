pub mod address_book;
pub mod codec;
pub mod entry;
pub mod store;
pub mod traits;

pub use address_book::AddressBook;
pub use entry::AddressBookEntry;
pub use store::AddressBookStore;
pub use traits::WalletKeys;

pub type Result<T> = std::result::Result<T, errors::book::AddressBookError>;
