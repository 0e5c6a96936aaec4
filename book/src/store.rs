use config::storage::{DEFAULT_APPLICATION, DEFAULT_ORGANIZATION, DEFAULT_QUALIFIER};
use errors::storage::LocalStorageError;
use std::path::Path;
use storage::LocalStorage;

use crate::address_book::AddressBook;
use crate::{codec, Result};

/// An [`AddressBook`] bound to the file it was read from.
#[derive(Debug)]
pub struct AddressBookStore {
    storage: LocalStorage,
    book: AddressBook,
}

impl AddressBookStore {
    /// Opens the book and eagerly reads the file. A missing, unreadable or
    /// foreign file leaves the book empty.
    pub fn open(storage: LocalStorage) -> Self {
        let mut store = Self {
            storage,
            book: AddressBook::new(),
        };

        store.reload();

        store
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::open(LocalStorage::from(path)?))
    }

    /// Opens the book stored in the per-user data directory.
    pub fn from_default_dirs() -> Result<Self> {
        let storage = LocalStorage::new(
            DEFAULT_QUALIFIER,
            DEFAULT_ORGANIZATION,
            DEFAULT_APPLICATION,
        )?;

        Ok(Self::open(storage))
    }

    /// Reads the file again over the current in-memory state.
    pub fn reload(&mut self) {
        match self.storage.read() {
            Ok(bytes) => codec::load(&mut self.book, bytes.as_slice()),
            Err(LocalStorageError::StorageDataNotFound) => {
                log::debug!("no address book at {:?}", self.storage.path());
            }
            Err(e) => {
                log::warn!("unable to read address book {:?}: {}", self.storage.path(), e);
            }
        }
    }

    /// Writes the whole book, replacing the file.
    pub fn save(&self) -> Result<()> {
        let mut bytes = Vec::new();

        codec::save(&self.book, &mut bytes)?;
        self.storage.write(&bytes)?;
        log::info!(
            "saved address book: {} receiving, {} sending",
            self.book.len_receiving(),
            self.book.len_sending()
        );

        Ok(())
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut AddressBook {
        &mut self.book
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}

#[cfg(test)]
mod tests_store {
    use super::*;
    use crate::entry::AddressBookEntry;
    use config::storage::ADDRESS_BOOK_FILENAME;
    use errors::book::AddressBookError;
    use rand::Rng;
    use std::fs;
    use std::path::PathBuf;

    fn setup_test_dir() -> PathBuf {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = rand::thread_rng();
        let dir = std::env::temp_dir().join(format!("{}", rng.gen::<usize>()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn open(dir: &PathBuf) -> AddressBookStore {
        AddressBookStore::from_path(dir.join(ADDRESS_BOOK_FILENAME)).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = setup_test_dir();
        let store = open(&dir);

        assert!(store.book().is_empty());
        assert!(!store.storage().exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_relative_path_rejected() {
        assert_eq!(
            AddressBookStore::from_path(ADDRESS_BOOK_FILENAME).unwrap_err(),
            AddressBookError::StorageError(LocalStorageError::StoragePathError)
        );
    }

    #[test]
    fn test_open_reads_file() {
        let dir = setup_test_dir();
        fs::write(
            dir.join(ADDRESS_BOOK_FILENAME),
            "multiBit.addressBook,1\nreceive,1ABC,Alice\nreceive,1DEF\nsend,1GHI,Bob\n",
        )
        .unwrap();

        let mut store = open(&dir);

        assert_eq!(store.book().len_candidates(), 2);
        assert_eq!(store.book().lookup_label_sending("1GHI"), "Bob");

        store.book_mut().discover_key("1ABC");

        assert!(store.book().contains_receiving("1ABC"));
        assert!(!store.book().contains_receiving("1DEF"));
        assert_eq!(store.book().lookup_label_receiving("1ABC"), "Alice");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_label_edit_survives_restart() {
        let dir = setup_test_dir();
        fs::write(
            dir.join(ADDRESS_BOOK_FILENAME),
            "multiBit.addressBook,1\nreceive,1ABC,Alice\nreceive,1DEF\nsend,1GHI,Bob\n",
        )
        .unwrap();

        let mut store = open(&dir);
        store.book_mut().discover_key("1ABC");
        store
            .book_mut()
            .upsert_receiving(AddressBookEntry::new("Alice-v2", "1ABC"), false);
        assert_eq!(store.book().lookup_label_receiving("1ABC"), "Alice-v2");
        store.save().unwrap();
        drop(store);

        let mut store = open(&dir);
        // a key from another wallet is never promoted but stays in the file
        store.book_mut().discover_keys(["1ABC"]);

        assert_eq!(store.book().lookup_label_receiving("1ABC"), "Alice-v2");
        assert!(!store.book().contains_receiving("1DEF"));
        assert_eq!(store.book().lookup_label_sending("1GHI"), "Bob");

        store.save().unwrap();
        let text = fs::read_to_string(dir.join(ADDRESS_BOOK_FILENAME)).unwrap();
        assert_eq!(
            text,
            "multiBit.addressBook,1\n\
             receive,1ABC,Alice-v2\n\
             receive,1DEF,\n\
             send,1GHI,Bob\n"
        );

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_non_utf8_label_keeps_other_entries() {
        let dir = setup_test_dir();
        let path = dir.join(ADDRESS_BOOK_FILENAME);
        fs::write(
            &path,
            b"multiBit.addressBook,1\nsend,1GHI,Bob\nsend,1JOS,Jos\xe9\nreceive,1ABC,Alice\n",
        )
        .unwrap();

        let mut store = open(&dir);

        assert_eq!(store.book().len_sending(), 2);
        assert_eq!(store.book().len_candidates(), 1);

        store
            .book_mut()
            .upsert_sending(AddressBookEntry::new("New", "1NEW"));
        store.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "multiBit.addressBook,1\n\
             receive,1ABC,Alice\n\
             send,1GHI,Bob\n\
             send,1JOS,Jos\u{FFFD}\n\
             send,1NEW,New\n"
        );

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_foreign_file_not_loaded() {
        let dir = setup_test_dir();
        let path = dir.join(ADDRESS_BOOK_FILENAME);
        fs::write(&path, "something.else,1\nreceive,1ABC,hello\n").unwrap();

        let mut store = open(&dir);
        assert!(store.book().is_empty());

        store
            .book_mut()
            .upsert_sending(AddressBookEntry::new("Bob", "1GHI"));
        store.reload();

        assert_eq!(store.book().len_sending(), 1);
        assert_eq!(store.book().len_candidates(), 0);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_save_creates_missing_dir() {
        let dir = setup_test_dir();
        let nested = dir.join("wallets").join("main");
        let mut store = open(&nested);

        store
            .book_mut()
            .upsert_sending(AddressBookEntry::new("Bob", "1GHI"));
        store.save().unwrap();

        let store = open(&nested);
        assert_eq!(store.book().lookup_label_sending("1GHI"), "Bob");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_save_failure_keeps_state() {
        let dir = setup_test_dir();
        // the target path is a directory, so the rename fails
        let target = dir.join(ADDRESS_BOOK_FILENAME);
        fs::create_dir_all(target.join("occupied")).unwrap();

        let mut store = open(&dir);
        store
            .book_mut()
            .upsert_sending(AddressBookEntry::new("Bob", "1GHI"));

        let err = store.save().unwrap_err();

        assert!(matches!(err, AddressBookError::StorageError(_)));
        assert_eq!(store.book().lookup_label_sending("1GHI"), "Bob");
        assert!(!dir.join("addressBook.csv.tmp").exists());

        fs::remove_dir_all(dir).unwrap();
    }
}
