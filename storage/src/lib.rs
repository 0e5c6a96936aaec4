use config::storage::{ADDRESS_BOOK_FILENAME, TMP_FILE_SUFFIX};
use directories::ProjectDirs;
use errors::storage::LocalStorageError;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, LocalStorageError>;

/// A single text file on disk, replaced as a whole on every write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Binds the storage to an absolute file path. The file does not have to exist yet.
    pub fn from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_absolute() || path.file_name().is_none() {
            return Err(LocalStorageError::StoragePathError);
        }

        Ok(LocalStorage {
            path: path.to_path_buf(),
        })
    }

    /// Resolves the per-user data directory of the application and places
    /// the address book file inside it.
    pub fn new(qualifier: &str, organization: &str, application: &str) -> Result<Self> {
        let dirs = ProjectDirs::from(qualifier, organization, application)
            .ok_or(LocalStorageError::StoragePathError)?;

        Self::from(dirs.data_dir().join(ADDRESS_BOOK_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Raw file contents, decoding is left to the caller.
    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LocalStorageError::StorageDataNotFound,
            _ => LocalStorageError::ReadFileError(e.to_string()),
        })
    }

    /// Writes `bytes` next to the target and swaps it in with a rename, so a
    /// failed write leaves the previous file untouched.
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LocalStorageError::CreateDirError(e.to_string()))?;
        }

        let tmp_path = self.tmp_path();
        let written = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(LocalStorageError::WriteFileError(e.to_string()));
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            LocalStorageError::RenameFileError(e.to_string())
        })?;

        log::debug!("wrote {} bytes to {:?}", bytes.len(), self.path);

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        name.push(".");
        name.push(TMP_FILE_SUFFIX);

        self.path.with_file_name(name)
    }
}
