use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocalStorageError {
    #[error("Storage path error")]
    StoragePathError,

    #[error("Storage data not found")]
    StorageDataNotFound,

    #[error("Read file error: {0}")]
    ReadFileError(String),

    #[error("Create Dir error: {0}")]
    CreateDirError(String),

    #[error("write file error: {0}")]
    WriteFileError(String),

    #[error("rename file error: {0}")]
    RenameFileError(String),
}
