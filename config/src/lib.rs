pub mod book;
pub mod storage;
