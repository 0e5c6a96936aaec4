pub const ADDRESS_BOOK_FILENAME: &str = "addressBook.csv";
pub const TMP_FILE_SUFFIX: &str = "tmp";

pub const DEFAULT_QUALIFIER: &str = "org";
pub const DEFAULT_ORGANIZATION: &str = "multibit";
pub const DEFAULT_APPLICATION: &str = "MultiBit";
