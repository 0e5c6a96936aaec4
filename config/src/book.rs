pub const ADDRESS_BOOK_MAGIC: &str = "multiBit.addressBook";
pub const ADDRESS_BOOK_VERSION: &str = "1";
pub const SEPARATOR: char = ',';
pub const RECEIVE_MARKER: &str = "receive";
pub const SEND_MARKER: &str = "send";

/// Characters that can never appear inside an address or a label,
/// the format has no escaping.
pub const FORBIDDEN_CHARS: [char; 3] = [SEPARATOR, '\n', '\r'];
