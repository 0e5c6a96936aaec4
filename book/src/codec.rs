//! Line oriented text format of the address book file.
//!
//! ```text
//! multiBit.addressBook,1
//! receive,<address>,<label>
//! send,<address>,<label>
//! ```
//!
//! Fields are split on `,` with no escaping, empty fields collapse, and the
//! label column may be left out.

use std::io::{BufRead, Write};

use config::book::{
    ADDRESS_BOOK_MAGIC, ADDRESS_BOOK_VERSION, RECEIVE_MARKER, SEND_MARKER, SEPARATOR,
};

use crate::address_book::AddressBook;
use crate::entry::AddressBookEntry;
use crate::Result;

const HEADER_LOG_LIMIT: usize = 64;

enum BookLine {
    Receive(AddressBookEntry),
    Send(AddressBookEntry),
}

/// Reads an address book stream into `book`. Receiving addresses are staged
/// as candidates. Nothing is applied when the header does not match or the
/// stream cannot be read; malformed body lines are skipped.
///
/// The header must be UTF-8. Body lines in any other encoding are decoded
/// lossily so their entries survive the next save.
pub fn load<R: BufRead>(book: &mut AddressBook, reader: R) {
    let mut lines = reader.split(b'\n');

    let header = match lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => {
            log::warn!("unable to read address book header: {}", e);
            return;
        }
        None => {
            log::debug!("address book stream is empty");
            return;
        }
    };

    let is_book = std::str::from_utf8(&header)
        .map(|header| is_header(trim_cr(header)))
        .unwrap_or(false);

    if !is_book {
        log::warn!(
            "not an address book, header of {} bytes: {:?}",
            header.len(),
            String::from_utf8_lossy(&header[..header.len().min(HEADER_LOG_LIMIT)])
        );
        return;
    }

    let mut staged = Vec::new();

    for (index, line) in lines.enumerate() {
        let bytes = match line {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("unable to read address book, discarding it: {}", e);
                return;
            }
        };
        let line = String::from_utf8_lossy(&bytes);

        if std::str::from_utf8(&bytes).is_err() {
            log::warn!("address book line {} is not UTF-8: {:?}", index + 2, line);
        }

        match parse_line(trim_cr(&line)) {
            Some(parsed) => staged.push(parsed),
            None => log::debug!("skipping address book line {}: {:?}", index + 2, line),
        }
    }

    log::debug!("loaded {} address book lines", staged.len());

    for parsed in staged {
        match parsed {
            BookLine::Receive(entry) => book.upsert_receiving(entry, true),
            BookLine::Send(entry) => book.upsert_sending(entry),
        }
    }
}

pub fn load_str(book: &mut AddressBook, text: &str) {
    load(book, text.as_bytes())
}

/// Renders the whole book. Candidate and active receiving addresses are
/// written once each, with the active label where both exist.
pub fn encode(book: &AddressBook) -> String {
    let mut out = String::new();

    out.push_str(ADDRESS_BOOK_MAGIC);
    out.push(SEPARATOR);
    out.push_str(ADDRESS_BOOK_VERSION);
    out.push('\n');

    for entry in book.all_receiving() {
        push_line(&mut out, RECEIVE_MARKER, entry);
    }

    for entry in book.sending_addresses() {
        push_line(&mut out, SEND_MARKER, entry);
    }

    out
}

pub fn save<W: Write>(book: &AddressBook, mut writer: W) -> Result<()> {
    writer.write_all(encode(book).as_bytes())?;
    writer.flush()?;

    Ok(())
}

fn push_line(out: &mut String, marker: &str, entry: &AddressBookEntry) {
    out.push_str(marker);
    out.push(SEPARATOR);
    out.push_str(entry.addr());
    out.push(SEPARATOR);
    out.push_str(entry.label());
    out.push('\n');
}

fn tokens(line: &str) -> Vec<&str> {
    line.split(SEPARATOR).filter(|t| !t.is_empty()).collect()
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_header(line: &str) -> bool {
    matches!(
        tokens(line).as_slice(),
        [magic, version] if *magic == ADDRESS_BOOK_MAGIC && *version == ADDRESS_BOOK_VERSION
    )
}

fn parse_line(line: &str) -> Option<BookLine> {
    let (kind, addr, label) = match tokens(line).as_slice() {
        [kind, addr] => (*kind, *addr, ""),
        [kind, addr, label] => (*kind, *addr, *label),
        _ => return None,
    };
    let entry = AddressBookEntry::new(label, addr);

    match kind {
        RECEIVE_MARKER => Some(BookLine::Receive(entry)),
        SEND_MARKER => Some(BookLine::Send(entry)),
        _ => None,
    }
}
