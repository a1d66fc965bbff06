//! Delimiter sets and in-place unification

use super::Row;
use crate::error::{Result, SheetError};

/// Delimiter used when neither the CLI nor the config names one
pub const DEFAULT_DELIMITERS: &str = " ";

/// Ordered set of delimiter bytes; the first one is canonical
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    bytes: Vec<u8>,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            bytes: DEFAULT_DELIMITERS.as_bytes().to_vec(),
        }
    }
}

impl DelimiterSet {
    /// Parse a delimiter string such as `":,;"`
    ///
    /// Only ASCII characters other than newline are accepted. Repeated
    /// characters are kept once, in first-seen order.
    pub fn new(delimiters: &str) -> Result<Self> {
        if delimiters.is_empty() {
            return Err(SheetError::MalformedArgument(
                "delimiter set is empty".to_string(),
            ));
        }
        let mut bytes = Vec::with_capacity(delimiters.len());
        for ch in delimiters.chars() {
            if !ch.is_ascii() || ch == '\n' {
                return Err(SheetError::MalformedArgument(format!(
                    "unsupported delimiter {:?}",
                    ch
                )));
            }
            let b = ch as u8;
            if !bytes.contains(&b) {
                bytes.push(b);
            }
        }
        Ok(Self { bytes })
    }

    /// The delimiter every other member is rewritten to
    pub fn canonical(&self) -> u8 {
        self.bytes[0]
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.bytes.contains(&byte)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Rewrite every delimiter in the row to the canonical one
///
/// Returns the canonical delimiter, which is also stored on the row.
pub fn unify(row: &mut Row, delimiters: &DelimiterSet) -> u8 {
    let canonical = delimiters.canonical();
    if delimiters.as_bytes().len() > 1 {
        for byte in row.content_mut() {
            if *byte != canonical && delimiters.contains(*byte) {
                *byte = canonical;
            }
        }
    }
    row.set_delimiter(canonical);
    canonical
}
