//! Delimiter tokenizing for byte buffers.
//!
//! Splits a [`ByteBuffer`](crate::ByteBuffer) into a
//! [`BufferList`](crate::BufferList) of tokens on a set of delimiter bytes,
//! while quote-style toggle bytes mark regions in which delimiters are
//! ordinary content. The common case is one line of CSV:
//!
//! ```
//! use strbuf::ByteBuffer;
//! use strbuf::tokenize::split;
//!
//! let line = ByteBuffer::from_bytes(br#"name,"Smith, J",,42"#);
//! let fields = split(&line, b",", b"\"").unwrap();
//! let fields: Vec<&[u8]> = fields.iter().map(|f| f.as_bytes()).collect();
//! assert_eq!(fields, vec![&b"name"[..], &b"Smith, J"[..], &b""[..], &b"42"[..]]);
//! ```

pub mod tokenizer;

pub use tokenizer::{ByteSet, Tokenizer};

use crate::core::{BufferList, ByteBuffer};
use crate::error::Result;

/// Default delimiter set: a comma.
pub const DEFAULT_DELIMITERS: &[u8] = b",";

/// Default ignore-toggle set: a double quote.
pub const DEFAULT_TOGGLES: &[u8] = b"\"";

/// Splits `source` on any byte of `delimiters`, honoring `toggles` regions.
///
/// Shorthand for building a [`Tokenizer`] and calling
/// [`Tokenizer::tokenize`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid (see
/// [`Tokenizer::validate`]) or `source` has been released.
pub fn split(source: &ByteBuffer, delimiters: &[u8], toggles: &[u8]) -> Result<BufferList> {
    Tokenizer::new()
        .with_delimiters(delimiters)
        .with_toggles(toggles)
        .tokenize(source)
}
