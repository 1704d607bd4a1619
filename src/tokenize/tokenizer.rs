//! Quote-aware delimiter tokenizer.
//!
//! The scan is a single left-to-right pass with one piece of state: whether
//! an odd number of toggle bytes has been seen, which means the scan is
//! inside an ignore region.
//!
//! - Every toggle byte flips the region state and is not copied. The toggle
//!   set is shared, so `'` may close a region that `"` opened.
//! - Outside a region, a delimiter ends the current token (which may be
//!   empty). Inside one, delimiters are content.
//! - Inside a region, a toggle byte immediately followed by the same byte
//!   is one literal copy and leaves the region open.
//! - End of input ends the last token and implicitly closes any open region.

use crate::core::{BufferList, ByteBuffer};
use crate::error::{Result, TokenizeError};
use crate::tokenize::{DEFAULT_DELIMITERS, DEFAULT_TOGGLES};
use tracing::{debug, trace};

/// A set of byte values with constant-time membership.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ByteSet([bool; 256]);

impl ByteSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self([false; 256])
    }

    /// Creates a set holding every byte of `bytes`.
    #[must_use]
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = [false; 256];
        let mut i = 0;
        while i < bytes.len() {
            set[bytes[i] as usize] = true;
            i += 1;
        }
        Self(set)
    }

    /// Returns `true` if `byte` is in the set.
    #[must_use]
    pub const fn contains(&self, byte: u8) -> bool {
        self.0[byte as usize]
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&present| present)
    }

    /// Returns the first byte that is in both sets.
    #[must_use]
    pub fn first_shared(&self, other: &Self) -> Option<u8> {
        (0..=u8::MAX).find(|&byte| self.contains(byte) && other.contains(byte))
    }

    fn members(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&byte| self.contains(byte)).collect()
    }
}

impl Default for ByteSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ByteSet")
            .field(&String::from_utf8_lossy(&self.members()))
            .finish()
    }
}

/// Splits byte buffers into token lists.
///
/// # Examples
///
/// ```
/// use strbuf::ByteBuffer;
/// use strbuf::tokenize::Tokenizer;
///
/// let tokenizer = Tokenizer::new().with_delimiters(b";|").with_toggles(b"'");
/// let source = ByteBuffer::from_bytes(b"a;'b;c'|d");
/// let tokens = tokenizer.tokenize(&source).unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens.get(1).unwrap().as_bytes(), b"b;c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    /// Bytes that end a token outside an ignore region.
    delimiters: ByteSet,
    /// Bytes that open and close ignore regions.
    toggles: ByteSet,
    /// Upper bound on a single token's length, if any.
    max_token_len: Option<usize>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a tokenizer splitting on `,` with `"` regions and no length limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiters: ByteSet::from_bytes(DEFAULT_DELIMITERS),
            toggles: ByteSet::from_bytes(DEFAULT_TOGGLES),
            max_token_len: None,
        }
    }

    /// Replaces the delimiter set.
    #[must_use]
    pub const fn with_delimiters(mut self, delimiters: &[u8]) -> Self {
        self.delimiters = ByteSet::from_bytes(delimiters);
        self
    }

    /// Replaces the ignore-toggle set. An empty set disables regions.
    #[must_use]
    pub const fn with_toggles(mut self, toggles: &[u8]) -> Self {
        self.toggles = ByteSet::from_bytes(toggles);
        self
    }

    /// Limits the length of any single token.
    ///
    /// Tokens grow dynamically by default; with a limit set, a longer token
    /// fails the whole call with [`TokenizeError::TokenTooLong`].
    #[must_use]
    pub const fn max_token_len(mut self, max: usize) -> Self {
        self.max_token_len = Some(max);
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::InvalidConfig`] when the delimiter set is
    /// empty or a byte is both a delimiter and a toggle.
    pub fn validate(&self) -> Result<()> {
        if self.delimiters.is_empty() {
            return Err(TokenizeError::InvalidConfig {
                reason: "delimiter set must not be empty".to_string(),
            }
            .into());
        }
        if let Some(byte) = self.delimiters.first_shared(&self.toggles) {
            return Err(TokenizeError::InvalidConfig {
                reason: format!("byte 0x{byte:02x} is both a delimiter and a toggle"),
            }
            .into());
        }
        Ok(())
    }

    /// Splits `source` into tokens.
    ///
    /// The result always holds at least one token and covers the whole
    /// source: an empty source gives one empty token, and a trailing
    /// delimiter gives a trailing empty token. Each token is an independent
    /// copy.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`Self::validate`],
    /// [`BufferError::Released`](crate::error::BufferError::Released) for a
    /// released source, or [`TokenizeError::TokenTooLong`] when a limit is
    /// set and exceeded.
    pub fn tokenize(&self, source: &ByteBuffer) -> Result<BufferList> {
        self.validate()?;
        let bytes = source.content()?;

        let mut tokens = BufferList::new();
        let mut token = Vec::new();
        let mut token_start = 0;
        let mut in_region = false;
        let mut pos = 0;

        while pos < bytes.len() {
            let byte = bytes[pos];
            if self.toggles.contains(byte) {
                if in_region && bytes.get(pos + 1) == Some(&byte) {
                    self.push_content(&mut token, byte, token_start)?;
                    pos += 2;
                    continue;
                }
                in_region = !in_region;
            } else if !in_region && self.delimiters.contains(byte) {
                tokens.push_owned(ByteBuffer::from_bytes(&token))?;
                token.clear();
                token_start = pos + 1;
            } else {
                self.push_content(&mut token, byte, token_start)?;
            }
            pos += 1;
        }
        tokens.push_owned(ByteBuffer::from_bytes(&token))?;

        if in_region {
            trace!(offset = token_start, "ignore region closed by end of input");
        }
        debug!(bytes = bytes.len(), tokens = tokens.len(), "tokenized buffer");
        Ok(tokens)
    }

    fn push_content(&self, token: &mut Vec<u8>, byte: u8, token_start: usize) -> Result<()> {
        if let Some(max) = self.max_token_len
            && token.len() >= max
        {
            return Err(TokenizeError::TokenTooLong {
                offset: token_start,
                max,
            }
            .into());
        }
        token.push(byte);
        Ok(())
    }
}
