//! Numeric formatting and parsing for byte buffers.
//!
//! Integers are accepted only when re-formatting the parsed value
//! reproduces the input exactly. Floats go through a structural check
//! instead: plain decimal notation with exactly one point.

use crate::core::buffer::ByteBuffer;
use crate::error::{ConversionError, Result};

/// Number of fraction digits written by [`ByteBuffer::from_f64`].
pub const FLOAT_FRACTION_DIGITS: usize = 16;

impl ByteBuffer {
    /// Creates a buffer holding the decimal form of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::from_i64(-42);
    /// assert_eq!(buffer.as_bytes(), b"-42");
    /// assert_eq!(buffer.to_i64().unwrap(), -42);
    /// ```
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::from_bytes(value.to_string().as_bytes())
    }

    /// Creates a buffer holding `value` with sixteen fraction digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::from_f64(1.5);
    /// assert_eq!(buffer.as_bytes(), b"1.5000000000000000");
    /// ```
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self::from_bytes(format!("{value:.prec$}", prec = FLOAT_FRACTION_DIGITS).as_bytes())
    }

    /// Parses the content as a canonical signed 64-bit integer.
    ///
    /// The value is accepted only if formatting it again yields exactly the
    /// same bytes, which rules out leading zeros, a `+` sign, `-0`, and
    /// surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Int`] when the content is not canonical or
    /// does not fit in `i64`, and a buffer error when released.
    pub fn to_i64(&self) -> Result<i64> {
        let content = self.content()?;
        let reject = || ConversionError::Int {
            input: String::from_utf8_lossy(content).into_owned(),
        };

        let text = std::str::from_utf8(content).map_err(|_| reject())?;
        let value: i64 = text.parse().map_err(|_| reject())?;
        if value.to_string().as_bytes() != content {
            return Err(reject().into());
        }
        Ok(value)
    }

    /// Parses the content as a plain decimal float.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Float`] when [`is_decimal_float`] rejects
    /// the content, and a buffer error when released.
    pub fn to_f64(&self) -> Result<f64> {
        let content = self.content()?;
        let reject = || ConversionError::Float {
            input: String::from_utf8_lossy(content).into_owned(),
        };

        if !is_decimal_float(content) {
            return Err(reject().into());
        }
        let text = std::str::from_utf8(content).map_err(|_| reject())?;
        text.parse::<f64>().map_err(|_| reject().into())
    }
}

/// Checks that `bytes` is `[-][digits].[digits]` with at least one digit.
///
/// Exactly one `.` is required, a `-` may only appear once and only in the
/// first position, and no other characters are allowed.
///
/// # Examples
///
/// ```
/// use strbuf::core::convert::is_decimal_float;
///
/// assert!(is_decimal_float(b"-3.14"));
/// assert!(is_decimal_float(b".5"));
/// assert!(!is_decimal_float(b"3.14.1"));
/// assert!(!is_decimal_float(b"."));
/// assert!(!is_decimal_float(b"42"));
/// ```
#[must_use]
pub fn is_decimal_float(bytes: &[u8]) -> bool {
    let body = bytes.strip_prefix(b"-").unwrap_or(bytes);

    let mut dots = 0;
    let mut digits = 0;
    for &byte in body {
        match byte {
            b'.' => dots += 1,
            b'0'..=b'9' => digits += 1,
            _ => return false,
        }
    }
    dots == 1 && digits > 0
}
