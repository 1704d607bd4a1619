//! Growable byte buffer with null-terminator-compatible storage.
//!
//! [`ByteBuffer`] owns a flat byte store sized `capacity + 1`. The logical
//! content occupies `[0, len)` and every byte from `len` through `capacity`
//! is kept at zero, so the byte at `len` always acts as a C-style sentinel.
//! All mutation funnels through [`ByteBuffer::resize`],
//! [`ByteBuffer::insert_range`], and [`ByteBuffer::remove_range`].

use crate::error::{BufferError, Result};
use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// An owned, growable byte sequence with tracked length and capacity.
///
/// A default-constructed or released buffer has no backing store; most
/// operations on it fail with [`BufferError::Released`].
///
/// # Examples
///
/// ```
/// use strbuf::ByteBuffer;
///
/// let mut buffer = ByteBuffer::from_bytes(b"Hello");
/// buffer.append_bytes(b", world!").unwrap();
/// assert_eq!(buffer.as_bytes(), b"Hello, world!");
/// assert_eq!(buffer.as_bytes_with_nul().unwrap().last(), Some(&0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ByteBuffer {
    /// Backing store, `None` once released. Holds at least `cap + 1` bytes.
    data: Option<Vec<u8>>,
    /// Number of content bytes.
    len: usize,
    /// Usable capacity, excluding the sentinel byte.
    cap: usize,
}

impl ByteBuffer {
    /// Creates an empty buffer able to hold `capacity` bytes without growing.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of content bytes to allocate (the sentinel is extra).
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::with_capacity(16);
    /// assert_eq!(buffer.capacity(), 16);
    /// assert!(buffer.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Some(vec![0; capacity + 1]),
            len: 0,
            cap: capacity,
        }
    }

    /// Creates a buffer holding a copy of `src`, with capacity equal to its length.
    #[must_use]
    pub fn from_bytes(src: &[u8]) -> Self {
        let mut buffer = Self::with_capacity(src.len());
        if let Some(data) = buffer.data.as_mut() {
            data[..src.len()].copy_from_slice(src);
        }
        buffer.len = src.len();
        buffer
    }

    /// Creates a buffer from a null-terminated sequence, excluding the terminator.
    #[must_use]
    pub fn from_c_str(src: &CStr) -> Self {
        Self::from_bytes(src.to_bytes())
    }

    /// Creates a full copy of `other`'s content.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`] if `other` has been released.
    pub fn from_buffer(other: &Self) -> Result<Self> {
        Ok(Self::from_bytes(other.content()?))
    }

    /// Creates a buffer from the inclusive byte range `[start, end]` of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`] for a released source,
    /// [`BufferError::IndexOutOfRange`] when either index is not below the
    /// source length, and [`BufferError::InvalidRange`] when `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let source = ByteBuffer::from_bytes(b"Hello, world!");
    /// let world = ByteBuffer::from_subrange(&source, 7, 11).unwrap();
    /// assert_eq!(world.as_bytes(), b"world");
    /// ```
    pub fn from_subrange(other: &Self, start: usize, end: usize) -> Result<Self> {
        let content = other.content()?;
        check_inclusive_range(start, end, content.len())?;
        Ok(Self::from_bytes(&content[start..=end]))
    }

    /// Frees the backing store and resets the buffer to the released state.
    ///
    /// Calling this on an already released buffer does nothing.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if the buffer has no backing store.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.data.is_none()
    }

    /// Returns the number of content bytes (zero when released).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the usable capacity, excluding the sentinel (zero when released).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the buffer holds no content bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the logical content. A released buffer yields an empty slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self.data.as_deref() {
            Some(data) => &data[..self.len],
            None => &[],
        }
    }

    /// Returns the content followed by its zero sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`] if the buffer has been released.
    pub fn as_bytes_with_nul(&self) -> Result<&[u8]> {
        let data = self.store()?;
        Ok(&data[..=self.len])
    }

    /// Returns a null-terminated view of the content.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`] for a released buffer and
    /// [`BufferError::InteriorNul`] when the content itself contains a zero byte.
    pub fn as_c_str(&self) -> Result<&CStr> {
        let bytes = self.as_bytes_with_nul()?;
        CStr::from_bytes_with_nul(bytes).map_err(|_| {
            let offset = bytes.iter().position(|&b| b == 0).unwrap_or(self.len);
            BufferError::InteriorNul { offset }.into()
        })
    }

    /// Returns a reference to the byte at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `index >= len`.
    pub fn get(&self, index: usize) -> Result<&u8> {
        let content = self.content()?;
        content.get(index).ok_or_else(|| {
            BufferError::IndexOutOfRange {
                index,
                len: content.len(),
            }
            .into()
        })
    }

    /// Returns a mutable reference to the byte at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut u8> {
        let len = self.len;
        let data = self.data.as_mut().ok_or(BufferError::Released)?;
        data[..len]
            .get_mut(index)
            .ok_or_else(|| BufferError::IndexOutOfRange { index, len }.into())
    }

    /// Returns the first byte.
    pub fn first(&self) -> Result<&u8> {
        self.get(0)
    }

    /// Returns the last byte.
    pub fn last(&self) -> Result<&u8> {
        self.get(self.len.saturating_sub(1))
    }

    /// Changes the capacity of the buffer.
    ///
    /// Shrinking (`new_capacity <= capacity`) truncates the content to
    /// `new_capacity` bytes and zero-clears everything past the new length
    /// without reallocating. Growing reallocates to exactly
    /// `new_capacity + 1` bytes and keeps the content. A released buffer is
    /// given a fresh, empty store.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::from_bytes(b"abcdef");
    /// buffer.resize(3);
    /// assert_eq!(buffer.as_bytes(), b"abc");
    /// buffer.resize(10);
    /// assert_eq!(buffer.capacity(), 10);
    /// assert_eq!(buffer.as_bytes(), b"abc");
    /// ```
    pub fn resize(&mut self, new_capacity: usize) {
        let Some(data) = self.data.as_mut() else {
            *self = Self::with_capacity(new_capacity);
            return;
        };

        if new_capacity <= self.cap {
            let new_len = self.len.min(new_capacity);
            data[new_len..=self.cap].fill(0);
            self.len = new_len;
            self.cap = new_capacity;
        } else {
            trace!(from = self.cap, to = new_capacity, "growing buffer");
            let mut grown = vec![0; new_capacity + 1];
            grown[..self.len].copy_from_slice(&data[..self.len]);
            *data = grown;
            self.cap = new_capacity;
        }
    }

    /// Inserts `src` so that it starts at offset `at`.
    ///
    /// If the result does not fit, the store is reallocated to exactly
    /// `len + src.len()` bytes of capacity. Otherwise the tail is shifted
    /// right in place. Every insert and append variant is built on this.
    ///
    /// # Arguments
    ///
    /// * `at` - Insertion offset, `0..=len`.
    /// * `src` - Bytes to insert; must not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`], [`BufferError::InvalidCount`] for an
    /// empty `src`, or [`BufferError::IndexOutOfRange`] when `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::from_bytes(b"Held");
    /// buffer.insert_range(3, b"lo wor").unwrap();
    /// assert_eq!(buffer.as_bytes(), b"Hello world");
    /// ```
    pub fn insert_range(&mut self, at: usize, src: &[u8]) -> Result<()> {
        let len = self.len;
        let data = self.data.as_mut().ok_or(BufferError::Released)?;
        if src.is_empty() {
            return Err(BufferError::InvalidCount { count: 0 }.into());
        }
        if at > len {
            return Err(BufferError::IndexOutOfRange { index: at, len }.into());
        }

        let n = src.len();
        let new_len = len + n;
        if new_len > self.cap {
            trace!(from = self.cap, to = new_len, "reallocating for insert");
            let mut grown = vec![0; new_len + 1];
            grown[..at].copy_from_slice(&data[..at]);
            grown[at..at + n].copy_from_slice(src);
            grown[at + n..new_len].copy_from_slice(&data[at..len]);
            *data = grown;
            self.cap = new_len;
        } else {
            data.copy_within(at..len, at + n);
            data[at..at + n].copy_from_slice(src);
        }
        self.len = new_len;
        Ok(())
    }

    /// Removes the inclusive byte range `[start, end]`.
    ///
    /// Bytes after `end` move left to close the gap and the vacated tail is
    /// zero-cleared.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`], [`BufferError::IndexOutOfRange`]
    /// when an index is not below `len`, or [`BufferError::InvalidRange`]
    /// when `start > end`.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<()> {
        let len = self.len;
        let data = self.data.as_mut().ok_or(BufferError::Released)?;
        check_inclusive_range(start, end, len)?;

        data.copy_within(end + 1..len, start);
        let new_len = len - (end - start + 1);
        data[new_len..len].fill(0);
        self.len = new_len;
        Ok(())
    }

    /// Inserts a single byte at `at`.
    pub fn insert_byte(&mut self, at: usize, byte: u8) -> Result<()> {
        self.insert_range(at, &[byte])
    }

    /// Inserts raw bytes at `at`.
    pub fn insert_bytes(&mut self, at: usize, src: &[u8]) -> Result<()> {
        self.insert_range(at, src)
    }

    /// Inserts the content of another buffer at `at`.
    pub fn insert_buffer(&mut self, at: usize, other: &Self) -> Result<()> {
        self.insert_range(at, other.content()?)
    }

    /// Appends a single byte.
    pub fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.insert_range(self.len, &[byte])
    }

    /// Appends raw bytes.
    pub fn append_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.insert_range(self.len, src)
    }

    /// Appends the content of another buffer.
    pub fn append_buffer(&mut self, other: &Self) -> Result<()> {
        self.insert_range(self.len, other.content()?)
    }

    /// Zero-clears the whole store and sets the length to zero.
    ///
    /// Capacity is kept.
    pub fn clear(&mut self) -> Result<()> {
        let data = self.data.as_mut().ok_or(BufferError::Released)?;
        data.fill(0);
        self.len = 0;
        Ok(())
    }

    /// Finds the lowest index `>= from` at which `needle` occurs.
    ///
    /// An empty needle matches at `from`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `from > len` and
    /// [`BufferError::NotFound`] when there is no match.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let buffer = ByteBuffer::from_bytes(b"abcabc");
    /// assert_eq!(buffer.find(b"bc", 0).unwrap(), 1);
    /// assert_eq!(buffer.find(b"bc", 2).unwrap(), 4);
    /// assert!(buffer.find(b"x", 0).is_err());
    /// ```
    pub fn find(&self, needle: &[u8], from: usize) -> Result<usize> {
        let content = self.content()?;
        check_search_start(from, content.len())?;
        find_from(content, needle, from).ok_or_else(|| BufferError::NotFound.into())
    }

    /// Finds the last occurrence of `needle` at or after `from`.
    ///
    /// Searches forward again from the successor of every match and keeps
    /// the final one.
    pub fn find_last(&self, needle: &[u8], from: usize) -> Result<usize> {
        let mut last = self.find(needle, from)?;
        let content = self.as_bytes();
        while last < content.len() {
            match find_from(content, needle, last + 1) {
                Some(index) => last = index,
                None => break,
            }
        }
        Ok(last)
    }

    /// Replaces the inclusive range `[start, end]` with `new_contents`.
    ///
    /// Implemented as [`Self::remove_range`] followed by
    /// [`Self::insert_range`]. Arguments are validated before anything is
    /// removed, but the two steps are not atomic: if the insert fails the
    /// buffer is left with the range removed. An empty `new_contents` only
    /// removes.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::from_bytes(b"Hello, world!");
    /// buffer.replace(b"there", 7, 11).unwrap();
    /// assert_eq!(buffer.as_bytes(), b"Hello, there!");
    /// ```
    pub fn replace(&mut self, new_contents: &[u8], start: usize, end: usize) -> Result<()> {
        check_inclusive_range(start, end, self.content()?.len())?;
        self.remove_range(start, end)?;
        if new_contents.is_empty() {
            return Ok(());
        }
        self.insert_range(start, new_contents)
    }

    /// Replaces the first occurrence of `old` at or after `from`.
    ///
    /// Returns the index where the replacement was made.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCount`] for an empty `old` and
    /// [`BufferError::NotFound`] when `old` does not occur.
    pub fn find_replace(&mut self, old: &[u8], new: &[u8], from: usize) -> Result<usize> {
        if old.is_empty() {
            return Err(BufferError::InvalidCount { count: 0 }.into());
        }
        let index = self.find(old, from)?;
        self.replace(new, index, index + old.len() - 1)?;
        Ok(index)
    }

    /// Replaces every occurrence of `old` at or after `from`.
    ///
    /// Searching resumes after each inserted replacement, so `new` may
    /// itself contain `old`. Returns the number of replacements.
    ///
    /// # Examples
    ///
    /// ```
    /// use strbuf::ByteBuffer;
    ///
    /// let mut buffer = ByteBuffer::from_bytes(b"a-b-c");
    /// assert_eq!(buffer.find_replace_all(b"-", b"--", 0).unwrap(), 2);
    /// assert_eq!(buffer.as_bytes(), b"a--b--c");
    /// ```
    pub fn find_replace_all(&mut self, old: &[u8], new: &[u8], from: usize) -> Result<usize> {
        if old.is_empty() {
            return Err(BufferError::InvalidCount { count: 0 }.into());
        }
        check_search_start(from, self.content()?.len())?;

        let mut cursor = from;
        let mut count = 0;
        while let Some(index) = find_from(self.as_bytes(), old, cursor) {
            self.replace(new, index, index + old.len() - 1)?;
            cursor = index + new.len();
            count += 1;
        }
        Ok(count)
    }

    /// Converts every ASCII lowercase byte to uppercase in place.
    pub fn to_upper(&mut self) -> Result<()> {
        let len = self.len;
        let data = self.data.as_mut().ok_or(BufferError::Released)?;
        data[..len].make_ascii_uppercase();
        Ok(())
    }

    /// Converts every ASCII uppercase byte to lowercase in place.
    pub fn to_lower(&mut self) -> Result<()> {
        let len = self.len;
        let data = self.data.as_mut().ok_or(BufferError::Released)?;
        data[..len].make_ascii_lowercase();
        Ok(())
    }

    /// Removes leading space bytes.
    pub fn trim_start(&mut self) -> Result<()> {
        let content = self.content()?;
        let leading = content.iter().take_while(|&&b| b == b' ').count();
        if leading > 0 {
            self.remove_range(0, leading - 1)?;
        }
        Ok(())
    }

    /// Removes trailing space bytes.
    pub fn trim_end(&mut self) -> Result<()> {
        let content = self.content()?;
        let trailing = content.iter().rev().take_while(|&&b| b == b' ').count();
        if trailing > 0 {
            let len = content.len();
            self.remove_range(len - trailing, len - 1)?;
        }
        Ok(())
    }

    /// Removes leading and trailing space bytes.
    pub fn trim(&mut self) -> Result<()> {
        self.trim_start()?;
        self.trim_end()
    }

    /// Compares the logical content of two buffers byte by byte.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Compare`] if either buffer has been released.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use strbuf::ByteBuffer;
    ///
    /// let a = ByteBuffer::from_bytes(b"apple");
    /// let b = ByteBuffer::from_bytes(b"banana");
    /// assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
    /// ```
    pub fn compare(&self, other: &Self) -> Result<Ordering> {
        if self.is_released() || other.is_released() {
            return Err(BufferError::Compare.into());
        }
        Ok(self.as_bytes().cmp(other.as_bytes()))
    }

    /// Returns the content, or [`BufferError::Released`].
    pub(crate) fn content(&self) -> Result<&[u8]> {
        let data = self.store()?;
        Ok(&data[..self.len])
    }

    fn store(&self) -> Result<&[u8]> {
        self.data
            .as_deref()
            .ok_or_else(|| BufferError::Released.into())
    }
}

/// Validates an inclusive `[start, end]` range against `len`.
fn check_inclusive_range(start: usize, end: usize, len: usize) -> Result<()> {
    if start >= len {
        return Err(BufferError::IndexOutOfRange { index: start, len }.into());
    }
    if end >= len {
        return Err(BufferError::IndexOutOfRange { index: end, len }.into());
    }
    if start > end {
        return Err(BufferError::InvalidRange { start, end }.into());
    }
    Ok(())
}

fn check_search_start(from: usize, len: usize) -> Result<()> {
    if from > len {
        return Err(BufferError::IndexOutOfRange { index: from, len }.into());
    }
    Ok(())
}

/// Forward substring search over `haystack[from..]`.
fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| offset + from)
}

impl PartialEq for ByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ByteBuffer {}

impl PartialOrd for ByteBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for ByteBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(src: &[u8]) -> Self {
        Self::from_bytes(src)
    }
}

impl From<&str> for ByteBuffer {
    fn from(src: &str) -> Self {
        Self::from_bytes(src.as_bytes())
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}
