//! Owning list of byte buffers.
//!
//! [`BufferList`] tracks its own logical capacity and grows it by doubling
//! (starting at one) whenever a push would overflow, the same discipline
//! [`ByteBuffer`] follows for bytes.

use crate::core::buffer::ByteBuffer;
use crate::error::{BufferError, Result};
use tracing::debug;

/// A growable list that owns every [`ByteBuffer`] it holds.
///
/// # Examples
///
/// ```
/// use strbuf::{BufferList, ByteBuffer};
///
/// let mut list = BufferList::new();
/// let word = ByteBuffer::from_bytes(b"word");
/// list.push(&word).unwrap();
/// assert_eq!(list.get(0).unwrap().as_bytes(), b"word");
/// // The caller still owns `word`.
/// assert_eq!(word.as_bytes(), b"word");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferList {
    /// Elements `[0, count)`; the vector length is the count.
    items: Vec<ByteBuffer>,
    /// Logical capacity, at least `items.len()`.
    cap: usize,
}

impl BufferList {
    /// Creates an empty list with no storage; the first push allocates one slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            cap: 0,
        }
    }

    /// Creates an empty list with room for `capacity` buffers.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidCount`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidCount { count: 0 }.into());
        }
        Ok(Self {
            items: Vec::with_capacity(capacity),
            cap: capacity,
        })
    }

    /// Returns the number of buffers in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the logical capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the list holds no buffers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a copy of `buffer`; the caller keeps ownership of the original.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`] if `buffer` has been released.
    pub fn push(&mut self, buffer: &ByteBuffer) -> Result<()> {
        let copy = ByteBuffer::from_buffer(buffer)?;
        self.push_owned(copy)
    }

    /// Moves an owned buffer into the list.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Released`] if `buffer` has been released, since
    /// every element of the list must be initialized.
    pub fn push_owned(&mut self, buffer: ByteBuffer) -> Result<()> {
        if buffer.is_released() {
            return Err(BufferError::Released.into());
        }
        if self.items.len() >= self.cap {
            self.grow();
        }
        self.items.push(buffer);
        Ok(())
    }

    /// Returns the buffer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `index >= len`.
    pub fn get(&self, index: usize) -> Result<&ByteBuffer> {
        self.items.get(index).ok_or_else(|| {
            BufferError::IndexOutOfRange {
                index,
                len: self.items.len(),
            }
            .into()
        })
    }

    /// Runs `f` on the buffer at `index` and returns its result.
    ///
    /// Elements must stay live, so a buffer released inside `f` is put back
    /// as an empty buffer and the call fails.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] when `index >= len`,
    /// [`BufferError::Released`] when `f` released the buffer, and otherwise
    /// whatever `f` returns.
    pub fn modify<T, F>(&mut self, index: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut ByteBuffer) -> Result<T>,
    {
        let len = self.items.len();
        let buffer = self
            .items
            .get_mut(index)
            .ok_or(BufferError::IndexOutOfRange { index, len })?;
        let result = f(buffer);
        if buffer.is_released() {
            *buffer = ByteBuffer::with_capacity(0);
            return Err(BufferError::Released.into());
        }
        result
    }

    /// Changes the logical capacity.
    ///
    /// A capacity of zero releases the list. A capacity below the current
    /// length drops the trailing buffers.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity == 0 {
            self.release();
            return;
        }
        if new_capacity < self.items.len() {
            for mut dropped in self.items.drain(new_capacity..) {
                dropped.release();
            }
        }
        if new_capacity > self.items.capacity() {
            self.items.reserve_exact(new_capacity - self.items.len());
        }
        self.cap = new_capacity;
    }

    /// Releases every buffer, then frees the backing array.
    ///
    /// Calling this on an already released list does nothing.
    pub fn release(&mut self) {
        for buffer in &mut self.items {
            buffer.release();
        }
        self.items = Vec::new();
        self.cap = 0;
    }

    /// Iterates over the buffers in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ByteBuffer> {
        self.items.iter()
    }

    /// Returns the buffers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ByteBuffer] {
        &self.items
    }

    fn grow(&mut self) {
        let new_capacity = if self.cap == 0 { 1 } else { self.cap * 2 };
        debug!(from = self.cap, to = new_capacity, "growing buffer list");
        self.resize(new_capacity);
    }
}

impl<'a> IntoIterator for &'a BufferList {
    type Item = &'a ByteBuffer;
    type IntoIter = std::slice::Iter<'a, ByteBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for BufferList {
    type Item = ByteBuffer;
    type IntoIter = std::vec::IntoIter<ByteBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
