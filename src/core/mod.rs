//! Core byte-string types.
//!
//! [`ByteBuffer`] is the growable, NUL-terminated byte string and
//! [`BufferList`] the owning list of them. Numeric conversions live in
//! [`convert`]. Nothing here touches the filesystem.

pub mod buffer;
pub mod convert;
pub mod list;

pub use buffer::ByteBuffer;
pub use list::BufferList;
