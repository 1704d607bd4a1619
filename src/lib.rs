//! # strbuf
//!
//! Growable byte-string buffers with a NUL sentinel, owning lists of them,
//! and a quote-aware delimiter tokenizer.
//!
//! ## Features
//!
//! - **`ByteBuffer`**: explicit capacity management, range insert/remove,
//!   search, replace, numeric conversion, and an on-demand C string view
//! - **`BufferList`**: an owning list that grows by doubling
//! - **Tokenizing**: split on any of several delimiters while quote-style
//!   regions keep delimiters as content
//! - **Line reading**: one buffer per line from files or seekable streams,
//!   with memory mapping for large files
//!
//! ```
//! use strbuf::{ByteBuffer, Tokenizer};
//!
//! let mut line = ByteBuffer::from_bytes(b"  id,\"Doe, J\"  ");
//! line.trim().unwrap();
//! let fields = Tokenizer::new().tokenize(&line).unwrap();
//! assert_eq!(fields.get(1).unwrap().as_bytes(), b"Doe, J");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod tokenize;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core types
pub use core::{BufferList, ByteBuffer};

// Re-export tokenizer types
pub use tokenize::{DEFAULT_DELIMITERS, DEFAULT_TOGGLES, Tokenizer, split};

// Re-export I/O types
pub use io::{FileReader, LineReader};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
