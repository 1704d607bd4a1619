//! File and stream input for byte buffers.
//!
//! Provides line-by-line reading with a growing window, and whole-file
//! reading with memory mapping for large files.

pub mod reader;

pub use reader::{FileReader, INITIAL_LINE_WINDOW, LineReader, MAX_FILE_SIZE, MMAP_THRESHOLD};
