//! Line-oriented file reading.
//!
//! [`LineReader`] pulls one line at a time from any seekable source using a
//! window that starts small and doubles until the line fits. [`FileReader`]
//! loads a whole file at once, memory mapping it when it is large, and
//! splits it into lines with the same rules.

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::core::{BufferList, ByteBuffer};
use crate::error::{Error, IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};

/// Size of the first read attempt for a line, in bytes.
pub const INITIAL_LINE_WINDOW: usize = 256;

/// Threshold for using memory mapping (1MB).
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum file size to read into memory (1GB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Reads successive lines from a seekable source.
///
/// Each call to [`next_line`](Self::next_line) seeks to the cursor, reads a
/// window of bytes, and looks for `\n`. If none is found and more input
/// remains, the window doubles and the read is retried from the same
/// cursor. The returned line excludes the `\n`; a `\r` before it is kept.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use strbuf::io::LineReader;
///
/// let mut reader = LineReader::new(Cursor::new(b"one\ntwo".to_vec()));
/// assert_eq!(reader.next_line().unwrap().as_bytes(), b"one");
/// assert_eq!(reader.next_line().unwrap().as_bytes(), b"two");
/// assert!(reader.next_line().is_err());
/// ```
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    /// Offset of the first byte not yet returned.
    cursor: u64,
}

impl LineReader<File> {
    /// Opens `path` for line reading.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] when the path does not exist and
    /// [`IoError::ReadFailed`] when it cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();
        if !path.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }
        let file = File::open(path).map_err(|e| IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        })?;
        Ok(Self::new(file))
    }
}

impl<R: Read + Seek> LineReader<R> {
    /// Wraps `inner`, starting at offset zero.
    pub const fn new(inner: R) -> Self {
        Self { inner, cursor: 0 }
    }

    /// Returns the offset the next read starts from.
    pub const fn position(&self) -> u64 {
        self.cursor
    }

    /// Returns the wrapped source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads the next line into a new buffer.
    ///
    /// The cursor advances past the line and its `\n`. A final line without
    /// a trailing `\n` is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::EndOfInput`] when no bytes remain, and
    /// [`IoError::Generic`] when the source fails to seek or read.
    pub fn next_line(&mut self) -> Result<ByteBuffer> {
        let mut window = INITIAL_LINE_WINDOW;
        loop {
            self.inner.seek(SeekFrom::Start(self.cursor))?;
            let mut chunk = Vec::with_capacity(window);
            let read = (&mut self.inner)
                .take(window as u64)
                .read_to_end(&mut chunk)?;

            if let Some(newline) = chunk.iter().position(|&b| b == b'\n') {
                self.cursor += newline as u64 + 1;
                return Ok(ByteBuffer::from_bytes(&chunk[..newline]));
            }
            if read < window {
                if read == 0 {
                    return Err(IoError::EndOfInput.into());
                }
                self.cursor += read as u64;
                return Ok(ByteBuffer::from_bytes(&chunk));
            }

            trace!(
                cursor = self.cursor,
                from = window,
                to = window * 2,
                "line longer than window, doubling"
            );
            window *= 2;
        }
    }
}

impl<R: Read + Seek> Iterator for LineReader<R> {
    type Item = Result<ByteBuffer>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Ok(line) => Some(Ok(line)),
            Err(Error::Io(IoError::EndOfInput)) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// File reader with support for memory mapping.
///
/// Automatically chooses the best reading strategy based on file size:
/// - Small files (< 1MB): Read directly into memory
/// - Large files (>= 1MB): Use memory mapping
///
/// # Examples
///
/// ```no_run
/// use strbuf::io::FileReader;
///
/// let reader = FileReader::open("records.csv").unwrap();
/// let lines = reader.read_lines().unwrap();
/// println!("{} lines", lines.len());
/// ```
#[derive(Debug)]
pub struct FileReader {
    /// File handle.
    file: File,
    /// File size in bytes.
    size: u64,
    /// File path for error messages.
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than [`MAX_FILE_SIZE`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the whole file into one buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_to_buffer(&self) -> Result<ByteBuffer> {
        self.with_contents(ByteBuffer::from_bytes)
    }

    /// Reads the file as one buffer per line.
    ///
    /// Lines follow [`LineReader`] rules: one `\n` is stripped per line, a
    /// `\r` is kept, and an empty file gives an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_lines(&self) -> Result<BufferList> {
        let lines = self.with_contents(split_lines)??;
        debug!(path = %self.path, lines = lines.len(), "read lines");
        Ok(lines)
    }

    /// Runs `f` over the file contents, mapped or read as the size dictates.
    fn with_contents<T>(&self, f: impl FnOnce(&[u8]) -> T) -> Result<T> {
        if self.size >= MMAP_THRESHOLD {
            let mmap = self.mmap()?;
            Ok(f(&mmap))
        } else {
            Ok(f(&self.read_direct_bytes()?))
        }
    }

    /// Reads bytes directly into memory.
    #[allow(clippy::cast_possible_truncation)]
    fn read_direct_bytes(&self) -> Result<Vec<u8>> {
        let mut file = &self.file;
        let mut buffer = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }

    /// Creates a memory-mapped view of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if memory mapping fails.
    pub fn mmap(&self) -> Result<Mmap> {
        // Safety: We're only reading from the file
        unsafe {
            Mmap::map(&self.file).map_err(|e| {
                IoError::MmapFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
                .into()
            })
        }
    }
}

/// Splits `bytes` into lines, dropping the empty segment after a final `\n`.
fn split_lines(bytes: &[u8]) -> Result<BufferList> {
    let mut segments: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    if segments.last().is_some_and(|last| last.is_empty()) {
        segments.pop();
    }

    let mut lines = BufferList::new();
    for segment in segments {
        lines.push_owned(ByteBuffer::from_bytes(segment))?;
    }
    Ok(lines)
}

impl BufferList {
    /// Reads a file into a list with one buffer per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        FileReader::open(path)?.read_lines()
    }

    /// Drains a seekable source into a list with one buffer per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to seek or read.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut lines = Self::new();
        for line in LineReader::new(reader) {
            lines.push_owned(line?)?;
        }
        Ok(lines)
    }
}
