//! Byte sink that tracks the current file offset.

use std::io::{self, Write};

/// Writes raw bytes to any `Write` target and counts them, so object
/// headers and the xref section know their byte offsets.
pub struct PdfBinaryWriter<W: Write> {
    inner: W,
    position: u64,
}

impl<W: Write> PdfBinaryWriter<W> {
    /// Wrap a byte sink. The position starts at zero.
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Write raw bytes, tracking the byte offset.
    pub fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Write text. Every char must be a single byte in the output.
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Return the inner writer, consuming this one.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
