//! FlateDecode compression for stream payloads.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Compress data using Flate/Deflate compression.
///
/// Returns compressed bytes suitable for the FlateDecode filter.
pub fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Compress only when it pays off.
///
/// Returns `None` for empty input or when the compressed form is not
/// strictly smaller than the input.
pub fn compress_if_smaller(data: &[u8]) -> std::io::Result<Option<Vec<u8>>> {
    if data.is_empty() {
        return Ok(None);
    }
    let compressed = compress_data(data)?;
    if compressed.len() < data.len() {
        Ok(Some(compressed))
    } else {
        Ok(None)
    }
}
