//! Transparent gzip handling for table files.
//!
//! Reading sniffs the gzip magic bytes, so compressed and plain inputs open the
//! same way. Writing compresses when asked to, which by default means the path
//! ends in `.gz`, `.bgz` or `.gzip`.

use crate::config::Compression as OutputCompression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Gzip member header magic.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` if the path carries a gzip extension.
pub fn has_gzip_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("gz") | Some("bgz") | Some("gzip")
    )
}

/// Buffered reader that decompresses gzip input and passes plain input through.
///
/// Multi-member (bgzip) streams are decoded in full.
pub enum CompressedReader<R: BufRead> {
    /// Uncompressed input
    Plain(R),
    /// Gzip/bgzip input
    Gzip(BufReader<MultiGzDecoder<R>>),
}

impl<R: BufRead> CompressedReader<R> {
    /// Wraps `reader`, detecting compression from its first bytes.
    pub fn new(mut reader: R) -> io::Result<Self> {
        let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
        if is_gzip {
            Ok(CompressedReader::Gzip(BufReader::new(MultiGzDecoder::new(reader))))
        } else {
            Ok(CompressedReader::Plain(reader))
        }
    }

    /// Returns `true` if the input is being decompressed.
    pub fn is_compressed(&self) -> bool {
        matches!(self, CompressedReader::Gzip(_))
    }
}

impl CompressedReader<BufReader<File>> {
    /// Opens a file for reading.
    pub fn open(path: &Path) -> io::Result<Self> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> Read for CompressedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            CompressedReader::Plain(r) => r.read(buf),
            CompressedReader::Gzip(r) => r.read(buf),
        }
    }
}

impl<R: BufRead> BufRead for CompressedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            CompressedReader::Plain(r) => r.fill_buf(),
            CompressedReader::Gzip(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            CompressedReader::Plain(r) => r.consume(amt),
            CompressedReader::Gzip(r) => r.consume(amt),
        }
    }
}

/// Buffered file writer with optional gzip compression.
///
/// Call [`CompressedWriter::finish`] to write the gzip trailer and flush.
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(BufWriter<File>),
    /// Gzip compressed writer (flate2, default level)
    Gzip(GzEncoder<BufWriter<File>>),
}

impl CompressedWriter {
    /// Creates (or truncates) `path` for writing.
    pub fn create(path: &Path, compression: &OutputCompression) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        if compression.applies_to(path) {
            Ok(CompressedWriter::Gzip(GzEncoder::new(file, Compression::default())))
        } else {
            Ok(CompressedWriter::Plain(file))
        }
    }

    /// Returns `true` if output is gzip-compressed.
    pub fn is_compressed(&self) -> bool {
        matches!(self, CompressedWriter::Gzip(_))
    }

    /// Finalizes compression and flushes everything to the file.
    pub fn finish(self) -> io::Result<()> {
        match self {
            CompressedWriter::Plain(mut w) => w.flush(),
            CompressedWriter::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            CompressedWriter::Plain(w) => w.write(buf),
            CompressedWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            CompressedWriter::Plain(w) => w.flush(),
            CompressedWriter::Gzip(w) => w.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_gzip_extension_detection() {
        assert!(has_gzip_extension(Path::new("seg.tsv.gz")));
        assert!(has_gzip_extension(Path::new("seg.tsv.bgz")));
        assert!(!has_gzip_extension(Path::new("seg.tsv")));
        assert!(!has_gzip_extension(Path::new("seg")));
    }

    #[test]
    fn test_plain_passthrough() {
        let mut reader = CompressedReader::new(Cursor::new(b"CONTIG\n".to_vec())).unwrap();
        assert!(!reader.is_compressed());

        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "CONTIG\n");
    }

    #[test]
    fn test_empty_input_is_plain() {
        let reader = CompressedReader::new(Cursor::new(Vec::new())).unwrap();
        assert!(!reader.is_compressed());
    }

    #[test]
    fn test_write_then_read_gzip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.tsv.gz");

        let mut writer = CompressedWriter::create(&path, &OutputCompression::Auto).unwrap();
        assert!(writer.is_compressed());
        writer.write_all(b"#SAMPLE_NAME=S1\nCONTIG\n").unwrap();
        writer.finish().unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert!(raw.starts_with(&GZIP_MAGIC));

        let mut reader = CompressedReader::open(&path).unwrap();
        assert!(reader.is_compressed());
        let lines: Vec<String> = (&mut reader).lines().collect::<io::Result<_>>().unwrap();
        assert_eq!(lines, vec!["#SAMPLE_NAME=S1", "CONTIG"]);
    }

    #[test]
    fn test_forced_plain_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.tsv.gz");

        let mut writer = CompressedWriter::create(&path, &OutputCompression::None).unwrap();
        writer.write_all(b"CONTIG\n").unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"CONTIG\n");
    }
}
