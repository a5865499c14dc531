//! Export helpers: file naming, document framing and delivery strategies.
//!
//! Rendering never touches the file system. Callers turn a page into bytes, pick a file name with
//! [`export_filename`] and hand both to a [`Deliver`] implementation.

use regex::Regex;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// XML prolog prepended to standalone SVG downloads.
pub const SVG_PROLOG: &str = "<?xml version=\"1.0\" standalone=\"no\"?>\r\n";

const FALLBACK_STEM: &str = "layer";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write export stream: {0}")]
    Stream(#[from] std::io::Error),
    #[error("unsupported export format: {value}")]
    UnknownFormat { value: String },
}

pub type Result<T> = std::result::Result<T, ExportError>;

fn whitespace_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s").expect("valid regex"))
}

fn unsafe_filename_chars_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid regex"))
}

/// Derives a download file name from a layer's display name.
///
/// Whitespace becomes `_`, every other character outside `[A-Za-z0-9_]` is dropped, and `.ext`
/// is appended. A name with nothing usable left falls back to `layer`.
pub fn export_filename(display_name: &str, ext: &str) -> String {
    let underscored = whitespace_regex().replace_all(display_name, "_");
    let stem = unsafe_filename_chars_regex().replace_all(&underscored, "");
    let stem = if stem.is_empty() {
        FALLBACK_STEM
    } else {
        &*stem
    };
    let ext = ext.trim_start_matches('.');
    format!("{stem}.{ext}")
}

/// Frames an SVG fragment as a standalone document.
pub fn svg_document_bytes(svg: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(SVG_PROLOG.len() + svg.len());
    out.extend_from_slice(SVG_PROLOG.as_bytes());
    out.extend_from_slice(svg.as_bytes());
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ExportError::UnknownFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// A destination for exported bytes.
pub trait Deliver {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> Result<()>;
}

/// Writes each export to `dir/filename`, creating `dir` when missing.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Deliver for DirectoryDelivery {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
        let path = self.path_for(filename);
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote export");
        self.written.push(path);
        Ok(())
    }
}

/// Streams exports to any writer (stdout, a socket, an in-memory buffer). The file name is
/// only logged.
#[derive(Debug)]
pub struct WriterDelivery<W> {
    writer: W,
}

impl<W: Write> WriterDelivery<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Deliver for WriterDelivery<W> {
    fn deliver(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        tracing::debug!(filename, bytes = bytes.len(), "streamed export");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_only_safe_characters() {
        assert_eq!(
            export_filename("Red Team Coverage (Q3)", "svg"),
            "Red_Team_Coverage_Q3.svg"
        );
        assert_eq!(export_filename("a\tb\nc", "png"), "a_b_c.png");
        assert_eq!(export_filename("Équipe-1", ".pdf"), "quipe1.pdf");
        assert_eq!(export_filename("()!", "jpg"), "layer.jpg");
        assert_eq!(export_filename("", "svg"), "layer.svg");
    }

    #[test]
    fn svg_document_starts_with_prolog() {
        let bytes = svg_document_bytes("<svg/>");
        assert_eq!(
            bytes,
            b"<?xml version=\"1.0\" standalone=\"no\"?>\r\n<svg/>".to_vec()
        );
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("SVG".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert_eq!("jpeg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert!(ExportFormat::Pdf.is_raster());
        assert!(matches!(
            "gif".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn directory_delivery_writes_named_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut delivery = DirectoryDelivery::new(tmp.path().join("out"));
        delivery.deliver(b"<svg/>", "layer.svg").unwrap();

        let path = tmp.path().join("out").join("layer.svg");
        assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");
        assert_eq!(delivery.written(), [path]);
    }

    #[test]
    fn directory_delivery_reports_unwritable_targets() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut delivery = DirectoryDelivery::new(&blocker);
        let err = delivery.deliver(b"data", "layer.png").unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn writer_delivery_streams_bytes() {
        let mut delivery = WriterDelivery::new(Vec::new());
        delivery.deliver(b"abc", "ignored.svg").unwrap();
        delivery.deliver(b"def", "ignored.svg").unwrap();
        assert_eq!(delivery.into_inner(), b"abcdef");
    }
}
