//! Document intake: declared type, payload, and text reading.

mod docx;
mod pdf;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ReadError, Result, ScreenError};
use crate::models::config::ReaderConfig;

/// MIME type of plain text uploads.
pub const MIME_PLAIN_TEXT: &str = "text/plain";
/// MIME type of PDF uploads.
pub const MIME_PDF: &str = "application/pdf";
/// MIME type of Office Open XML word-processing uploads.
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Declared type of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    WordProcessing,
    /// Anything else, carrying the declared type for error reporting.
    Unsupported(String),
}

impl DocumentKind {
    /// Classify a declared MIME type. Parameters such as `; charset=utf-8` are
    /// ignored and the comparison is case-insensitive.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            MIME_PLAIN_TEXT => DocumentKind::PlainText,
            MIME_PDF => DocumentKind::Pdf,
            MIME_DOCX => DocumentKind::WordProcessing,
            _ => DocumentKind::Unsupported(mime.to_string()),
        }
    }

    /// Declared type for a file name, based on its extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" => DocumentKind::PlainText,
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::WordProcessing,
            "" => DocumentKind::Unsupported("(no extension)".to_string()),
            other => DocumentKind::Unsupported(format!(".{}", other)),
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            DocumentKind::PlainText => MIME_PLAIN_TEXT,
            DocumentKind::Pdf => MIME_PDF,
            DocumentKind::WordProcessing => MIME_DOCX,
            DocumentKind::Unsupported(declared) => declared,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DocumentKind::Unsupported(_))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::PlainText => write!(f, "plain text"),
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::WordProcessing => write!(f, "DOCX"),
            DocumentKind::Unsupported(declared) => write!(f, "unsupported ({})", declared),
        }
    }
}

/// An uploaded document: raw bytes plus the type it was declared as.
#[derive(Debug, Clone)]
pub struct Document {
    pub kind: DocumentKind,
    pub data: Vec<u8>,
}

impl Document {
    pub fn new(kind: DocumentKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Build a document from bytes and a declared MIME type.
    pub fn from_mime(mime: &str, data: impl Into<Vec<u8>>) -> Self {
        Self::new(DocumentKind::from_mime(mime), data)
    }

    /// Read a file from disk, declaring its type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(DocumentKind::from_path(path), data))
    }
}

/// Turns a [`Document`] into text, dispatching once on its declared kind.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read all text from the document.
    ///
    /// - plain text is decoded as UTF-8 verbatim
    /// - PDF page texts are concatenated in order with no separator
    /// - DOCX body paragraphs are each followed by `\n`
    pub fn read(&self, document: &Document) -> Result<String> {
        let read: fn(&Self, &[u8]) -> Result<String> = match &document.kind {
            DocumentKind::PlainText => Self::read_plain_text,
            DocumentKind::Pdf => Self::read_pdf,
            DocumentKind::WordProcessing => Self::read_docx,
            DocumentKind::Unsupported(declared) => {
                return Err(ScreenError::UnsupportedType(declared.clone()));
            }
        };

        if let Some(limit) = self.config.max_bytes() {
            if document.data.len() > limit {
                return Err(ReadError::TooLarge {
                    size: document.data.len(),
                    limit,
                }
                .into());
            }
        }

        info!("Reading {} document ({} bytes)", document.kind, document.data.len());

        let text = read(self, &document.data)?;

        debug!("Read {} characters of text", text.chars().count());
        Ok(text)
    }

    fn read_plain_text(&self, data: &[u8]) -> Result<String> {
        Ok(String::from_utf8(data.to_vec()).map_err(ReadError::from)?)
    }

    fn read_pdf(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::new()
            .with_empty_password(self.config.decrypt_empty_password);
        extractor.load(data).map_err(ReadError::from)?;
        Ok(extractor.extract_text().map_err(ReadError::from)?)
    }

    fn read_docx(&self, data: &[u8]) -> Result<String> {
        Ok(DocxExtractor::new().extract_text(data)?)
    }
}

/// Read a document with the default reader configuration.
pub fn read_document(document: &Document) -> Result<String> {
    DocumentReader::default().read(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_verbatim() {
        let doc = Document::from_mime("text/plain", "hello world");
        assert_eq!(read_document(&doc).unwrap(), "hello world");

        let doc = Document::from_mime("text/plain", "  keeps\r\nwhitespace\t ");
        assert_eq!(read_document(&doc).unwrap(), "  keeps\r\nwhitespace\t ");
    }

    #[test]
    fn test_unsupported_type() {
        let doc = Document::from_mime("image/png", vec![0x89, b'P', b'N', b'G']);
        match read_document(&doc) {
            Err(ScreenError::UnsupportedType(declared)) => assert_eq!(declared, "image/png"),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_read_failure() {
        let doc = Document::from_mime("text/plain", vec![0x66, 0xff, 0xfe]);
        assert!(matches!(
            read_document(&doc),
            Err(ScreenError::Read(ReadError::Utf8(_)))
        ));
    }

    #[test]
    fn test_malformed_pdf_is_read_failure() {
        let doc = Document::from_mime("application/pdf", "%PDF-1.4 definitely not a pdf");
        assert!(matches!(read_document(&doc), Err(ScreenError::Read(ReadError::Pdf(_)))));
    }

    #[test]
    fn test_size_limit() {
        let reader = DocumentReader::new(ReaderConfig {
            max_file_size_mb: 1,
            ..ReaderConfig::default()
        });
        let doc = Document::new(DocumentKind::PlainText, vec![b'a'; 1024 * 1024 + 1]);
        assert!(matches!(
            reader.read(&doc),
            Err(ScreenError::Read(ReadError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime("text/plain; charset=utf-8"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_mime("Application/PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(" APPLICATION/PDF ; name=cv.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(MIME_DOCX), DocumentKind::WordProcessing);
        assert_eq!(
            DocumentKind::from_mime("application/msword"),
            DocumentKind::Unsupported("application/msword".to_string())
        );
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(DocumentKind::from_path(Path::new("cv.TXT")), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_path(Path::new("a/b/cv.pdf")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("cv.docx")), DocumentKind::WordProcessing);
        assert!(!DocumentKind::from_path(Path::new("cv.doc")).is_supported());
        assert!(!DocumentKind::from_path(Path::new("README")).is_supported());
    }
}
