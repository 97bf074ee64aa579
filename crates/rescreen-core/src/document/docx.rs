//! DOCX text extraction using zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::ReadError;

/// Path of the main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Reads body paragraphs out of an Office Open XML word-processing package.
///
/// Only paragraphs that are direct children of `w:body` count, in document
/// order. Tables, headers, footers and text boxes are skipped. Within a
/// paragraph only direct runs and hyperlink runs are read, so tracked
/// insertions, smart tags and content controls are left out. `w:tab` and
/// `w:ptab` become `\t`, `w:cr` and text-wrapping `w:br` become `\n`, and
/// `w:noBreakHyphen` becomes `-`. Page and column breaks produce nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Paragraph texts in document order.
    pub fn extract_paragraphs(&self, data: &[u8]) -> Result<Vec<String>, ReadError> {
        let xml = read_document_part(data)?;
        let paragraphs = parse_paragraphs(&xml)?;
        debug!("DOCX has {} body paragraphs", paragraphs.len());
        Ok(paragraphs)
    }

    /// Every paragraph followed by a newline, including the last.
    pub fn extract_text(&self, data: &[u8]) -> Result<String, ReadError> {
        let paragraphs = self.extract_paragraphs(data)?;
        let mut text = String::new();
        for paragraph in paragraphs {
            text.push_str(&paragraph);
            text.push('\n');
        }
        Ok(text)
    }
}

fn read_document_part(data: &[u8]) -> Result<String, ReadError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ReadError::Docx(format!("not a DOCX package: {}", e)))?;

    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ReadError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ReadError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?;
    Ok(xml)
}

/// True when `stack` ends inside a run of a top-level body paragraph:
/// `… body / p / r` or `… body / p / hyperlink / r`.
fn in_body_run(stack: &[Vec<u8>]) -> bool {
    let Some(body) = stack.iter().position(|n| n.as_slice() == b"body") else {
        return false;
    };

    match &stack[body + 1..] {
        [p, r] => p.as_slice() == b"p" && r.as_slice() == b"r",
        [p, link, r] => {
            p.as_slice() == b"p" && link.as_slice() == b"hyperlink" && r.as_slice() == b"r"
        }
        _ => false,
    }
}

/// Only text-wrapping breaks (the default type) end a line.
fn is_line_break(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"type")
        .is_none_or(|a| a.value.as_ref() == b"textWrapping")
}

fn at_body(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|n| n.as_slice() == b"body")
}

fn parse_paragraphs(xml: &str) -> Result<Vec<String>, ReadError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ReadError::Docx(format!("malformed XML at {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name.as_slice() == b"p" && at_body(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if name.as_ref() == b"p" && at_body(&stack) {
                    paragraphs.push(String::new());
                } else if in_body_run(&stack) {
                    let ch = match name.as_ref() {
                        b"tab" | b"ptab" => Some('\t'),
                        b"cr" => Some('\n'),
                        b"br" if is_line_break(&e) => Some('\n'),
                        b"noBreakHyphen" => Some('-'),
                        _ => None,
                    };
                    if let (Some(ch), Some(p)) = (ch, current.as_mut()) {
                        p.push(ch);
                    }
                }
            }
            Event::Text(t) => {
                let in_text_element = stack.last().is_some_and(|n| n.as_slice() == b"t");
                if in_text_element && in_body_run(&stack[..stack.len() - 1]) {
                    let text = t
                        .unescape()
                        .map_err(|e| ReadError::Docx(format!("bad text node: {}", e)))?;
                    if let Some(p) = current.as_mut() {
                        p.push_str(&text);
                    }
                }
            }
            Event::End(_) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(b"p".as_slice()) && at_body(&stack) {
                    if let Some(p) = current.take() {
                        paragraphs.push(p);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
