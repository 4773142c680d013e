//! Text extraction for PDF and Word documents.
//!
//! This module is only available when the `documents` feature is enabled.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, error};

use crate::error::Result;

/// Location of the main body inside a `.docx` archive.
const DOCX_BODY: &str = "word/document.xml";

fn invalid_data(format: &str, message: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("failed to extract {format} text: {message}"))
}

/// Extract the text of every page of a PDF, in page order.
///
/// # Errors
///
/// Returns [`RagError::Io`](crate::RagError::Io) if the file cannot be read
/// or is not a parseable PDF.
pub fn pdf_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        error!(path = %path.display(), error = %e, "PDF extraction failed");
        invalid_data("PDF", e)
    })?;
    debug!(path = %path.display(), chars = text.chars().count(), "extracted PDF text");
    Ok(text)
}

/// Extract the paragraph text of a `.docx` document.
///
/// Paragraphs and line breaks become newlines and tabs become `\t`.
///
/// # Errors
///
/// Returns [`RagError::Io`](crate::RagError::Io) if the file cannot be read,
/// is not a zip archive, or has no readable `word/document.xml`.
pub fn docx_text(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| invalid_data("DOCX", e))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| invalid_data("DOCX", e))?
        .read_to_string(&mut xml)?;

    let text = docx_body_text(&xml).inspect_err(|e| {
        error!(path = %path.display(), error = %e, "DOCX extraction failed");
    })?;
    debug!(path = %path.display(), chars = text.chars().count(), "extracted DOCX text");
    Ok(text)
}

/// Collect the text runs of a WordprocessingML body.
fn docx_body_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event().map_err(|e| invalid_data("DOCX", e))? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                text.push_str(&t.unescape().map_err(|e| invalid_data("DOCX", e))?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
