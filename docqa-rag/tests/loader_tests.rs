//! Tests for reading documents from disk.

use std::io::Write;

use docqa_rag::{RagError, load_document};

#[test]
fn loads_text_and_markdown_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.MD");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "# Title\n\nBody text.").unwrap();

    assert_eq!(load_document(&path).unwrap(), "# Title\n\nBody text.");
}

#[test]
fn rejects_unknown_formats() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["archive.zip", "sheet.xlsx", "no_extension"] {
        let path = dir.path().join(name);
        std::fs::write(&path, b"data").unwrap();
        assert!(matches!(load_document(&path), Err(RagError::UnsupportedFormat { .. })), "{name}");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_document(dir.path().join("missing.txt")), Err(RagError::Io(_))));
}

#[cfg(feature = "documents")]
mod documents {
    use std::path::Path;

    use super::*;

    /// Write a minimal `.docx` holding only the document body.
    fn write_docx(path: &Path, body: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default()).unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
        .unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn extracts_docx_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Report.DOCX");
        write_docx(
            &path,
            "<w:p><w:r><w:t>The sky is blue.</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Grass is </w:t></w:r><w:r><w:t>green.</w:t></w:r></w:p>",
        );

        assert_eq!(load_document(&path).unwrap(), "The sky is blue.\nGrass is green.\n");
    }

    #[test]
    fn docx_without_body_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let mut zip = zip::ZipWriter::new(std::fs::File::create(&path).unwrap());
        zip.start_file("other.xml", zip::write::SimpleFileOptions::default()).unwrap();
        zip.finish().unwrap();

        assert!(matches!(load_document(&path), Err(RagError::Io(_))));
    }

    #[test]
    fn corrupt_documents_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["letter.docx", "paper.pdf"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"this is not a real document").unwrap();
            assert!(matches!(load_document(&path), Err(RagError::Io(_))), "{name}");
        }
    }
}

#[cfg(not(feature = "documents"))]
#[test]
fn pdf_and_docx_need_the_documents_feature() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["report.pdf", "letter.docx"] {
        let path = dir.path().join(name);
        std::fs::write(&path, b"data").unwrap();
        assert!(matches!(load_document(&path), Err(RagError::UnsupportedFormat { .. })), "{name}");
    }
}
