//! Reading documents from disk as text.

use std::path::Path;

use tracing::debug;

use crate::error::{RagError, Result};

/// Extensions read directly as UTF-8 text.
pub const TEXT_EXTENSIONS: [&str; 4] = ["txt", "text", "md", "markdown"];

/// Read the text of the document at `path`.
///
/// Plain text and Markdown files are read as UTF-8. With the `documents`
/// feature, PDF and `.docx` files have their text extracted.
///
/// # Errors
///
/// Returns [`RagError::UnsupportedFormat`] for any other extension and
/// [`RagError::Io`] if the file cannot be read or extraction fails.
pub fn load_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let extension =
        path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).unwrap_or_default();

    let text = match extension.as_str() {
        ext if TEXT_EXTENSIONS.contains(&ext) => std::fs::read_to_string(path)?,
        #[cfg(feature = "documents")]
        "pdf" => crate::extract::pdf_text(path)?,
        #[cfg(feature = "documents")]
        "docx" => crate::extract::docx_text(path)?,
        _ => return Err(RagError::UnsupportedFormat { extension }),
    };

    debug!(path = %path.display(), format = %extension, chars = text.chars().count(), "loaded document");
    Ok(text)
}
