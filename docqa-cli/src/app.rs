//! Wiring flags into a ready session.

use anyhow::Context;
use docqa_rag::{AnswerGenerator, QaPipeline, QaSession, load_document};
use tracing::warn;

use crate::args::Args;

/// Build a session from the flags and load the requested document.
///
/// Returns the session with the document's display name and chunk count.
pub async fn open_session(args: &Args) -> anyhow::Result<(QaSession, String, usize)> {
    let config = args.rag_config()?;
    if !args.has_valid_key() {
        warn!("no valid OpenAI API key (expected a key starting with \"sk-\"), running in free mode");
    }
    let generator =
        AnswerGenerator::from_credential(args.api_key.as_deref(), args.api_base.as_deref());
    let session = QaSession::new(QaPipeline::new(config, generator));

    let text = load_document(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());
    let chunk_count = session.load_document(name.as_str(), &text).await?;

    Ok((session, name, chunk_count))
}
