//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use docqa_rag::{ApiKey, ModelName, RagConfig, Result};

/// Ask questions about a text document.
#[derive(Debug, Clone, Parser)]
#[command(name = "docqa", version, about)]
pub struct Args {
    /// Document to load (.txt, .text, .md, .markdown)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Ask a single question and exit instead of starting a prompt
    #[arg(short, long)]
    pub question: Option<String>,

    /// Maximum chunk size in characters
    #[arg(long, default_value_t = 1000)]
    pub chunk_size: usize,

    /// Characters shared by consecutive chunks
    #[arg(long, default_value_t = 200)]
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per question
    #[arg(long, default_value_t = 4)]
    pub top_k: usize,

    /// Sampling temperature between 0 and 1
    #[arg(long, default_value_t = 0.3)]
    pub temperature: f32,

    /// Chat model (gpt-3.5-turbo, gpt-4, gpt-4-turbo)
    #[arg(long, default_value_t = ModelName::Gpt35Turbo)]
    pub model: ModelName,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_API_BASE")]
    pub api_base: Option<String>,

    /// Print the retrieved chunks and their scores with each answer
    #[arg(long)]
    pub show_context: bool,
}

impl Args {
    /// Build a validated pipeline configuration from the flags.
    pub fn rag_config(&self) -> Result<RagConfig> {
        RagConfig::builder()
            .chunk_size(self.chunk_size)
            .chunk_overlap(self.chunk_overlap)
            .top_k(self.top_k)
            .temperature(self.temperature)
            .model(self.model)
            .build()
    }

    /// Whether the API key flag holds a usable credential.
    pub fn has_valid_key(&self) -> bool {
        self.api_key.as_deref().and_then(ApiKey::parse).is_some()
    }
}
