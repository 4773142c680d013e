use clap::Parser;
use docqa_cli::console::{ask_and_print, run_console};
use docqa_cli::{Args, open_session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (for OPENAI_API_KEY).
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if !args.has_valid_key() {
        eprintln!("Running in free mode: answers use keyword matching over the document.\n");
    }

    let (session, name, chunk_count) = open_session(&args).await?;
    eprintln!("Loaded {name} ({chunk_count} chunks).");

    match &args.question {
        Some(question) => ask_and_print(&session, question, args.show_context).await?,
        None => run_console(&session, args.show_context).await?,
    }

    Ok(())
}
