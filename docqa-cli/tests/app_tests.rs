//! Tests for opening a session from command-line flags.

use clap::Parser;
use docqa_cli::{Args, open_session};
use docqa_rag::RagError;

#[tokio::test]
async fn opens_and_answers_from_a_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors.txt");
    std::fs::write(&path, "The sky is blue.\n\nGrass is green.").unwrap();

    let args = Args::try_parse_from(["docqa", "--file", path.to_str().unwrap(), "--api-key", ""]).unwrap();
    let (session, name, chunk_count) = open_session(&args).await.unwrap();

    assert_eq!(name, "colors.txt");
    assert_eq!(chunk_count, 1);
    let (answer, sources) = session.ask_with_sources("What color is the sky?").await.unwrap();
    assert!(answer.text.starts_with("The sky is blue."));
    assert_eq!(sources.len(), 1);
}

#[tokio::test]
async fn unsupported_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    std::fs::write(&path, "a,b").unwrap();

    let args = Args::try_parse_from(["docqa", "--file", path.to_str().unwrap()]).unwrap();
    let err = open_session(&args).await.err().unwrap();

    assert!(err.to_string().contains("table.csv"));
    assert!(matches!(err.root_cause().downcast_ref::<RagError>(), Some(RagError::UnsupportedFormat { .. })));
}
