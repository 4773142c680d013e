//! Tests for the question-answering session.

use docqa_rag::{
    AnswerGenerator, AnswerSource, LOCAL_DISCLAIMER, LocalReason, NOT_ENOUGH_INFORMATION,
    QaPipeline, QaSession, RagConfig, RagError, Role,
};

fn local_session() -> QaSession {
    let config = RagConfig::builder().chunk_size(40).chunk_overlap(10).top_k(2).build().unwrap();
    QaSession::new(QaPipeline::new(config, AnswerGenerator::local()))
}

#[tokio::test]
async fn asking_without_a_document_fails() {
    let session = local_session();
    let err = session.ask("Anything?").await.unwrap_err();

    assert!(matches!(err, RagError::NoDocument));
    assert_eq!(err.to_string(), "Please upload a document first.");
    assert!(!session.has_document().await);
}

#[tokio::test]
async fn load_and_ask_records_transcript() {
    let session = local_session();
    let chunks = session
        .load_document("colors.txt", "The sky is blue.\n\nGrass is green.\n\nSnow is white.")
        .await
        .unwrap();
    assert!(chunks >= 2);
    assert_eq!(session.document_name().await.as_deref(), Some("colors.txt"));

    let answer = session.ask("What color is the sky?").await.unwrap();
    assert!(answer.text.starts_with("The sky is blue."));
    assert!(answer.text.ends_with(LOCAL_DISCLAIMER));

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[0].content, "What color is the sky?");
    assert_eq!(transcript[1].role, Role::Assistant);
    assert_eq!(transcript[1].content, answer.text);
}

#[tokio::test]
async fn empty_document_answers_not_enough_information() {
    let session = local_session();
    assert_eq!(session.load_document("empty.txt", "   ").await.unwrap(), 0);

    let answer = session.ask("What color is the sky?").await.unwrap();
    assert_eq!(answer.source, AnswerSource::Local { reason: LocalReason::NoModel });
    assert!(answer.text.starts_with(NOT_ENOUGH_INFORMATION));
}

#[tokio::test]
async fn reloading_replaces_document_and_transcript() {
    let session = local_session();
    session.load_document("first.txt", "Cats purr softly.").await.unwrap();
    session.ask("Do cats purr?").await.unwrap();
    let first = session.document().await.unwrap();

    session.load_document("second.txt", "Dogs bark loudly.").await.unwrap();
    assert!(session.transcript().await.is_empty());
    assert_eq!(session.document_name().await.as_deref(), Some("second.txt"));

    // The earlier snapshot still holds the first document.
    assert_eq!(first.index.chunks()[0].text, "Cats purr softly.");

    let answer = session.ask("Do cats purr?").await.unwrap();
    assert!(answer.text.starts_with(NOT_ENOUGH_INFORMATION));
}

#[tokio::test]
async fn clear_drops_everything() {
    let session = local_session();
    session.load_document("a.txt", "Some text here.").await.unwrap();
    session.ask("text?").await.unwrap();

    session.clear().await;
    assert!(!session.has_document().await);
    assert!(session.transcript().await.is_empty());
    assert!(matches!(session.ask("text?").await, Err(RagError::NoDocument)));
}

#[tokio::test]
async fn failed_question_is_answered_with_the_error_in_the_transcript() {
    // Built without the validating builder, so retrieval rejects `top_k`.
    let config = RagConfig { top_k: 0, ..RagConfig::default() };
    let session = QaSession::new(QaPipeline::new(config, AnswerGenerator::local()));
    session.load_document("sky.txt", "The sky is blue.").await.unwrap();

    let err = session.ask("sky").await.unwrap_err();
    assert!(matches!(err, RagError::IndexError(_)));

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[1].role, Role::Assistant);
    assert_eq!(transcript[1].content, err.to_string());
}

#[tokio::test]
async fn missing_document_reply_is_recorded() {
    let session = local_session();
    session.ask("Anything?").await.unwrap_err();

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].content, "Please upload a document first.");
}

#[tokio::test]
async fn sources_are_the_chunks_behind_the_answer() {
    let session = local_session();
    session
        .load_document("colors.txt", "The sky is blue.\n\nGrass is green.\n\nSnow is white.")
        .await
        .unwrap();

    let (answer, sources) = session.ask_with_sources("What color is the sky?").await.unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].chunk.index, 0);
    assert!(sources[0].chunk.text.contains("The sky is blue."));
    assert!(sources[0].score > sources[1].score);
    assert!(answer.text.starts_with("The sky is blue."));
}
