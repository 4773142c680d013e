//! Interactive prompt and answer printing.

use std::fmt::Write;

use docqa_rag::{Answer, QaSession, SearchResult};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Render an answer, preceded by the chunks it was built from when
/// `show_context` is set.
pub fn format_answer(answer: &Answer, sources: &[SearchResult], show_context: bool) -> String {
    let mut out = String::new();
    if show_context {
        out.push_str("--- context ---\n");
        for result in sources {
            let _ = writeln!(
                out,
                "[chunk {} | score {:.3}]\n{}\n",
                result.chunk.index, result.score, result.chunk.text
            );
        }
        out.push_str("---------------\n");
    }
    out.push_str(&answer.text);
    out
}

/// Ask one question and print the reply.
pub async fn ask_and_print(session: &QaSession, question: &str, show_context: bool) -> anyhow::Result<()> {
    let (answer, sources) = session.ask_with_sources(question).await?;
    println!("{}", format_answer(&answer, &sources, show_context));
    Ok(())
}

/// Read questions until EOF, Ctrl-C or `:quit`.
///
/// `:clear` starts a fresh conversation about the same document.
pub async fn run_console(session: &QaSession, show_context: bool) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let name = session.document_name().await.unwrap_or_default();
    println!("Ask questions about {name}. Type :quit to exit, :clear to reset the conversation.\n");

    loop {
        match rl.readline("question> ") {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(question);

                match question {
                    ":quit" | ":q" => break,
                    ":clear" => {
                        session.clear_transcript().await;
                        println!("Conversation cleared.\n");
                        continue;
                    }
                    _ => {}
                }

                if let Err(e) = ask_and_print(session, question, show_context).await {
                    eprintln!("error: {e}");
                }
                println!();
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use docqa_rag::{AnswerSource, Chunk, LocalReason};

    use super::*;

    fn answer(text: &str) -> Answer {
        Answer { text: text.to_string(), source: AnswerSource::Local { reason: LocalReason::NoModel } }
    }

    #[test]
    fn context_is_shown_only_when_requested() {
        let sources =
            vec![SearchResult { chunk: Chunk { index: 2, text: "The sky is blue.".into() }, score: 0.5 }];

        assert_eq!(format_answer(&answer("Blue."), &sources, false), "Blue.");
        assert_eq!(
            format_answer(&answer("Blue."), &sources, true),
            "--- context ---\n[chunk 2 | score 0.500]\nThe sky is blue.\n\n---------------\nBlue."
        );
    }
}
