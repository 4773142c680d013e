//! Answer generation from retrieved context.
//!
//! [`AnswerGenerator`] delegates to a [`ChatModel`] when one is configured and
//! falls back to keyword matching over the context otherwise, or when the
//! model call fails. Callers always receive an [`Answer`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ModelName;
use crate::model::{ChatMessage, ChatModel, ChatRequest};
use crate::tokenize::{question_keywords, split_sentences};

/// Appended to every answer produced by keyword matching.
pub const LOCAL_DISCLAIMER: &str = "This response was generated using keyword matching because no OpenAI API key was provided. For better answers, please provide a valid OpenAI API key.";

/// Returned by keyword matching when no sentence matches the question.
pub const NOT_ENOUGH_INFORMATION: &str =
    "I don't have enough information in the document to answer this question accurately.";

/// Completion length limit for delegated answers.
pub const MAX_TOKENS: u32 = 500;

/// Number of sentences kept by keyword matching.
const MAX_SENTENCES: usize = 3;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on the provided document context.

Answer the user's question based ONLY on the provided context. If the answer is not contained within the context, say \"I don't have enough information in the document to answer this question.\" Don't use prior knowledge.

Provide specific information from the context whenever possible. If quoting directly, use quotation marks.

Context:
";

/// A syntactically valid OpenAI credential.
///
/// Only non-empty keys starting with `sk-` are accepted. The key is never
/// printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Parse a credential, returning `None` if it is not usable.
    pub fn parse(key: &str) -> Option<Self> {
        key.starts_with("sk-").then(|| Self(key.to_string()))
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Why an answer came from keyword matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocalReason {
    /// No chat model is configured.
    NoModel,
    /// Nothing was retrieved, so there was nothing to ground a model on.
    EmptyContext,
    /// The chat model call failed.
    ModelFailed,
}

/// Which strategy produced an [`Answer`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AnswerSource {
    /// The chat model answered.
    Delegated,
    /// Keyword matching answered.
    Local { reason: LocalReason },
}

/// The answer to a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    /// Whether the chat model produced this answer.
    pub fn is_delegated(&self) -> bool {
        self.source == AnswerSource::Delegated
    }
}

/// Produces answers with an optional chat model and a keyword fallback.
#[derive(Clone, Default)]
pub struct AnswerGenerator {
    model: Option<Arc<dyn ChatModel>>,
}

impl AnswerGenerator {
    /// A generator that always uses keyword matching.
    pub fn local() -> Self {
        Self::default()
    }

    /// A generator that delegates to `model`.
    pub fn with_chat_model(model: Arc<dyn ChatModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Configure a generator from an optional credential.
    ///
    /// A valid key enables the OpenAI chat model (when the `openai` feature
    /// is compiled in), optionally against `base_url`. Anything else yields a
    /// keyword-matching generator.
    pub fn from_credential(api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let Some(key) = api_key.and_then(ApiKey::parse) else {
            debug!("no valid API key, using keyword matching");
            return Self::local();
        };

        openai_generator(key, base_url)
    }

    /// Whether a chat model is configured.
    pub fn has_chat_model(&self) -> bool {
        self.model.is_some()
    }

    /// Answer `question` from `context`.
    ///
    /// Never fails: a chat model that errors or replies with blank text is
    /// logged and keyword matching answers instead. Any other reply is
    /// returned verbatim. `temperature` is clamped to `[0, 1]`.
    pub async fn answer(
        &self,
        context: &str,
        question: &str,
        temperature: f32,
        model_name: ModelName,
    ) -> Answer {
        let Some(model) = &self.model else {
            return local(context, question, LocalReason::NoModel);
        };
        if context.trim().is_empty() {
            debug!("empty context, skipping chat model");
            return local(context, question, LocalReason::EmptyContext);
        }

        let clamped = if temperature.is_nan() { 0.0 } else { temperature.clamp(0.0, 1.0) };
        if clamped != temperature {
            debug!(temperature, clamped, "temperature clamped");
        }

        let request = ChatRequest {
            model: model_name,
            messages: vec![
                ChatMessage::system(format!("{SYSTEM_PROMPT}{context}")),
                ChatMessage::user(question),
            ],
            temperature: clamped,
            max_tokens: MAX_TOKENS,
        };

        match model.complete(request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!(provider = model.provider(), "chat model returned blank text, falling back to keyword matching");
                local(context, question, LocalReason::ModelFailed)
            }
            Ok(text) => {
                info!(provider = model.provider(), model = %model_name, "delegated answer");
                Answer { text, source: AnswerSource::Delegated }
            }
            Err(e) => {
                warn!(provider = model.provider(), error = %e, "chat model failed, falling back to keyword matching");
                local(context, question, LocalReason::ModelFailed)
            }
        }
    }
}

impl fmt::Debug for AnswerGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerGenerator")
            .field("model", &self.model.as_ref().map(|m| m.provider().to_string()))
            .finish()
    }
}

#[cfg(feature = "openai")]
fn openai_generator(key: ApiKey, base_url: Option<&str>) -> AnswerGenerator {
    match crate::openai::OpenAIChatModel::new(key.expose()) {
        Ok(model) => {
            let model = match base_url.map(str::trim) {
                Some(url) if !url.is_empty() => model.with_base_url(url),
                _ => model,
            };
            info!(base_url = model.base_url(), "using OpenAI chat model");
            AnswerGenerator::with_chat_model(Arc::new(model))
        }
        Err(e) => {
            warn!(error = %e, "failed to configure chat model, using keyword matching");
            AnswerGenerator::local()
        }
    }
}

#[cfg(not(feature = "openai"))]
fn openai_generator(_key: ApiKey, _base_url: Option<&str>) -> AnswerGenerator {
    warn!("built without the `openai` feature, using keyword matching");
    AnswerGenerator::local()
}

fn local(context: &str, question: &str, reason: LocalReason) -> Answer {
    Answer { text: local_answer(context, question), source: AnswerSource::Local { reason } }
}

/// Answer by picking the context sentences that mention the most question
/// keywords.
///
/// Keywords match as substrings of the lower-cased sentence, so `art` also
/// matches `start`. Up to three sentences are returned, best first, followed
/// by [`LOCAL_DISCLAIMER`].
pub fn local_answer(context: &str, question: &str) -> String {
    let keywords = question_keywords(question);

    let mut scored: Vec<(&str, usize)> = split_sentences(context)
        .into_iter()
        .map(|sentence| {
            let lowered = sentence.to_lowercase();
            let score = keywords.iter().filter(|k| lowered.contains(k.as_str())).count();
            (sentence, score)
        })
        .filter(|(_, score)| *score > 0)
        .collect();

    if scored.is_empty() {
        return format!("{NOT_ENOUGH_INFORMATION} {LOCAL_DISCLAIMER}");
    }

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let best: Vec<&str> = scored.into_iter().take(MAX_SENTENCES).map(|(s, _)| s).collect();
    format!("{}\n\n{LOCAL_DISCLAIMER}", best.join(" "))
}
