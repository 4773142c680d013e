//! Configuration for the question-answering pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Chat models the delegated strategy may call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ModelName {
    /// `gpt-3.5-turbo`
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    /// `gpt-4`
    #[serde(rename = "gpt-4")]
    Gpt4,
    /// `gpt-4-turbo`
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl ModelName {
    /// All supported models, in the order they are offered to users.
    pub const ALL: [ModelName; 3] = [ModelName::Gpt35Turbo, ModelName::Gpt4, ModelName::Gpt4Turbo];

    /// The identifier sent to the chat completions API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt35Turbo => "gpt-3.5-turbo",
            ModelName::Gpt4 => "gpt-4",
            ModelName::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self> {
        ModelName::ALL.into_iter().find(|m| m.as_str() == s).ok_or_else(|| {
            let known: Vec<&str> = ModelName::ALL.iter().map(ModelName::as_str).collect();
            RagError::ConfigError(format!("unknown model '{s}' (expected one of: {})", known.join(", ")))
        })
    }
}

/// Configuration parameters for indexing and answering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Maximum number of characters shared by consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Sampling temperature for the delegated strategy, in `[0, 1]`.
    pub temperature: f32,
    /// Chat model used by the delegated strategy.
    pub model: ModelName,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 4,
            temperature: 0.3,
            model: ModelName::default(),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of chunks retrieved per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the chat model.
    pub fn model(mut self, model: ModelName) -> Self {
        self.config.model = model;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size`
    /// - `top_k == 0`
    /// - `temperature` is outside `[0, 1]`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::ConfigError("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::ConfigError(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if !(0.0..=1.0).contains(&self.config.temperature) {
            return Err(RagError::ConfigError(format!(
                "temperature ({}) must be within [0, 1]",
                self.config.temperature
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = RagConfig::builder().build().unwrap();
        assert_eq!(config, RagConfig::default());
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
        assert_eq!(config.top_k, 4);
        assert_eq!(config.model, ModelName::Gpt35Turbo);
    }

    #[test]
    fn rejects_overlap_not_smaller_than_size() {
        let err = RagConfig::builder().chunk_size(100).chunk_overlap(100).build().unwrap_err();
        assert!(matches!(err, RagError::ConfigError(_)));
    }

    #[test]
    fn rejects_zero_top_k_and_bad_temperature() {
        assert!(RagConfig::builder().top_k(0).build().is_err());
        assert!(RagConfig::builder().temperature(1.5).build().is_err());
        assert!(RagConfig::builder().temperature(-0.1).build().is_err());
        assert!(RagConfig::builder().temperature(f32::NAN).build().is_err());
    }

    #[test]
    fn model_names_parse_and_display() {
        for model in ModelName::ALL {
            assert_eq!(model.to_string().parse::<ModelName>().unwrap(), model);
        }
        assert!("gpt-5".parse::<ModelName>().is_err());
        assert_eq!(serde_json::to_string(&ModelName::Gpt4Turbo).unwrap(), "\"gpt-4-turbo\"");
    }
}
