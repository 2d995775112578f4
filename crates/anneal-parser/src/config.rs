//! Parser configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for a single parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting of structures and parenthesized expressions
    pub max_depth: usize,
    /// Whether composite nodes keep the source text they matched
    pub record_source_text: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            record_source_text: true,
        }
    }
}

impl ParserConfig {
    /// Shallow nesting limit for untrusted input
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            record_source_text: true,
        }
    }

    /// Skip recording source text on composite nodes
    pub fn compact() -> Self {
        Self {
            record_source_text: false,
            ..Self::default()
        }
    }

    /// Check that the configuration can drive a parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(self.max_depth));
        }
        Ok(())
    }
}

/// Rejected parser configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A nesting limit of zero admits no program at all
    #[error("max_depth must be at least 1, got {0}")]
    InvalidMaxDepth(usize),
}
