//! # Settings
//!
//! The explicit configuration value handed to collaborator constructors.
//! The core never reads environment variables, files or any other
//! ambient state; the caller builds this value (or parses it from a
//! string it loaded itself) and passes it in.

use crate::types::{Iri, ScribeError};
use serde::{Deserialize, Serialize};

/// Process configuration, all optional. Collaborator implementations
/// decide which fields they require.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API key for the news feed collaborator.
    pub news_api_key: Option<String>,

    /// API key for the text-understanding collaborator.
    pub reconciler_api_key: Option<String>,

    /// Publishing container the per-document items are created under.
    pub container: Option<String>,

    /// Base IRI for deterministic per-paper graph names.
    pub paper_graph_base: Option<String>,
}

impl Settings {
    /// Parse settings from a TOML document the caller already loaded.
    pub fn from_toml_str(input: &str) -> Result<Self, ScribeError> {
        toml::from_str(input).map_err(|e| ScribeError::Validation(e.to_string()))
    }

    /// The publishing container as an IRI, if configured.
    #[must_use]
    pub fn container_iri(&self) -> Option<Iri> {
        self.container.as_deref().map(Iri::new)
    }
}

// =============================================================================
// TESTS
// =============================================================================
