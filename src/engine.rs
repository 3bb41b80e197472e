//! Search engine records.

use serde::{Deserialize, Serialize};

/// A single search engine.
///
/// Engines are immutable after load: the registry reorders and
/// enables/disables them but never edits the records themselves.
/// `short_name` is the identity key joining in-memory state to
/// persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    /// Unique display name, e.g. "DuckDuckGo".
    pub short_name: String,

    /// Search URL with a `{query}` placeholder.
    pub search_template: String,

    /// Optional suggestion endpoint, same placeholder convention.
    #[serde(default)]
    pub suggest_template: Option<String>,
}

impl SearchEngine {
    /// Create an engine with no suggestion endpoint.
    pub fn new(short_name: impl Into<String>, search_template: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            search_template: search_template.into(),
            suggest_template: None,
        }
    }

    /// Builder-style setter for the suggestion template.
    pub fn with_suggest_template(mut self, template: impl Into<String>) -> Self {
        self.suggest_template = Some(template.into());
        self
    }

    /// Build the search URL for a user query.
    pub fn search_url_for(&self, query: &str) -> String {
        resolve_template(&self.search_template, query)
    }

    /// Build the suggestion URL for a partial query, if this engine
    /// supports suggestions.
    pub fn suggest_url_for(&self, query: &str) -> Option<String> {
        self.suggest_template
            .as_deref()
            .map(|t| resolve_template(t, query))
    }
}

fn resolve_template(template: &str, query: &str) -> String {
    template.replace("{query}", &urlencoding::encode(query))
}
