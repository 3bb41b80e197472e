//! The fixed catalog of available engines.
//!
//! The catalog is read-only input to the registry: it supplies the full
//! engine set and the configured startup default. The registry never adds
//! or removes engines during a session; catalog changes surface on the
//! next construction.

use once_cell::sync::Lazy;

use crate::engine::SearchEngine;

/// Startup default for the shipped catalog.
pub const DEFAULT_ENGINE_NAME: &str = "Google";

static SHIPPED_ENGINES: Lazy<Vec<SearchEngine>> = Lazy::new(|| {
    vec![
        SearchEngine::new(
            "Amazon.com",
            "https://www.amazon.com/s?k={query}",
        ),
        SearchEngine::new("Bing", "https://www.bing.com/search?q={query}")
            .with_suggest_template("https://www.bing.com/osjson.aspx?query={query}"),
        SearchEngine::new("DuckDuckGo", "https://duckduckgo.com/?q={query}")
            .with_suggest_template("https://ac.duckduckgo.com/ac/?q={query}&type=list"),
        SearchEngine::new("Google", "https://www.google.com/search?q={query}")
            .with_suggest_template(
                "https://www.google.com/complete/search?client=firefox&q={query}",
            ),
        SearchEngine::new("Twitter", "https://twitter.com/search?q={query}"),
        SearchEngine::new(
            "Wikipedia",
            "https://en.wikipedia.org/wiki/Special:Search?search={query}",
        ),
        SearchEngine::new("Yahoo", "https://search.yahoo.com/search?p={query}")
            .with_suggest_template(
                "https://search.yahoo.com/sugg/ff?output=fxjson&command={query}",
            ),
    ]
});

/// The engine set handed to the registry at construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Available engines, in catalog order.
    pub engines: Vec<SearchEngine>,
    /// Identity of the configured startup default.
    pub default_engine: String,
}

impl Catalog {
    /// Build a catalog from an explicit engine list and default.
    pub fn new(engines: Vec<SearchEngine>, default_engine: impl Into<String>) -> Self {
        Self {
            engines,
            default_engine: default_engine.into(),
        }
    }

    /// The stock engine set bundled with the crate.
    pub fn shipped() -> Self {
        Self::new(SHIPPED_ENGINES.clone(), DEFAULT_ENGINE_NAME)
    }
}
