//! searchprefs - search engine registry and preference store.
//!
//! Manages the set of search engines available to an application: their
//! display order, which one is the default, and which are enabled, with
//! every change persisted through an abstract preference backend so
//! state survives restarts.
//!
//! # Architecture
//!
//! - [`engine`] - The immutable engine record and search-URL building
//! - [`catalog`] - The fixed engine set supplied at construction
//! - [`prefs`] - The [`PreferenceStore`] capability and its backends
//! - [`registry`] - [`EngineRegistry`], the mutable core
//!
//! The default engine is derived, not stored: it is whatever engine is
//! first in the order. That makes "the default is a known engine" and
//! "the default is in the order" true by construction.
//!
//! # Example
//!
//! ```
//! use searchprefs::{Catalog, EngineRegistry, MemoryPrefs};
//!
//! let mut registry =
//!     EngineRegistry::new(Box::new(MemoryPrefs::new()), Catalog::shipped()).unwrap();
//!
//! registry.set_default_engine("DuckDuckGo").unwrap();
//! assert!(registry.is_engine_default("DuckDuckGo"));
//!
//! let url = registry.default_engine().search_url_for("rust");
//! assert_eq!(url, "https://duckduckgo.com/?q=rust");
//! ```

pub mod catalog;
pub mod engine;
pub mod prefs;
pub mod registry;

mod error;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use engine::SearchEngine;
pub use error::{RegistryError, RegistryResult};
pub use prefs::{FilePrefs, MemoryPrefs, PreferenceStore};
pub use registry::EngineRegistry;
