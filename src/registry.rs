//! The engine registry.
//!
//! [`EngineRegistry`] owns the ordered engine list, derives the default
//! engine from position 0, tracks enablement, and writes every change
//! through to its [`PreferenceStore`] before returning. A freshly
//! constructed registry over the same store observes identical state.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::engine::SearchEngine;
use crate::error::{RegistryError, RegistryResult};
use crate::prefs::PreferenceStore;

// Persisted key names. Stable across versions; renaming either one
// orphans existing user state.
const ORDERED_ENGINES_KEY: &str = "search.orderedEngineNames";
const DISABLED_ENGINES_KEY: &str = "search.disabledEngineNames";
const SUGGESTIONS_ENABLED_KEY: &str = "search.suggestionsEnabled";

/// Registry of available search engines and their user preferences.
///
/// The engine at position 0 of the order is the default engine; the
/// default is derived from the order, never stored separately. The
/// default engine can never be disabled: operations that would disable
/// it either re-enable it or ignore the request.
///
/// Enablement is persisted as a *disabled* set, so engines added to the
/// catalog in a later version start out enabled.
pub struct EngineRegistry {
    prefs: Box<dyn PreferenceStore>,
    /// Current order; `engines[0]` is the default. Always a permutation
    /// of the catalog.
    engines: Vec<SearchEngine>,
    /// Identities currently disabled. Subset of the engine set; never
    /// contains the default.
    disabled: HashSet<String>,
    suggestions_enabled: bool,
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.engines)
            .field("disabled", &self.disabled)
            .field("suggestions_enabled", &self.suggestions_enabled)
            .finish_non_exhaustive()
    }
}

impl EngineRegistry {
    /// Build a registry from a catalog, restoring any persisted order
    /// and enablement from `prefs`.
    ///
    /// A persisted order is filtered to engines still in the catalog;
    /// catalog engines missing from it are appended in catalog order, so
    /// new engines surface without losing the user's arrangement. With
    /// no persisted order, the catalog order is used with the configured
    /// default moved to the front.
    pub fn new(prefs: Box<dyn PreferenceStore>, catalog: Catalog) -> RegistryResult<Self> {
        if catalog.engines.is_empty() {
            return Err(RegistryError::InvalidOrder(
                "catalog contains no engines".to_string(),
            ));
        }

        let engines = load_order(prefs.as_ref(), &catalog)?;

        let mut disabled = prefs
            .get_string_set(DISABLED_ENGINES_KEY)?
            .unwrap_or_default();
        // Drop entries for engines that have left the catalog, and force
        // the default enabled in case a catalog change moved a disabled
        // engine into position 0.
        disabled.retain(|name| engines.iter().any(|e| &e.short_name == name));
        disabled.remove(&engines[0].short_name);

        let suggestions_enabled = prefs.get_bool(SUGGESTIONS_ENABLED_KEY)?.unwrap_or(true);

        Ok(Self {
            prefs,
            engines,
            disabled,
            suggestions_enabled,
        })
    }

    /// All engines, in display order.
    pub fn ordered_engines(&self) -> &[SearchEngine] {
        &self.engines
    }

    /// Look up an engine by identity.
    pub fn engine(&self, short_name: &str) -> Option<&SearchEngine> {
        self.engines.iter().find(|e| e.short_name == short_name)
    }

    /// The default engine: always the first in order.
    pub fn default_engine(&self) -> &SearchEngine {
        &self.engines[0]
    }

    /// Whether `short_name` is the current default.
    pub fn is_engine_default(&self, short_name: &str) -> bool {
        self.engines[0].short_name == short_name
    }

    /// Whether `short_name` is known and currently enabled.
    pub fn is_engine_enabled(&self, short_name: &str) -> bool {
        self.engine(short_name).is_some() && !self.disabled.contains(short_name)
    }

    /// Enabled engines, in display order.
    pub fn enabled_engines(&self) -> Vec<&SearchEngine> {
        self.engines
            .iter()
            .filter(|e| !self.disabled.contains(&e.short_name))
            .collect()
    }

    /// Replace the engine order.
    ///
    /// `new_order` must be an exact permutation of the current engine
    /// set; anything else is rejected before any state changes. Because
    /// the default is derived from position 0, reordering can change the
    /// default engine; the new first engine is enabled unconditionally.
    pub fn set_ordered_engines(&mut self, new_order: Vec<SearchEngine>) -> RegistryResult<()> {
        if new_order.len() != self.engines.len() {
            return Err(RegistryError::InvalidOrder(format!(
                "expected {} engines, got {}",
                self.engines.len(),
                new_order.len()
            )));
        }

        let current: HashSet<&str> = self.engines.iter().map(|e| e.short_name.as_str()).collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(new_order.len());
        for engine in &new_order {
            if !current.contains(engine.short_name.as_str()) {
                return Err(RegistryError::InvalidOrder(format!(
                    "engine not in catalog: {}",
                    engine.short_name
                )));
            }
            if !seen.insert(engine.short_name.as_str()) {
                return Err(RegistryError::InvalidOrder(format!(
                    "duplicate engine: {}",
                    engine.short_name
                )));
            }
        }

        self.engines = new_order;
        let was_disabled = self.disabled.remove(&self.engines[0].short_name);

        self.persist_order()?;
        if was_disabled {
            self.persist_disabled()?;
        }
        Ok(())
    }

    /// Make `short_name` the default engine.
    ///
    /// Moves it to position 0, preserving the relative order of the
    /// others, and enables it.
    pub fn set_default_engine(&mut self, short_name: &str) -> RegistryResult<()> {
        let pos = self
            .engines
            .iter()
            .position(|e| e.short_name == short_name)
            .ok_or_else(|| RegistryError::UnknownEngine {
                name: short_name.to_string(),
            })?;

        let engine = self.engines.remove(pos);
        self.engines.insert(0, engine);
        let was_disabled = self.disabled.remove(short_name);

        self.persist_order()?;
        if was_disabled {
            self.persist_disabled()?;
        }
        Ok(())
    }

    /// Enable an engine.
    pub fn enable_engine(&mut self, short_name: &str) -> RegistryResult<()> {
        self.require_known(short_name)?;
        if self.disabled.remove(short_name) {
            self.persist_disabled()?;
        }
        Ok(())
    }

    /// Disable an engine.
    ///
    /// Disabling the current default is a no-op, not an error: the
    /// settings UI treats "you can't disable the default engine" as a
    /// routine interaction, not a failure.
    pub fn disable_engine(&mut self, short_name: &str) -> RegistryResult<()> {
        self.require_known(short_name)?;
        if self.is_engine_default(short_name) {
            return Ok(());
        }
        if self.disabled.insert(short_name.to_string()) {
            self.persist_disabled()?;
        }
        Ok(())
    }

    /// Whether suggestion queries may be issued.
    pub fn suggestions_enabled(&self) -> bool {
        self.suggestions_enabled
    }

    /// Set and persist the suggestions preference.
    pub fn set_suggestions_enabled(&mut self, enabled: bool) -> RegistryResult<()> {
        self.suggestions_enabled = enabled;
        self.prefs.set_bool(SUGGESTIONS_ENABLED_KEY, enabled)
    }

    fn require_known(&self, short_name: &str) -> RegistryResult<()> {
        if self.engine(short_name).is_some() {
            Ok(())
        } else {
            Err(RegistryError::UnknownEngine {
                name: short_name.to_string(),
            })
        }
    }

    fn persist_order(&mut self) -> RegistryResult<()> {
        let names: Vec<String> = self
            .engines
            .iter()
            .map(|e| e.short_name.clone())
            .collect();
        self.prefs.set_string_list(ORDERED_ENGINES_KEY, &names)
    }

    fn persist_disabled(&mut self) -> RegistryResult<()> {
        self.prefs
            .set_string_set(DISABLED_ENGINES_KEY, &self.disabled)
    }
}

fn load_order(
    prefs: &dyn PreferenceStore,
    catalog: &Catalog,
) -> RegistryResult<Vec<SearchEngine>> {
    let Some(persisted) = prefs.get_string_list(ORDERED_ENGINES_KEY)? else {
        // First run: catalog order with the configured default first.
        let mut ordered = catalog.engines.clone();
        if let Some(pos) = ordered
            .iter()
            .position(|e| e.short_name == catalog.default_engine)
        {
            let default = ordered.remove(pos);
            ordered.insert(0, default);
        }
        return Ok(ordered);
    };

    let mut ordered = Vec::with_capacity(catalog.engines.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(catalog.engines.len());
    for name in &persisted {
        if seen.contains(name.as_str()) {
            continue;
        }
        if let Some(engine) = catalog.engines.iter().find(|e| &e.short_name == name) {
            seen.insert(name.as_str());
            ordered.push(engine.clone());
        }
    }
    for engine in &catalog.engines {
        if !seen.contains(engine.short_name.as_str()) {
            ordered.push(engine.clone());
        }
    }
    Ok(ordered)
}
