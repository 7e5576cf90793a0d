//! Symbol preset registry for the footprint order-flow cluster engine.
//!
//! This crate provides per-symbol defaults for cluster aggregation: how wide
//! a footprint level is and how much delta closes a cluster.
//!
//! # Example
//!
//! ```
//! use footprint_symbols::SymbolRegistry;
//!
//! let registry = SymbolRegistry::global();
//!
//! if let Some(symbol) = registry.get("EURUSD") {
//!     let config = symbol.cluster_config();
//!     println!("{}: level size {}", symbol.name(), config.price_level_size);
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/footprint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use footprint_types::{Category, ClusterConfig, FootprintError, Result, SymbolSpec};

/// The symbol preset JSON embedded at compile time.
const SYMBOLS_JSON: &str = include_str!("../data/symbols.json");

/// Global registry instance.
static REGISTRY: OnceLock<SymbolRegistry> = OnceLock::new();

/// Registry of symbol presets keyed by lowercase id.
#[derive(Debug)]
pub struct SymbolRegistry {
    symbols: HashMap<String, SymbolSpec>,
}

impl SymbolRegistry {
    /// Returns the global symbol registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads presets from the embedded JSON data.
    fn load() -> Self {
        Self::from_json(SYMBOLS_JSON).expect("Invalid symbols.json")
    }

    /// Builds a registry from a JSON object of `id -> preset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe symbol presets.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, SymbolSpec> = serde_json::from_str(json)?;
        let symbols = raw
            .into_iter()
            .map(|(id, spec)| (id.to_lowercase(), spec))
            .collect();
        Ok(Self { symbols })
    }

    /// Looks up a symbol by ID (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SymbolSpec> {
        self.symbols.get(&id.to_lowercase())
    }

    /// Looks up a symbol by ID, failing if it is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`FootprintError::UnknownSymbol`] if no preset exists.
    pub fn require(&self, id: &str) -> Result<&SymbolSpec> {
        self.get(id)
            .ok_or_else(|| FootprintError::UnknownSymbol(id.to_string()))
    }

    /// Returns the preset cluster configuration for a symbol, or the
    /// library default when the symbol is unknown.
    #[must_use]
    pub fn cluster_config_for(&self, id: &str) -> ClusterConfig {
        self.get(id)
            .map_or_else(ClusterConfig::default, SymbolSpec::cluster_config)
    }

    /// Returns all symbols as an iterator.
    pub fn all(&self) -> impl Iterator<Item = &SymbolSpec> {
        self.symbols.values()
    }

    /// Returns the total number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns symbols matching the given category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &SymbolSpec> {
        self.symbols
            .values()
            .filter(move |s| s.category() == category)
    }

    /// Searches symbols by name or ID pattern (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&SymbolSpec> {
        let pattern = pattern.to_lowercase();
        self.symbols
            .values()
            .filter(|s| {
                s.id().to_lowercase().contains(&pattern)
                    || s.name().to_lowercase().contains(&pattern)
            })
            .collect()
    }

    /// Returns all symbol IDs sorted alphabetically.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        ids.sort();
        ids
    }
}
