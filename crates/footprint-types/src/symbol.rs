//! Symbol presets.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ClusterConfig;

/// Symbol category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Foreign exchange currency pairs.
    Forex,
    /// Cryptocurrencies.
    Crypto,
    /// Stock indices.
    Index,
    /// Commodities (metals, energy).
    Commodity,
}

impl Category {
    /// Returns the category as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Index => "index",
            Self::Commodity => "commodity",
        }
    }

    /// Returns all categories.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Forex, Self::Crypto, Self::Index, Self::Commodity]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forex" | "fx" => Ok(Self::Forex),
            "crypto" => Ok(Self::Crypto),
            "index" | "indices" => Ok(Self::Index),
            "commodity" | "commodities" | "metal" => Ok(Self::Commodity),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid category string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(String);

impl std::fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category '{}', expected one of: forex, crypto, index, commodity",
            self.0
        )
    }
}

impl std::error::Error for CategoryParseError {}

/// Preset for a tradable symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    /// Unique identifier (e.g., "eurusd", "xauusd").
    id: String,
    /// Human-readable name (e.g., "EUR/USD").
    name: String,
    /// Symbol category.
    category: Category,
    /// Quote precision in decimal places.
    digits: u32,
    /// Default footprint level width.
    price_level_size: f64,
    /// Default delta that closes a cluster.
    delta_threshold: f64,
    /// Typical volume of a single tick on this symbol.
    base_volume: f64,
}

impl SymbolSpec {
    /// Creates a new symbol preset.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        digits: u32,
        price_level_size: f64,
        delta_threshold: f64,
        base_volume: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            digits,
            price_level_size,
            delta_threshold,
            base_volume,
        }
    }

    /// Returns the symbol identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the quote precision in decimal places.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Returns the default footprint level width.
    #[must_use]
    pub const fn price_level_size(&self) -> f64 {
        self.price_level_size
    }

    /// Returns the default delta threshold.
    #[must_use]
    pub const fn delta_threshold(&self) -> f64 {
        self.delta_threshold
    }

    /// Returns the typical single-tick volume.
    #[must_use]
    pub const fn base_volume(&self) -> f64 {
        self.base_volume
    }

    /// Returns the smallest price increment implied by `digits`.
    #[must_use]
    pub fn point(&self) -> f64 {
        10f64.powi(-(self.digits as i32))
    }

    /// Returns the default cluster configuration for this symbol.
    #[must_use]
    pub const fn cluster_config(&self) -> ClusterConfig {
        ClusterConfig::new(self.price_level_size, self.delta_threshold)
    }

    /// Formats a price with the symbol's precision.
    #[must_use]
    pub fn format_price(&self, price: f64) -> String {
        format!("{:.*}", self.digits as usize, price)
    }
}

impl std::fmt::Display for SymbolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
