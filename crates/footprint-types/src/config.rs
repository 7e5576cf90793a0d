//! Cluster configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default price bucket size (one pip on a five-digit forex quote).
const DEFAULT_PRICE_LEVEL_SIZE: f64 = 0.0001;

/// Default absolute delta at which a cluster closes.
const DEFAULT_DELTA_THRESHOLD: f64 = 100.0;

/// Rules for bucketing prices and closing clusters.
///
/// A cluster closes on the first tick that brings `|delta|` to or beyond
/// [`delta_threshold`](Self::delta_threshold). When
/// [`tick_threshold`](Self::tick_threshold) is set, a cluster also closes once
/// it has absorbed that many ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Width of one footprint price level. Must be finite and positive.
    pub price_level_size: f64,
    /// Absolute delta that closes a cluster. Values `<= 0` close every
    /// cluster after its first tick.
    pub delta_threshold: f64,
    /// Optional tick count that also closes a cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_threshold: Option<u32>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            price_level_size: DEFAULT_PRICE_LEVEL_SIZE,
            delta_threshold: DEFAULT_DELTA_THRESHOLD,
            tick_threshold: None,
        }
    }
}

impl ClusterConfig {
    /// Creates a new configuration without a tick threshold.
    #[must_use]
    pub const fn new(price_level_size: f64, delta_threshold: f64) -> Self {
        Self {
            price_level_size,
            delta_threshold,
            tick_threshold: None,
        }
    }

    /// Sets the price level size.
    #[must_use]
    pub const fn with_price_level_size(mut self, size: f64) -> Self {
        self.price_level_size = size;
        self
    }

    /// Sets the delta threshold.
    #[must_use]
    pub const fn with_delta_threshold(mut self, threshold: f64) -> Self {
        self.delta_threshold = threshold;
        self
    }

    /// Sets the tick threshold.
    #[must_use]
    pub const fn with_tick_threshold(mut self, ticks: Option<u32>) -> Self {
        self.tick_threshold = ticks;
        self
    }

    /// Checks that the configuration can drive an aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error if the price level size is not a finite positive
    /// number, the delta threshold is not finite, or the tick threshold is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.price_level_size.is_finite() {
            return Err(ConfigError::NonFinitePriceLevelSize);
        }
        if self.price_level_size <= 0.0 {
            return Err(ConfigError::NonPositivePriceLevelSize(self.price_level_size));
        }
        if !self.delta_threshold.is_finite() {
            return Err(ConfigError::NonFiniteDeltaThreshold);
        }
        if self.tick_threshold == Some(0) {
            return Err(ConfigError::ZeroTickThreshold);
        }
        Ok(())
    }

    /// Maps a raw price to the center of its footprint level.
    ///
    /// Rounds half away from zero, so with a level size of `0.0001` a price
    /// of `1.08506` lands on `1.0851`.
    #[must_use]
    pub fn level_price(&self, price: f64) -> f64 {
        (price / self.price_level_size).round() * self.price_level_size
    }

    /// Returns true if a cluster with the given delta and tick count must close.
    #[must_use]
    pub fn should_close(&self, delta: f64, tick_count: u32) -> bool {
        delta.abs() >= self.delta_threshold
            || self.tick_threshold.is_some_and(|limit| tick_count >= limit)
    }

    /// Returns a copy with every field set in `update` replaced.
    #[must_use]
    pub fn merged(&self, update: &ClusterConfigUpdate) -> Self {
        Self {
            price_level_size: update.price_level_size.unwrap_or(self.price_level_size),
            delta_threshold: update.delta_threshold.unwrap_or(self.delta_threshold),
            tick_threshold: update.tick_threshold.unwrap_or(self.tick_threshold),
        }
    }
}

/// Partial configuration; `None` fields leave the current value in place.
///
/// `tick_threshold` is doubly optional: `Some(None)` clears a configured tick
/// threshold, `None` keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfigUpdate {
    /// New price level size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level_size: Option<f64>,
    /// New delta threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_threshold: Option<f64>,
    /// New tick threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_threshold: Option<Option<u32>>,
}

impl ClusterConfigUpdate {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            price_level_size: None,
            delta_threshold: None,
            tick_threshold: None,
        }
    }

    /// Sets the price level size.
    #[must_use]
    pub const fn price_level_size(mut self, size: f64) -> Self {
        self.price_level_size = Some(size);
        self
    }

    /// Sets the delta threshold.
    #[must_use]
    pub const fn delta_threshold(mut self, threshold: f64) -> Self {
        self.delta_threshold = Some(threshold);
        self
    }

    /// Sets or clears the tick threshold.
    #[must_use]
    pub const fn tick_threshold(mut self, ticks: Option<u32>) -> Self {
        self.tick_threshold = Some(ticks);
        self
    }

    /// Returns true if the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price_level_size.is_none()
            && self.delta_threshold.is_none()
            && self.tick_threshold.is_none()
    }

    /// Stacks `over` on top of `self`; fields set in `over` win.
    #[must_use]
    pub fn layer(self, over: Self) -> Self {
        Self {
            price_level_size: over.price_level_size.or(self.price_level_size),
            delta_threshold: over.delta_threshold.or(self.delta_threshold),
            tick_threshold: over.tick_threshold.or(self.tick_threshold),
        }
    }
}

/// Invalid cluster configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Price level size is zero or negative.
    #[error("price level size must be positive, got {0}")]
    NonPositivePriceLevelSize(f64),

    /// Price level size is NaN or infinite.
    #[error("price level size must be finite")]
    NonFinitePriceLevelSize,

    /// Delta threshold is NaN or infinite.
    #[error("delta threshold must be finite")]
    NonFiniteDeltaThreshold,

    /// Tick threshold is zero.
    #[error("tick threshold must be at least 1")]
    ZeroTickThreshold,
}
