//! Footprint price levels.

use footprint_types::Side;
use serde::{Deserialize, Serialize};

/// Traded volume at one discretized price inside a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Level center (a multiple of the price level size).
    pub price: f64,
    /// Buyer-initiated volume.
    pub volume_buy: f64,
    /// Seller-initiated volume.
    pub volume_sell: f64,
    /// Total volume (`volume_buy + volume_sell`).
    pub volume_total: f64,
    /// Buy minus sell volume.
    pub delta: f64,
    /// Number of ticks that landed on this level.
    pub tick_count: u32,
}

impl PriceLevel {
    /// Creates an empty level at the given price.
    #[must_use]
    pub const fn new(price: f64) -> Self {
        Self {
            price,
            volume_buy: 0.0,
            volume_sell: 0.0,
            volume_total: 0.0,
            delta: 0.0,
            tick_count: 0,
        }
    }

    /// Adds a trade of `volume` on `side` to this level.
    pub(crate) fn add(&mut self, side: Side, volume: f64) {
        match side {
            Side::Buy => self.volume_buy += volume,
            Side::Sell => self.volume_sell += volume,
        }
        self.volume_total = self.volume_buy + self.volume_sell;
        self.delta = self.volume_buy - self.volume_sell;
        self.tick_count = self.tick_count.saturating_add(1);
    }

    /// Returns the buy share of this level's volume, in `[0, 1]`.
    #[must_use]
    pub fn imbalance_ratio(&self) -> f64 {
        if self.volume_total > 0.0 {
            self.volume_buy / self.volume_total
        } else {
            0.0
        }
    }
}

/// Returns the level with the greatest total volume.
///
/// `levels` must be ordered by price descending. Ties keep the first level
/// seen, so the highest-priced level wins among equal volumes.
pub(crate) fn point_of_control(levels: &[PriceLevel]) -> Option<&PriceLevel> {
    let mut best: Option<&PriceLevel> = None;
    for level in levels {
        if best.is_none_or(|b| level.volume_total > b.volume_total) {
            best = Some(level);
        }
    }
    best
}

/// Returns the level at `price`, inserting an empty one if needed.
///
/// Keeps `levels` ordered by price descending.
pub(crate) fn upsert(levels: &mut Vec<PriceLevel>, price: f64) -> &mut PriceLevel {
    let index = match levels.binary_search_by(|level| price.total_cmp(&level.price)) {
        Ok(index) => index,
        Err(index) => {
            levels.insert(index, PriceLevel::new(price));
            index
        }
    };
    &mut levels[index]
}

/// Finds the level at exactly `price` in a descending sequence.
pub(crate) fn find(levels: &[PriceLevel], price: f64) -> Option<&PriceLevel> {
    levels
        .binary_search_by(|level| price.total_cmp(&level.price))
        .ok()
        .map(|index| &levels[index])
}
