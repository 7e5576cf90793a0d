//! Footprint cluster data structure.

use chrono::{DateTime, TimeDelta, Utc};
use footprint_types::{Side, Tick};
use serde::{Deserialize, Serialize};

use crate::PriceLevel;
use crate::level;

/// A delta-bounded footprint candle.
///
/// OHLC prices are raw tick prices. The footprint in
/// [`price_levels`](Self::price_levels) is keyed by discretized price and
/// ordered by price descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Sequence number, starting at 1 for each aggregator session.
    pub id: u64,
    /// Symbol of the first tick.
    pub symbol: String,
    /// Price of the first tick.
    pub open: f64,
    /// Highest tick price.
    pub high: f64,
    /// Lowest tick price.
    pub low: f64,
    /// Price of the latest tick.
    pub close: f64,
    /// Buyer-initiated volume.
    pub volume_buy: f64,
    /// Seller-initiated volume.
    pub volume_sell: f64,
    /// Total volume.
    pub volume_total: f64,
    /// Volume traded inside the open/close range.
    pub body_volume: f64,
    /// Volume traded outside the open/close range.
    pub wick_volume: f64,
    /// `body_volume / volume_total`.
    pub body_volume_ratio: f64,
    /// Buy minus sell volume.
    pub delta: f64,
    /// Point of control.
    pub poc: f64,
    /// Volume by discretized price, highest price first.
    pub price_levels: Vec<PriceLevel>,
    /// Number of ticks absorbed.
    pub tick_count: u32,
    /// Time of the first tick.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    /// Time of the latest tick after the first.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end_time: Option<DateTime<Utc>>,
    /// Whether the cluster is finished.
    pub is_closed: bool,
}

impl Cluster {
    /// Opens a cluster from its first tick.
    pub(crate) fn open(id: u64, tick: &Tick, volume: f64, level_price: f64) -> Self {
        let (volume_buy, volume_sell) = match tick.side {
            Side::Buy => (volume, 0.0),
            Side::Sell => (0.0, volume),
        };

        let mut first_level = PriceLevel::new(level_price);
        first_level.add(tick.side, volume);

        Self {
            id,
            symbol: tick.symbol.clone(),
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            volume_buy,
            volume_sell,
            volume_total: volume,
            body_volume: volume,
            wick_volume: 0.0,
            body_volume_ratio: 1.0,
            delta: volume_buy - volume_sell,
            poc: tick.price,
            price_levels: vec![first_level],
            tick_count: 1,
            start_time: tick.timestamp,
            end_time: None,
            is_closed: false,
        }
    }

    /// Folds a subsequent tick into the cluster.
    ///
    /// Body/wick classification uses the raw tick price against the
    /// open/close range as it stood before this tick moved `close`.
    pub(crate) fn apply(&mut self, tick: &Tick, volume: f64, level_price: f64) {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);

        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.close = tick.price;
        self.tick_count = self.tick_count.saturating_add(1);
        self.end_time = Some(tick.timestamp);

        match tick.side {
            Side::Buy => self.volume_buy += volume,
            Side::Sell => self.volume_sell += volume,
        }
        self.volume_total = self.volume_buy + self.volume_sell;
        self.delta = self.volume_buy - self.volume_sell;

        if (body_low..=body_high).contains(&tick.price) {
            self.body_volume += volume;
        } else {
            self.wick_volume += volume;
        }
        self.body_volume_ratio = if self.volume_total > 0.0 {
            self.body_volume / self.volume_total
        } else {
            0.0
        };

        level::upsert(&mut self.price_levels, level_price).add(tick.side, volume);

        if let Some(poc) = level::point_of_control(&self.price_levels) {
            // level centers can sit up to half a level outside the traded range
            self.poc = poc.price.max(self.low).min(self.high);
        }
    }

    /// Marks the cluster as finished.
    pub(crate) const fn close(&mut self) {
        self.is_closed = true;
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if the cluster closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the cluster closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the time between the first and latest tick.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_time
            .map_or_else(TimeDelta::zero, |end| end - self.start_time)
    }

    /// Returns `wick_volume / volume_total`.
    #[must_use]
    pub fn wick_volume_ratio(&self) -> f64 {
        if self.volume_total > 0.0 {
            self.wick_volume / self.volume_total
        } else {
            0.0
        }
    }

    /// Returns the footprint level at a discretized price.
    #[must_use]
    pub fn level(&self, price: f64) -> Option<&PriceLevel> {
        level::find(&self.price_levels, price)
    }

    /// Returns the footprint level holding the point of control.
    #[must_use]
    pub fn poc_level(&self) -> Option<&PriceLevel> {
        level::point_of_control(&self.price_levels)
    }
}
