//! Trade tick representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Aggressor side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buyer-initiated trade (lifted the offer).
    Buy,
    /// Seller-initiated trade (hit the bid).
    Sell,
}

impl Side {
    /// Returns the side as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns `1.0` for buys and `-1.0` for sells.
    #[must_use]
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Buy => 1.0,
            Self::Sell => -1.0,
        }
    }

    /// Returns true if this is the buy side.
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" | "b" | "bid" | "long" => Ok(Self::Buy),
            "sell" | "s" | "ask" | "short" => Ok(Self::Sell),
            _ => Err(SideParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid side string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideParseError(String);

impl std::fmt::Display for SideParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid side '{}', expected one of: buy, sell", self.0)
    }
}

impl std::error::Error for SideParseError {}

/// A single trade print.
///
/// The serialized form matches the tick payload of the upstream bridge:
/// `timestamp` is epoch milliseconds and `volume_synthetic` is accepted as an
/// alias of `volume`. Extra keys such as `bid`, `ask` or `source` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Instrument symbol (e.g., "EURUSD").
    #[serde(default)]
    pub symbol: String,
    /// Trade price.
    pub price: f64,
    /// Traded volume. Non-positive values are treated as `1` during aggregation.
    #[serde(default, alias = "volume_synthetic")]
    pub volume: f64,
    /// Aggressor side.
    pub side: Side,
    /// Trade time (UTC, millisecond precision).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        volume: f64,
        side: Side,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            volume,
            side,
            timestamp,
        }
    }

    /// Returns the volume used for aggregation.
    ///
    /// Zero, negative and NaN volumes are coerced to `1`.
    #[must_use]
    pub fn effective_volume(&self) -> f64 {
        if self.volume > 0.0 { self.volume } else { 1.0 }
    }

    /// Returns the effective volume signed by side (positive for buys).
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.side.sign() * self.effective_volume()
    }

    /// Returns the timestamp as epoch milliseconds.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap()
    }

    #[test]
    fn test_effective_volume() {
        let tick = Tick::new("EURUSD", 1.1, 3.5, Side::Buy, ts());
        assert_eq!(tick.effective_volume(), 3.5);

        let zero = Tick::new("EURUSD", 1.1, 0.0, Side::Buy, ts());
        assert_eq!(zero.effective_volume(), 1.0);

        let negative = Tick::new("EURUSD", 1.1, -2.0, Side::Sell, ts());
        assert_eq!(negative.effective_volume(), 1.0);

        let nan = Tick::new("EURUSD", 1.1, f64::NAN, Side::Sell, ts());
        assert_eq!(nan.effective_volume(), 1.0);
    }

    #[test]
    fn test_signed_volume() {
        assert_eq!(Tick::new("X", 1.0, 4.0, Side::Buy, ts()).signed_volume(), 4.0);
        assert_eq!(Tick::new("X", 1.0, 4.0, Side::Sell, ts()).signed_volume(), -4.0);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("b".parse::<Side>().unwrap(), Side::Buy);
        assert!("flat".parse::<Side>().is_err());
    }

    #[test]
    fn test_deserialize_bridge_payload() {
        let json = r#"{
            "symbol": "EURUSD",
            "price": 1.08506,
            "bid": 1.08502,
            "ask": 1.0851,
            "volume_synthetic": 5.42,
            "side": "buy",
            "timestamp": 1705321845000,
            "source": "mt5_history"
        }"#;
        let tick: Tick = serde_json::from_str(json).unwrap();

        assert_eq!(tick.symbol, "EURUSD");
        assert_eq!(tick.side, Side::Buy);
        assert!((tick.volume - 5.42).abs() < 1e-10);
        assert_eq!(tick.timestamp, ts());
    }

    #[test]
    fn test_deserialize_missing_volume() {
        let json = r#"{"price": 1.1, "side": "sell", "timestamp": 0}"#;
        let tick: Tick = serde_json::from_str(json).unwrap();

        assert_eq!(tick.volume, 0.0);
        assert_eq!(tick.effective_volume(), 1.0);
        assert!(tick.symbol.is_empty());
    }

    #[test]
    fn test_serialize_millis() {
        let tick = Tick::new("EURUSD", 1.1, 1.0, Side::Sell, ts());
        let json = serde_json::to_string(&tick).unwrap();
        assert!(json.contains("\"timestamp\":1705321845000"));
        assert!(json.contains("\"side\":\"sell\""));
    }
}
