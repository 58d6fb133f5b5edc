mod derive;

use std::fmt;

use serde::Serialize;

pub use derive::{CONFIDENCE_CEIL, CONFIDENCE_FLOOR, PROFIT_THRESHOLD, derive_signal};

/// Short-term agreement between the 1h and 24h moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Momentum {
    /// Both windows are up.
    Bullish,
    /// Both windows are down.
    Bearish,
    /// Windows disagree, or at least one is flat.
    Mixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    Buy,
    Sell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Prediction {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Profitability {
    /// Predicted absolute move is strictly above the profit threshold.
    HighChance,
    Low,
}

/// The one price bound reported for a signal, on the side of the dominant probability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Extremum {
    MaxUp(f64),
    MaxDown(f64),
}

impl Extremum {
    pub fn price(&self) -> f64 {
        match *self {
            Extremum::MaxUp(p) | Extremum::MaxDown(p) => p,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Extremum::MaxUp(_) => "Max Up",
            Extremum::MaxDown(_) => "Max Down",
        }
    }
}

/// Everything derived from one snapshot. Built once by [`derive_signal`], never updated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Signal {
    /// Upper-cased ticker.
    pub symbol: String,
    pub asset_id: String,

    pub direction: Direction,
    pub momentum: Momentum,
    pub prediction: Prediction,
    pub profitability: Profitability,

    /// Price at signal time, 4 fractional digits. Reference point for tracking.
    pub entry_point: f64,

    /// Percent in `[10, 95]`, 2 fractional digits.
    pub confidence: f64,

    /// `price * change_24h / 100`, 2 fractional digits. Signed.
    pub predicted_move: f64,

    /// Whole percents; `up_probability + down_probability == 100`.
    pub up_probability: u8,
    pub down_probability: u8,

    pub extremum: Extremum,
}

impl fmt::Display for Momentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Momentum::Bullish => "Bullish",
            Momentum::Bearish => "Bearish",
            Momentum::Mixed => "Mixed",
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Buy => "Buy (Long)",
            Direction::Sell => "Sell (Short)",
        })
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Prediction::Up => "Likely to go up",
            Prediction::Down => "May go down",
        })
    }
}

impl fmt::Display for Profitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Profitability::HighChance => "High chance of profit",
            Profitability::Low => "Profit < $5",
        })
    }
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Prediction: ${}", self.label(), self.price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market::AssetSnapshot;

    #[test]
    fn serializes_with_externally_tagged_extremum() {
        let snap = AssetSnapshot::new("bitcoin", "btc", Some(100.0), Some(2.0), Some(5.0)).unwrap();
        let json = serde_json::to_value(derive_signal(&snap)).unwrap();

        assert_eq!(json["symbol"], "BTC");
        assert_eq!(json["direction"], "Buy");
        assert_eq!(json["extremum"]["MaxUp"], 105.0);
        assert_eq!(json["up_probability"], 65);
    }

    #[test]
    fn labels_render_for_humans() {
        assert_eq!(Direction::Sell.to_string(), "Sell (Short)");
        assert_eq!(Profitability::Low.to_string(), "Profit < $5");
        assert_eq!(
            Extremum::MaxDown(48.5).to_string(),
            "Max Down Prediction: $48.5"
        );
        assert_eq!(Extremum::MaxUp(105.0).price(), 105.0);
    }
}
