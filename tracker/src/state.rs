use chrono::{DateTime, Utc};
use engine::rounding::round_dp;
use market::AssetSnapshot;
use serde::Serialize;

use crate::errors::TrackerError;

/// Direction of the latest price relative to the previous poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Read from the freshly fetched 24h change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Situation {
    Improving,
    Worsening,
}

/// One poll's worth of tracking output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendReport {
    pub asset_id: String,
    pub observed_at: DateTime<Utc>,

    pub current_price: f64,

    /// `current - entry`, 2 fractional digits.
    pub price_diff: f64,
    /// `price_diff / entry * 100`, 2 fractional digits.
    pub diff_percent: f64,

    pub trend: Trend,
    pub situation: Situation,

    /// Set when the position is under water. Informational only.
    pub consider_closing: bool,
}

/// Session-scoped tracking state.
///
/// `entry_point` is fixed at construction; `previous_price` moves with every
/// observation and is only ever written by [`TrackingState::observe`].
#[derive(Clone, Debug)]
pub struct TrackingState {
    asset_id: String,
    entry_point: f64,
    previous_price: f64,
}

impl TrackingState {
    /// `initial_price` is the snapshot price the signal was derived from.
    pub fn new(
        asset_id: impl Into<String>,
        entry_point: f64,
        initial_price: f64,
    ) -> Result<Self, TrackerError> {
        if !entry_point.is_finite() || entry_point <= 0.0 {
            return Err(TrackerError::InvalidEntryPoint(entry_point));
        }

        Ok(Self {
            asset_id: asset_id.into(),
            entry_point,
            previous_price: initial_price,
        })
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn entry_point(&self) -> f64 {
        self.entry_point
    }

    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    /// Compare a fresh snapshot against the entry point and the previous poll,
    /// then remember its price for the next comparison.
    pub fn observe(&mut self, snapshot: &AssetSnapshot, observed_at: DateTime<Utc>) -> TrendReport {
        let current = snapshot.price();

        let price_diff = round_dp(current - self.entry_point, 2);
        let diff_percent = round_dp(price_diff / self.entry_point * 100.0, 2);

        let trend = if current > self.previous_price {
            Trend::Up
        } else if current < self.previous_price {
            Trend::Down
        } else {
            Trend::Flat
        };

        let situation = if snapshot.change_24h_pct() > 0.0 {
            Situation::Improving
        } else {
            Situation::Worsening
        };

        self.previous_price = current;

        TrendReport {
            asset_id: self.asset_id.clone(),
            observed_at,
            current_price: current,
            price_diff,
            diff_percent,
            trend,
            situation,
            consider_closing: price_diff < 0.0,
        }
    }
}
