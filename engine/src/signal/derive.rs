use market::AssetSnapshot;

use super::{Direction, Extremum, Momentum, Prediction, Profitability, Signal};
use crate::rounding::{round_dp, round_percent};

/// Confidence is scaled from the combined absolute move and kept inside these bounds.
pub const CONFIDENCE_FLOOR: f64 = 10.0;
pub const CONFIDENCE_CEIL: f64 = 95.0;
const CONFIDENCE_SCALE: f64 = 1.5;

/// Predicted absolute move (in quote currency) above which a signal counts as profitable.
pub const PROFIT_THRESHOLD: f64 = 5.0;

const UP_PROBABILITY_BASE: f64 = 60.0;
const UP_PROBABILITY_CAP: f64 = 85.0;
/// Up-probability whenever the 24h change is not positive.
const UP_PROBABILITY_BEARISH: f64 = 20.0;

/// Signal derivation
///
/// Scores a snapshot from two inputs only: the 1h and 24h percentage changes.
///
/// ```text
/// momentum       = Bullish if c1h > 0 && c24h > 0, Bearish if both < 0, else Mixed
/// direction      = Buy if c24h > 0 else Sell
/// confidence     = clamp((|c1h| + |c24h|) * 1.5, 10, 95)
/// predicted_move = price * c24h / 100
/// up_prob        = min(60 + c24h, 85) if c24h > 0 else 20
/// down_prob      = 100 - up_prob
/// max_up         = price * (1 + |c24h| / 100)
/// max_down       = price * (1 - |c24h| / 100)
/// ```
///
/// A 24h change of exactly zero counts as bearish for direction and prediction.
/// Only the bound on the strictly dominant probability side is reported;
/// `up_prob > down_prob` selects `max_up`, anything else `max_down`.
///
/// Probabilities are rounded only when written into the signal; the comparison that
/// picks the extremum uses the unrounded values.
pub fn derive_signal(snapshot: &AssetSnapshot) -> Signal {
    let price = snapshot.price();
    let c1h = snapshot.change_1h_pct();
    let c24h = snapshot.change_24h_pct();

    let predicted_move = round_dp(price * (c24h / 100.0), 2);

    let up = up_probability(c24h);
    let down = 100.0 - up;
    let up_probability = round_percent(up);

    Signal {
        symbol: snapshot.symbol().to_uppercase(),
        asset_id: snapshot.id().to_string(),
        direction: direction(c24h),
        momentum: momentum(c1h, c24h),
        prediction: prediction(c24h),
        profitability: profitability(predicted_move),
        entry_point: round_dp(price, 4),
        confidence: confidence(c1h, c24h),
        predicted_move,
        up_probability,
        // Complement of the rounded value; identical to rounding `down` ties-to-even.
        down_probability: 100 - up_probability,
        extremum: extremum(price, c24h, up, down),
    }
}

fn momentum(c1h: f64, c24h: f64) -> Momentum {
    if c1h > 0.0 && c24h > 0.0 {
        Momentum::Bullish
    } else if c1h < 0.0 && c24h < 0.0 {
        Momentum::Bearish
    } else {
        Momentum::Mixed
    }
}

fn direction(c24h: f64) -> Direction {
    if c24h > 0.0 {
        Direction::Buy
    } else {
        Direction::Sell
    }
}

fn prediction(c24h: f64) -> Prediction {
    if c24h > 0.0 {
        Prediction::Up
    } else {
        Prediction::Down
    }
}

fn confidence(c1h: f64, c24h: f64) -> f64 {
    let raw = (c1h.abs() + c24h.abs()) * CONFIDENCE_SCALE;
    round_dp(raw.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL), 2)
}

fn profitability(predicted_move: f64) -> Profitability {
    if predicted_move.abs() > PROFIT_THRESHOLD {
        Profitability::HighChance
    } else {
        Profitability::Low
    }
}

fn up_probability(c24h: f64) -> f64 {
    if c24h > 0.0 {
        (UP_PROBABILITY_BASE + c24h).min(UP_PROBABILITY_CAP)
    } else {
        UP_PROBABILITY_BEARISH
    }
}

fn extremum(price: f64, c24h: f64, up: f64, down: f64) -> Extremum {
    let band = c24h.abs() / 100.0;

    if up > down {
        Extremum::MaxUp(round_dp(price * (1.0 + band), 4))
    } else {
        Extremum::MaxDown(round_dp(price * (1.0 - band), 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: f64, c1h: Option<f64>, c24h: Option<f64>) -> AssetSnapshot {
        AssetSnapshot::new("bitcoin", "btc", Some(price), c1h, c24h).unwrap()
    }

    #[test]
    fn bullish_example_reports_max_up() {
        let s = derive_signal(&snapshot(100.0, Some(2.0), Some(5.0)));

        assert_eq!(s.momentum, Momentum::Bullish);
        assert_eq!(s.direction, Direction::Buy);
        assert_eq!(s.confidence, 10.5);
        assert_eq!(s.predicted_move, 5.0);
        // 5 is not strictly above the threshold
        assert_eq!(s.profitability, Profitability::Low);
        assert_eq!(s.prediction, Prediction::Up);
        assert_eq!(s.up_probability, 65);
        assert_eq!(s.down_probability, 35);
        assert_eq!(s.extremum, Extremum::MaxUp(105.0));
        assert_eq!(s.entry_point, 100.0);
    }

    #[test]
    fn bearish_example_reports_max_down() {
        let s = derive_signal(&snapshot(50.0, Some(-1.0), Some(-3.0)));

        assert_eq!(s.momentum, Momentum::Bearish);
        assert_eq!(s.direction, Direction::Sell);
        assert_eq!(s.confidence, 10.0);
        assert_eq!(s.predicted_move, -1.5);
        assert_eq!(s.profitability, Profitability::Low);
        assert_eq!(s.prediction, Prediction::Down);
        assert_eq!(s.up_probability, 20);
        assert_eq!(s.down_probability, 80);
        assert_eq!(s.extremum, Extremum::MaxDown(48.5));
    }

    #[test]
    fn flat_24h_breaks_downward() {
        let s = derive_signal(&snapshot(10.0, Some(1.0), Some(0.0)));

        assert_eq!(s.direction, Direction::Sell);
        assert_eq!(s.prediction, Prediction::Down);
        assert_eq!(s.momentum, Momentum::Mixed);
        assert_eq!(s.up_probability, 20);
        assert_eq!(s.extremum, Extremum::MaxDown(10.0));
    }

    #[test]
    fn missing_changes_behave_as_zero() {
        let s = derive_signal(&snapshot(42.0, None, None));

        assert_eq!(s.momentum, Momentum::Mixed);
        assert_eq!(s.direction, Direction::Sell);
        assert_eq!(s.confidence, CONFIDENCE_FLOOR);
        assert_eq!(s.predicted_move, 0.0);
    }

    #[test]
    fn confidence_is_capped() {
        let s = derive_signal(&snapshot(1.0, Some(40.0), Some(-30.0)));
        assert_eq!(s.confidence, CONFIDENCE_CEIL);
        assert_eq!(s.momentum, Momentum::Mixed);
    }

    #[test]
    fn up_probability_caps_at_85() {
        let s = derive_signal(&snapshot(1.0, Some(1.0), Some(40.0)));
        assert_eq!(s.up_probability, 85);
        assert_eq!(s.down_probability, 15);
    }

    #[test]
    fn fractional_probability_still_sums_to_100() {
        // 60.5 / 39.5 must not round to 61 / 40
        let s = derive_signal(&snapshot(1.0, Some(0.0), Some(0.5)));
        assert_eq!(s.up_probability, 60);
        assert_eq!(s.down_probability, 40);
    }

    #[test]
    fn large_predicted_move_is_high_chance() {
        let s = derive_signal(&snapshot(64_000.0, Some(-0.2), Some(-1.0)));

        assert_eq!(s.predicted_move, -640.0);
        assert_eq!(s.profitability, Profitability::HighChance);
    }

    #[test]
    fn entry_point_and_bounds_round_to_four_digits() {
        let s = derive_signal(&snapshot(0.123_456_78, Some(0.1), Some(2.0)));

        assert_eq!(s.entry_point, 0.1235);
        assert_eq!(s.extremum, Extremum::MaxUp(0.1259));
    }

    #[test]
    fn confidence_just_below_a_tie_rounds_down() {
        // (11.89 + 6.2) * 1.5 == 27.134999999999998
        let s = derive_signal(&snapshot(100.0, Some(11.89), Some(-6.2)));
        assert_eq!(s.confidence, 27.13);
    }

    #[test]
    fn entry_point_just_above_a_tie_rounds_up() {
        let s = derive_signal(&snapshot(11_873.542_05, Some(1.0), Some(-6.2)));

        assert_eq!(s.entry_point, 11_873.542_1);
        assert_eq!(s.extremum, Extremum::MaxDown(11_137.382_4));
        assert_eq!(s.predicted_move, -736.16);
    }

    #[test]
    fn symbol_is_upper_cased() {
        let s = derive_signal(&snapshot(1.0, None, None));
        assert_eq!(s.symbol, "BTC");
        assert_eq!(s.asset_id, "bitcoin");
    }
}
