//! Human-readable output for the terminal front end.

use engine::{Extremum, Signal};
use market::AssetSnapshot;
use tracker::{Situation, StopReason, Trend, TrendReport};

pub(crate) fn asset_line(index: usize, asset: &AssetSnapshot) -> String {
    format!(
        "{}. {} - ${}",
        index + 1,
        asset.symbol().to_uppercase(),
        asset.price()
    )
}

pub(crate) fn signal_block(signal: &Signal) -> String {
    let extremum = match signal.extremum {
        Extremum::MaxUp(_) => format!("🔼 {}", signal.extremum),
        Extremum::MaxDown(_) => format!("🔽 {}", signal.extremum),
    };

    [
        "🔔 Signal Generated:".to_string(),
        format!("Symbol: {}", signal.symbol),
        format!("Direction: {}", signal.direction),
        format!("Entry Point: ${}", signal.entry_point),
        format!("Confidence: {}%", signal.confidence),
        format!("Momentum: {}", signal.momentum),
        format!("Prediction: {}", signal.prediction),
        format!(
            "Profitability: {} (predicted move ${})",
            signal.profitability, signal.predicted_move
        ),
        format!("Probability of Price Going Up: {}%", signal.up_probability),
        format!("Probability of Price Going Down: {}%", signal.down_probability),
        extremum,
    ]
    .join("\n")
}

pub(crate) fn report_block(report: &TrendReport) -> String {
    let trend = match report.trend {
        Trend::Up => "🟢 up",
        Trend::Down => "🔴 down",
        Trend::Flat => "📍 flat",
    };

    let situation = match report.situation {
        Situation::Improving => "✅ Situation is improving.",
        Situation::Worsening => "❌ Situation is worsening.",
    };

    let mut lines = vec![
        format!("⏱️ Update at {}", report.observed_at.format("%H:%M:%S")),
        format!("Current Price: ${}", report.current_price),
        format!(
            "Change from Entry: ${} ({}%)",
            report.price_diff, report.diff_percent
        ),
        format!("Price Trend: {trend}"),
        situation.to_string(),
    ];

    if report.consider_closing {
        lines.push("⚠️ Price is below entry, consider closing your position.".to_string());
    }

    lines.join("\n")
}

pub(crate) fn stop_line(reason: StopReason) -> &'static str {
    match reason {
        StopReason::ProviderFailure => "❌ Error fetching live coin data, tracking stopped.",
        StopReason::Cancelled => "⏹️ Tracking stopped.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker::TrackingState;

    fn report(entry: f64, price: f64, c24h: f64) -> TrendReport {
        let snap = AssetSnapshot::new("bitcoin", "btc", Some(price), None, Some(c24h)).unwrap();
        let mut st = TrackingState::new("bitcoin", entry, entry).unwrap();
        st.observe(&snap, Default::default())
    }

    #[test]
    fn asset_line_is_numbered_from_one() {
        let a = AssetSnapshot::new("bitcoin", "btc", Some(64_000.5), None, None).unwrap();
        assert_eq!(asset_line(0, &a), "1. BTC - $64000.5");
    }

    #[test]
    fn signal_block_shows_single_extremum() {
        let snap = AssetSnapshot::new("bitcoin", "btc", Some(100.0), Some(2.0), Some(5.0)).unwrap();
        let text = signal_block(&engine::derive_signal(&snap));

        assert!(text.contains("Direction: Buy (Long)"));
        assert!(text.contains("Probability of Price Going Up: 65%"));
        assert!(text.contains("Max Up Prediction: $105"));
        assert!(!text.contains("Max Down"));
    }

    #[test]
    fn losing_report_suggests_closing() {
        let text = report_block(&report(100.0, 95.0, -2.0));

        assert!(text.contains("Change from Entry: $-5 (-5%)"));
        assert!(text.contains("worsening"));
        assert!(text.contains("consider closing"));
    }

    #[test]
    fn winning_report_has_no_advisory() {
        let text = report_block(&report(100.0, 101.0, 2.0));
        assert!(!text.contains("consider closing"));
        assert!(text.contains("🟢 up"));
    }
}
