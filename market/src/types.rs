use serde::Serialize;

use crate::errors::MarketError;

/// A single point-in-time read of one asset.
///
/// Only constructible through [`AssetSnapshot::new`], which enforces:
/// - `price` is present, finite and strictly positive
/// - percentage changes are finite when present; absent changes become `0.0`
///
/// Snapshots are never mutated; a fresh fetch produces a fresh value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetSnapshot {
    id: String,
    symbol: String,
    price: f64,
    change_1h_pct: f64,
    change_24h_pct: f64,
}

impl AssetSnapshot {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        price: Option<f64>,
        change_1h_pct: Option<f64>,
        change_24h_pct: Option<f64>,
    ) -> Result<Self, MarketError> {
        let id = id.into();
        let symbol = symbol.into();

        if id.trim().is_empty() {
            return Err(MarketError::malformed("<unknown>", "empty asset id"));
        }

        let price = match price {
            None => return Err(MarketError::malformed(id, "missing price")),
            Some(p) if !p.is_finite() => {
                return Err(MarketError::malformed(id, format!("non-numeric price {p}")));
            }
            Some(p) if p <= 0.0 => {
                return Err(MarketError::malformed(id, format!("non-positive price {p}")));
            }
            Some(p) => p,
        };

        let change_1h_pct = finite_or_zero(&id, "1h change", change_1h_pct)?;
        let change_24h_pct = finite_or_zero(&id, "24h change", change_24h_pct)?;

        Ok(Self {
            id,
            symbol,
            price,
            change_1h_pct,
            change_24h_pct,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Percentage change over the last hour, `0.0` when the source had none.
    pub fn change_1h_pct(&self) -> f64 {
        self.change_1h_pct
    }

    /// Percentage change over the last 24 hours, `0.0` when the source had none.
    pub fn change_24h_pct(&self) -> f64 {
        self.change_24h_pct
    }

    /// Case-insensitive symbol comparison.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }
}

fn finite_or_zero(id: &str, field: &str, value: Option<f64>) -> Result<f64, MarketError> {
    match value {
        None => Ok(0.0),
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(MarketError::malformed(id, format!("non-numeric {field} {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_changes_default_to_zero() {
        let s = AssetSnapshot::new("bitcoin", "btc", Some(64_000.0), None, None).unwrap();

        assert_eq!(s.change_1h_pct(), 0.0);
        assert_eq!(s.change_24h_pct(), 0.0);
        assert_eq!(s.price(), 64_000.0);
    }

    #[test]
    fn missing_price_is_rejected_not_defaulted() {
        let err = AssetSnapshot::new("bitcoin", "btc", None, Some(1.0), Some(2.0)).unwrap_err();

        assert!(matches!(err, MarketError::MalformedSnapshot { ref id, .. } if id == "bitcoin"));
    }

    #[test]
    fn non_positive_or_nan_price_is_rejected() {
        assert!(AssetSnapshot::new("a", "a", Some(0.0), None, None).is_err());
        assert!(AssetSnapshot::new("a", "a", Some(-1.0), None, None).is_err());
        assert!(AssetSnapshot::new("a", "a", Some(f64::NAN), None, None).is_err());
        assert!(AssetSnapshot::new("a", "a", Some(f64::INFINITY), None, None).is_err());
    }

    #[test]
    fn non_finite_change_is_rejected() {
        let err = AssetSnapshot::new("eth", "eth", Some(3_000.0), Some(f64::NAN), None);
        assert!(err.is_err());
    }

    #[test]
    fn symbol_match_ignores_case() {
        let s = AssetSnapshot::new("official-trump", "TRUMP", Some(9.5), None, None).unwrap();
        assert!(s.has_symbol("trump"));
        assert!(!s.has_symbol("trumpet"));
    }
}
