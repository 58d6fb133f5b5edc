use serde::Deserialize;

use crate::errors::MarketError;
use crate::types::AssetSnapshot;

/// One row of `GET /coins/markets`.
#[derive(Debug, Deserialize)]
pub struct MarketRow {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub current_price: Option<f64>,

    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
}

impl TryFrom<MarketRow> for AssetSnapshot {
    type Error = MarketError;

    fn try_from(row: MarketRow) -> Result<Self, Self::Error> {
        let Some(symbol) = row.symbol else {
            return Err(MarketError::malformed(row.id, "missing symbol"));
        };

        AssetSnapshot::new(
            row.id,
            symbol,
            row.current_price,
            row.price_change_percentage_1h_in_currency,
            row.price_change_percentage_24h_in_currency,
        )
    }
}

/// Envelope of `GET /coins/{id}`. Only the fields the snapshot needs are kept.
#[derive(Debug, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub market_data: Option<MarketData>,
}

#[derive(Debug, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: CurrencyValue,

    #[serde(default)]
    pub price_change_percentage_1h_in_currency: CurrencyValue,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: CurrencyValue,
}

/// Per-currency map. CoinGecko sends `{}` when a window has no data.
#[derive(Debug, Default, Deserialize)]
pub struct CurrencyValue {
    #[serde(default)]
    pub usd: Option<f64>,
}

impl TryFrom<CoinDetail> for AssetSnapshot {
    type Error = MarketError;

    fn try_from(detail: CoinDetail) -> Result<Self, Self::Error> {
        let Some(md) = detail.market_data else {
            return Err(MarketError::malformed(detail.id, "missing market_data"));
        };

        AssetSnapshot::new(
            detail.id,
            detail.symbol,
            md.current_price.usd,
            md.price_change_percentage_1h_in_currency.usd,
            md.price_change_percentage_24h_in_currency.usd,
        )
    }
}
