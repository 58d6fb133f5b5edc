use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::errors::MarketError;
use crate::provider::SnapshotSource;
use crate::types::AssetSnapshot;

use super::types::{CoinDetail, MarketRow};

const VS_CURRENCY: &str = "usd";

#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    url: String,
}

impl CoinGeckoClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, MarketError> {
        let http = Client::builder()
            .user_agent(concat!("crypto-signals/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Top `limit` assets by market cap, descending. Rows that fail validation are
    /// dropped with a warning; the rest of the page survives.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_markets(&self, limit: usize) -> Result<Vec<AssetSnapshot>, MarketError> {
        let url = format!("{}/coins/markets", self.url);
        let per_page = limit.to_string();

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("vs_currency", VS_CURRENCY),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "1h,24h"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let rows: Vec<MarketRow> = resp.json().await?;
        let fetched = rows.len();

        let snapshots: Vec<AssetSnapshot> = rows
            .into_iter()
            .filter_map(|row| match AssetSnapshot::try_from(row) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(error = %e, "dropping malformed market row");
                    None
                }
            })
            .collect();

        debug!(fetched, kept = snapshots.len(), "coingecko markets fetched");

        Ok(snapshots)
    }

    #[instrument(skip(self), fields(coin_id = %id), level = "debug")]
    pub async fn fetch_coin(&self, id: &str) -> Result<AssetSnapshot, MarketError> {
        let url = format!("{}/coins/{}", self.url, id);

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("localization", "false"),
                ("tickers", "false"),
                ("community_data", "false"),
                ("developer_data", "false"),
            ])
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketError::DataUnavailable(format!("unknown coin {id}")));
        }

        let detail: CoinDetail = resp.error_for_status()?.json().await?;
        let snapshot = AssetSnapshot::try_from(detail)?;

        debug!(price = snapshot.price(), "coingecko coin fetched");

        Ok(snapshot)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for CoinGeckoClient {
    async fn top_assets(&self, limit: usize) -> Result<Vec<AssetSnapshot>, MarketError> {
        self.fetch_markets(limit).await
    }

    async fn asset(&self, id: &str) -> Result<AssetSnapshot, MarketError> {
        self.fetch_coin(id).await
    }
}
