use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// An asset that must appear in every listing, even outside the top-N by market cap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedAsset {
    /// Ticker symbol, matched case-insensitively against listing rows.
    pub symbol: String,
    /// Provider identifier used to fetch the asset on its own.
    pub id: String,
}

impl PinnedAsset {
    pub fn new(symbol: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            id: id.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    // =========================
    // Market data provider
    // =========================
    /// Base URL of the CoinGecko v3 API (no trailing slash).
    pub coingecko_base_url: String,

    /// Per-request timeout for the HTTP client.
    ///
    /// A timed out request is treated like any other provider failure:
    /// the listing comes back empty or the tracked asset is "no data".
    pub http_timeout: Duration,

    /// How many assets to request, ordered by market cap.
    pub list_limit: usize,

    /// Assets appended to every listing when the top-N does not already contain them.
    pub pinned_assets: Vec<PinnedAsset>,

    // =========================
    // Tracking
    // =========================
    /// Fixed delay between two polls of a tracked asset.
    pub poll_interval: Duration,

    // =========================
    // Logging
    // =========================
    /// Emit JSON logs instead of the pretty formatter.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            list_limit: 30,
            pinned_assets: default_pinned_assets(),
            poll_interval: Duration::from_secs(60),
            json_logs: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Unset keys keep their
    /// defaults; unparseable ones keep their defaults and log a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let coingecko_base_url = lookup("COINGECKO_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.coingecko_base_url);

        let http_timeout = parse_or(&lookup, "SIGNALS_HTTP_TIMEOUT_SECS", 10u64).max(1);

        let poll_interval = parse_or(&lookup, "SIGNALS_POLL_INTERVAL_SECS", 60u64).max(1);

        let list_limit = parse_or(&lookup, "SIGNALS_LIST_LIMIT", defaults.list_limit).max(1);

        let pinned_assets = match lookup("SIGNALS_PINNED_ASSETS") {
            Some(raw) => parse_pinned_assets(&raw),
            None => defaults.pinned_assets,
        };

        let json_logs = lookup("APP_ENV").is_some_and(|env| env == "production");

        Self {
            coingecko_base_url,
            http_timeout: Duration::from_secs(http_timeout),
            list_limit,
            pinned_assets,
            poll_interval: Duration::from_secs(poll_interval),
            json_logs,
        }
    }
}

fn default_pinned_assets() -> Vec<PinnedAsset> {
    vec![
        PinnedAsset::new("trump", "official-trump"),
        PinnedAsset::new("zerebro", "zerebro"),
    ]
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(key, value = %raw, default = %default, "invalid config value, using default");
            default
        }
    }
}

/// Parses `symbol=id` pairs separated by commas. An empty string disables pinning.
fn parse_pinned_assets(raw: &str) -> Vec<PinnedAsset> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.split_once('=') {
            Some((symbol, id)) if !symbol.trim().is_empty() && !id.trim().is_empty() => {
                Some(PinnedAsset::new(symbol.trim(), id.trim()))
            }
            _ => {
                tracing::warn!(entry, "ignoring malformed pinned asset, expected symbol=id");
                None
            }
        })
        .collect()
}
