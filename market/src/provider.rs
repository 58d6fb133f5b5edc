use async_trait::async_trait;
use common::config::PinnedAsset;
use tracing::{debug, info, warn};

use crate::errors::MarketError;
use crate::types::AssetSnapshot;

/// Fallible access to a market data backend (HTTP API, fixture, ...).
#[async_trait]
pub trait SnapshotSource: Send + Sync + 'static {
    /// Top `limit` assets ordered by market cap, descending.
    async fn top_assets(&self, limit: usize) -> Result<Vec<AssetSnapshot>, MarketError>;

    /// Resolve a single asset by provider id.
    async fn asset(&self, id: &str) -> Result<AssetSnapshot, MarketError>;
}

/// What the engine, tracker and front ends consume.
///
/// Both calls fail soft: an empty listing or `None` means "no data" and the
/// caller decides whether that is fatal.
#[async_trait]
pub trait MarketDataProvider: Send + Sync + 'static {
    async fn list_top_assets(&self, limit: usize) -> Vec<AssetSnapshot>;

    async fn asset_by_id(&self, id: &str) -> Option<AssetSnapshot>;
}

/// Wraps a [`SnapshotSource`]:
/// - converts source errors into "no data" (logged, never propagated)
/// - appends pinned assets missing from a listing
pub struct MarketSnapshotProvider<S> {
    source: S,
    pinned: Vec<PinnedAsset>,
}

impl<S: SnapshotSource> MarketSnapshotProvider<S> {
    pub fn new(source: S, pinned: Vec<PinnedAsset>) -> Self {
        Self { source, pinned }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch each pinned asset whose symbol is absent from `assets` and append it.
    /// A pinned asset that cannot be fetched is skipped.
    async fn append_pinned(&self, assets: &mut Vec<AssetSnapshot>) {
        for pin in &self.pinned {
            if assets.iter().any(|a| a.has_symbol(&pin.symbol)) {
                continue;
            }

            match self.source.asset(&pin.id).await {
                Ok(snapshot) => {
                    debug!(symbol = %pin.symbol, id = %pin.id, "appending pinned asset");
                    assets.push(snapshot);
                }
                Err(e) => {
                    warn!(error = %e, id = %pin.id, "pinned asset unavailable, skipping");
                }
            }
        }
    }
}

#[async_trait]
impl<S: SnapshotSource> MarketDataProvider for MarketSnapshotProvider<S> {
    async fn list_top_assets(&self, limit: usize) -> Vec<AssetSnapshot> {
        let mut assets = match self.source.top_assets(limit).await {
            Ok(assets) => assets,
            Err(e) => {
                warn!(error = %e, limit, "asset listing unavailable");
                return Vec::new();
            }
        };

        self.append_pinned(&mut assets).await;

        info!(count = assets.len(), limit, "asset listing ready");
        assets
    }

    async fn asset_by_id(&self, id: &str) -> Option<AssetSnapshot> {
        match self.source.asset(id).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, id, "asset snapshot unavailable");
                None
            }
        }
    }
}
