use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use market::{AssetSnapshot, MarketDataProvider};

/// Replays a fixed script of poll results. Once the script runs out every
/// lookup returns `None`, like a provider that went offline.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Option<AssetSnapshot>>>,
    pub calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Option<AssetSnapshot>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    async fn list_top_assets(&self, _limit: usize) -> Vec<AssetSnapshot> {
        Vec::new()
    }

    async fn asset_by_id(&self, _id: &str) -> Option<AssetSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop_front().flatten()
    }
}

pub fn snap(id: &str, price: f64, c24h: f64) -> Option<AssetSnapshot> {
    Some(AssetSnapshot::new(id, id, Some(price), Some(0.1), Some(c24h)).unwrap())
}
