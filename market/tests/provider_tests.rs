use common::config::PinnedAsset;
use tokio::test;

use market::{MarketDataProvider, MarketSnapshotProvider};

use mock_source::{InMemorySource, snap};

fn default_pins() -> Vec<PinnedAsset> {
    vec![
        PinnedAsset::new("trump", "official-trump"),
        PinnedAsset::new("zerebro", "zerebro"),
    ]
}

#[test]
async fn missing_pinned_assets_are_appended_in_order() {
    let mut source = InMemorySource::with_listing(vec![
        snap("bitcoin", "btc", 64_000.0),
        snap("ethereum", "eth", 3_100.0),
    ]);
    source.insert(snap("official-trump", "trump", 9.1));
    source.insert(snap("zerebro", "zerebro", 0.03));

    let provider = MarketSnapshotProvider::new(source, default_pins());
    let assets = provider.list_top_assets(30).await;

    let ids: Vec<&str> = assets.iter().map(|a| a.id()).collect();
    assert_eq!(ids, ["bitcoin", "ethereum", "official-trump", "zerebro"]);
}

#[test]
async fn pinned_symbol_match_is_case_insensitive() {
    // Listed as "TRUMP": must count as present and not be fetched again.
    let mut source = InMemorySource::with_listing(vec![
        snap("bitcoin", "btc", 64_000.0),
        snap("official-trump", "TRUMP", 9.1),
    ]);
    source.insert(snap("zerebro", "zerebro", 0.03));

    let provider = MarketSnapshotProvider::new(source, default_pins());
    let assets = provider.list_top_assets(30).await;

    assert_eq!(assets.len(), 3);
    assert_eq!(assets.iter().filter(|a| a.has_symbol("trump")).count(), 1);
    assert_eq!(provider.source().lookups(), vec!["zerebro".to_string()]);
}

#[test]
async fn unavailable_pinned_asset_is_skipped() {
    let mut source = InMemorySource::with_listing(vec![snap("bitcoin", "btc", 64_000.0)]);
    source.insert(snap("zerebro", "zerebro", 0.03));

    let provider = MarketSnapshotProvider::new(source, default_pins());
    let assets = provider.list_top_assets(30).await;

    let ids: Vec<&str> = assets.iter().map(|a| a.id()).collect();
    assert_eq!(ids, ["bitcoin", "zerebro"]);
}

#[test]
async fn failed_listing_yields_empty_and_skips_pins() {
    let mut source = InMemorySource::default();
    source.insert(snap("official-trump", "trump", 9.1));

    let provider = MarketSnapshotProvider::new(source, default_pins());
    let assets = provider.list_top_assets(30).await;

    assert!(assets.is_empty());
    assert!(provider.source().lookups().is_empty());
}

#[test]
async fn limit_is_forwarded_to_the_source() {
    let source = InMemorySource::with_listing(vec![
        snap("bitcoin", "btc", 64_000.0),
        snap("ethereum", "eth", 3_100.0),
        snap("tether", "usdt", 1.0),
    ]);

    let provider = MarketSnapshotProvider::new(source, Vec::new());
    let assets = provider.list_top_assets(2).await;

    assert_eq!(assets.len(), 2);
    assert_eq!(assets[1].id(), "ethereum");
}

#[test]
async fn asset_by_id_fails_soft() {
    let mut source = InMemorySource::default();
    source.insert(snap("solana", "sol", 150.0));

    let provider = MarketSnapshotProvider::new(source, Vec::new());

    assert_eq!(
        provider.asset_by_id("solana").await.map(|s| s.price()),
        Some(150.0)
    );
    assert!(provider.asset_by_id("nope").await.is_none());
}
