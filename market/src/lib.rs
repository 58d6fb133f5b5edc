//! Market data for the signal engine.
//!
//! The [`provider::MarketDataProvider`] trait is the fail-soft boundary the rest of the
//! workspace talks to. Fallible sources such as [`coingecko::CoinGeckoClient`] sit behind
//! [`provider::MarketSnapshotProvider`], which turns their errors into "no data" and
//! appends pinned assets to every listing.

pub mod coingecko;
pub mod errors;
pub mod provider;
pub mod types;

pub use errors::MarketError;
pub use provider::{MarketDataProvider, MarketSnapshotProvider, SnapshotSource};
pub use types::AssetSnapshot;
