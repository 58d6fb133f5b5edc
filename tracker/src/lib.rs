//! Price tracking sessions.
//!
//! A session re-polls one asset on a fixed interval and reports how far the price has
//! drifted from the signal's entry point. Each session owns its [`TrackingState`];
//! sessions never share mutable state, so any number may run side by side.

pub mod errors;
pub mod session;
pub mod state;

pub use errors::TrackerError;
pub use session::{DEFAULT_POLL_INTERVAL, StopReason, TrackRequest, Tracker, TrackingHandle};
pub use state::{Situation, Trend, TrackingState, TrendReport};
