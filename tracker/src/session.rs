//! Tracking sessions
//!
//! `Tracker::start` validates the request, then spawns one task per session:
//!
//! ```text
//! Running ──(interval)──> poll provider ──(Some)──> observe ──> on_report ──> Running
//!    │                          │
//!    │                        (None) ──> Stopped(ProviderFailure)
//!    └──(cancel / handle dropped)──────> Stopped(Cancelled)
//! ```
//!
//! The first poll fires one full interval after start. Cancellation is checked both
//! while waiting for the next tick and while a provider call is in flight.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::logger::{TraceId, child_span, session_span};
use engine::Signal;
use market::{AssetSnapshot, MarketDataProvider};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{Instrument, debug, error, info};

use crate::errors::TrackerError;
use crate::state::{TrackingState, TrendReport};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Why a session ended. Both states are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The provider had no data for the asset. Not retried.
    ProviderFailure,
    /// The caller cancelled or dropped the handle.
    Cancelled,
}

/// What to track and from which reference point.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackRequest {
    pub asset_id: String,
    pub entry_point: f64,
    /// Seeds the previous-price comparison for the first poll.
    pub initial_price: f64,
}

impl TrackRequest {
    pub fn new(asset_id: impl Into<String>, entry_point: f64, initial_price: f64) -> Self {
        Self {
            asset_id: asset_id.into(),
            entry_point,
            initial_price,
        }
    }

    /// Track the asset a signal was derived from, using the signal's entry point.
    pub fn from_signal(signal: &Signal, snapshot: &AssetSnapshot) -> Self {
        Self::new(signal.asset_id.clone(), signal.entry_point, snapshot.price())
    }
}

pub struct Tracker<P> {
    provider: Arc<P>,
    interval: Duration,
}

impl<P: MarketDataProvider> Tracker<P> {
    pub fn new(provider: Arc<P>, interval: Duration) -> Self {
        Self { provider, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a session on the current tokio runtime.
    ///
    /// `on_report` runs once per successful poll, `on_stop` exactly once when the
    /// session ends. An invalid entry point or a zero interval is rejected before
    /// anything is spawned.
    pub fn start<R, S>(
        &self,
        request: TrackRequest,
        on_report: R,
        on_stop: S,
    ) -> Result<TrackingHandle, TrackerError>
    where
        R: FnMut(TrendReport) + Send + 'static,
        S: FnOnce(StopReason) + Send + 'static,
    {
        if self.interval.is_zero() {
            return Err(TrackerError::InvalidInterval(self.interval));
        }

        let state =
            TrackingState::new(request.asset_id, request.entry_point, request.initial_price)?;

        let trace_id = TraceId::default();
        let span = session_span(state.asset_id(), &trace_id);
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let provider = Arc::clone(&self.provider);
        let every = self.interval;

        let task = tokio::spawn(
            async move {
                let reason = run_session(provider, state, every, cancel_rx, on_report).await;
                on_stop(reason);
                reason
            }
            .instrument(span),
        );

        Ok(TrackingHandle {
            trace_id,
            cancel_tx,
            task,
        })
    }
}

/// Owned by the caller of [`Tracker::start`]. Dropping it cancels the session.
pub struct TrackingHandle {
    trace_id: TraceId,
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<StopReason>,
}

impl TrackingHandle {
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Ask the session to stop. Idempotent; has no effect once the session ended.
    pub fn cancel(&self) {
        // Err only means the session already exited.
        let _ = self.cancel_tx.send(true);
    }

    /// Wait for the session to end and return why it did.
    pub async fn stopped(self) -> StopReason {
        let TrackingHandle { cancel_tx, task, .. } = self;

        let outcome = task.await;
        drop(cancel_tx);

        match outcome {
            Ok(reason) => reason,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => StopReason::Cancelled,
        }
    }
}

async fn run_session<P, R>(
    provider: Arc<P>,
    mut state: TrackingState,
    every: Duration,
    mut cancel_rx: watch::Receiver<bool>,
    mut on_report: R,
) -> StopReason
where
    P: MarketDataProvider,
    R: FnMut(TrendReport),
{
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        entry_point = state.entry_point(),
        every_ms = every.as_millis() as u64,
        "tracking session started"
    );

    loop {
        tokio::select! {
            biased;
            _ = cancelled(&mut cancel_rx) => return stop(StopReason::Cancelled),
            _ = ticker.tick() => {}
        }

        let fetched = tokio::select! {
            biased;
            _ = cancelled(&mut cancel_rx) => return stop(StopReason::Cancelled),
            s = provider.asset_by_id(state.asset_id()).instrument(child_span("poll")) => s,
        };

        let Some(snapshot) = fetched else {
            error!(
                asset_id = state.asset_id(),
                "no data from provider, ending session without retry"
            );
            return stop(StopReason::ProviderFailure);
        };

        let report = state.observe(&snapshot, Utc::now());

        debug!(
            price = report.current_price,
            price_diff = report.price_diff,
            diff_percent = report.diff_percent,
            trend = ?report.trend,
            situation = ?report.situation,
            consider_closing = report.consider_closing,
            "trend report"
        );

        on_report(report);
    }
}

/// Resolves once cancellation was requested or every sender is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        let requested = *rx.borrow_and_update();
        if requested || rx.changed().await.is_err() {
            return;
        }
    }
}

fn stop(reason: StopReason) -> StopReason {
    info!(?reason, "tracking session stopped");
    reason
}
