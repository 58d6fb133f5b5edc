//! Rule-based signal derivation.
//!
//! [`derive_signal`] maps one validated [`market::AssetSnapshot`] to a [`Signal`].
//! It performs no I/O and keeps no state: the same snapshot always yields the same signal.

pub mod rounding;
pub mod signal;

pub use signal::{
    CONFIDENCE_CEIL, CONFIDENCE_FLOOR, Direction, Extremum, Momentum, PROFIT_THRESHOLD,
    Prediction, Profitability, Signal, derive_signal,
};
