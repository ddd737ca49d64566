//! Preparation and settlement audit for multi-hop vault batch swaps.
//!
//! A solved route flows through [`services::limits`] (slippage bounds),
//! [`services::encode`] (vault argument layout) and, around submission,
//! [`services::audit`] (balance deltas and the final report).

pub mod config;
pub mod models;
pub mod services;

pub use models::route::{AdapterAssets, Hop, Route, SwapDirection};
pub use services::error::{SwapError, SwapErrorKind};
