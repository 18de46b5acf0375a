//! Measurement history
//!
//! This module contains:
//! - The durable, capped measurement store
//! - The trend view model used by the history table and chart

pub mod store;
pub mod trend;

pub use store::HistoryStore;
pub use trend::{PointSelection, TrendView};
