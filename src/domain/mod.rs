//! Pure domain types with minimal dependencies
//!
//! Types here have no framework dependencies (cosmic, iced, etc.)
//! so they can be shared by the state machine, the store and the widgets.

pub mod geometry;
pub mod measurement;

pub use geometry::*;
pub use measurement::*;
