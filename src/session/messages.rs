//! Message types for a measuring session
//!
//! This module contains the Msg enum with nested sub-enums for organized
//! message handling.

use std::path::PathBuf;

use crate::capture::image::PhotoImage;

// ============================================================================
// Drawing Action Types
// ============================================================================

/// Pointer action on the photo, in native image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawAction {
    /// Start drawing at position
    Start(f32, f32),
    /// Pointer moved while drawing
    Move(f32, f32),
    /// End drawing at position
    End(f32, f32),
}

/// All drawing/annotation messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawMsg {
    /// Drag on the rectangle for the current step
    Drag(DrawAction),
    /// Discard the pile rectangle and draw it again
    RedrawPile,
}

// ============================================================================
// Photo Types
// ============================================================================

/// Photo loading messages
#[derive(Debug, Clone)]
pub enum PhotoMsg {
    /// Show the file dialog
    Open,
    /// File dialog closed, `None` when cancelled
    Picked(Option<PathBuf>),
    /// Decoding finished
    Loaded(Result<PhotoImage, String>),
}

// ============================================================================
// Measurement Types
// ============================================================================

/// Reference input and calculation messages
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureMsg {
    /// Reference height text changed
    ReferenceInput(String),
    /// Calculate button pressed
    Calculate,
    /// Thinking delay elapsed, carrying the estimate in centimeters
    Reveal(f64),
}

// ============================================================================
// Trend Types
// ============================================================================

/// Trend chart messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendMsg {
    /// Chart clicked; index of the nearest point, `None` if there are none
    SelectPoint(Option<usize>),
}

/// Top-level message for the measuring window
#[derive(Debug, Clone)]
pub enum Msg {
    Draw(DrawMsg),
    Photo(PhotoMsg),
    Measure(MeasureMsg),
    Trend(TrendMsg),
}

impl From<PhotoMsg> for Msg {
    fn from(msg: PhotoMsg) -> Self {
        Msg::Photo(msg)
    }
}

impl From<MeasureMsg> for Msg {
    fn from(msg: MeasureMsg) -> Self {
        Msg::Measure(msg)
    }
}
