//! Custom widgets and window layout

pub mod annotation_canvas;
pub mod trend_chart;
pub mod workspace;
