//! Rendering module
//!
//! This module contains:
//! - Drawing constants shared between the annotation canvas and the chart
//! - Trend chart rasterization using tiny-skia

pub mod chart;
pub mod geometry;
