//! Shared drawing constants
//!
//! Used by the on-screen annotation canvas (iced quads) and the
//! rasterized trend chart (tiny-skia).

/// Annotation outline constants
pub mod outline {
    /// Stroke thickness of committed and preview rectangles, in logical pixels
    pub const THICKNESS: f32 = 3.0;
    /// Alpha applied to the in-progress preview outline
    pub const PREVIEW_ALPHA: f32 = 0.7;
}

/// Trend chart constants
pub mod chart {
    /// Rasterized chart size in pixels
    pub const WIDTH: u32 = 560;
    pub const HEIGHT: u32 = 240;
    /// Padding between the image border and the plot area
    pub const MARGIN: f32 = 24.0;
    /// Radius of each measurement point
    pub const POINT_RADIUS: f32 = 4.0;
    /// Series line width
    pub const LINE_WIDTH: f32 = 2.0;
    /// Number of horizontal grid lines above the baseline
    pub const GRID_LINES: u32 = 4;
    /// Headroom above the tallest measurement
    pub const HEADROOM: f64 = 1.1;
    /// Series color (RGB)
    pub const SERIES_RGB: [u8; 3] = [0, 0, 255];
    /// Alpha of the area under the series
    pub const FILL_ALPHA: u8 = 26;
}
