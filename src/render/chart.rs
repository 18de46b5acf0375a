//! Trend chart rasterization using tiny-skia
//!
//! The chart is drawn from scratch into a new image every time the history
//! changes; nothing is patched incrementally.

use image::RgbaImage;
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::chart;

/// Placement of the series inside the chart image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub margin: f32,
    /// Value mapped to the top of the plot area; the baseline is always zero
    pub y_max: f64,
}

impl ChartLayout {
    /// Layout sized for `heights`, with the y axis starting at zero
    pub fn for_series(heights: &[f64], width: u32, height: u32) -> Self {
        let tallest = heights.iter().copied().fold(0.0_f64, f64::max);
        Self {
            width,
            height,
            margin: chart::MARGIN,
            y_max: nice_ceiling(tallest * chart::HEADROOM),
        }
    }

    fn plot_width(&self) -> f32 {
        (self.width as f32 - 2.0 * self.margin).max(1.0)
    }

    fn plot_height(&self) -> f32 {
        (self.height as f32 - 2.0 * self.margin).max(1.0)
    }

    /// Pixel y of the zero baseline
    pub fn baseline(&self) -> f32 {
        self.height as f32 - self.margin
    }

    /// Pixel x of point `index` out of `count`
    pub fn point_x(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            self.margin + self.plot_width() / 2.0
        } else {
            self.margin + self.plot_width() * index as f32 / (count - 1) as f32
        }
    }

    /// Pixel y of a value
    pub fn point_y(&self, value: f64) -> f32 {
        let t = (value / self.y_max).clamp(0.0, 1.0) as f32;
        self.baseline() - t * self.plot_height()
    }

    /// Pixel positions of every point in the series
    pub fn points(&self, heights: &[f64]) -> Vec<(f32, f32)> {
        heights
            .iter()
            .enumerate()
            .map(|(i, h)| (self.point_x(i, heights.len()), self.point_y(*h)))
            .collect()
    }

    /// Index of the point horizontally nearest to `x`
    pub fn nearest_index(&self, x: f32, count: usize) -> Option<usize> {
        (0..count).min_by(|a, b| {
            let da = (self.point_x(*a, count) - x).abs();
            let db = (self.point_x(*b, count) - x).abs();
            da.total_cmp(&db)
        })
    }
}

/// Round up to 1, 2 or 5 times a power of ten
fn nice_ceiling(value: f64) -> f64 {
    if !(value.is_finite() && value > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Render the series as a filled line chart with point markers
///
/// Returns `None` if the pixmap cannot be allocated.
pub fn render_chart(heights: &[f64], layout: &ChartLayout) -> Option<RgbaImage> {
    let mut pixmap = Pixmap::new(layout.width, layout.height)?;
    pixmap.fill(Color::WHITE);

    draw_grid(&mut pixmap, layout);

    let points = layout.points(heights);
    let [r, g, b] = chart::SERIES_RGB;

    // Area under the series
    if points.len() > 1 {
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, layout.baseline());
        for (x, y) in &points {
            pb.line_to(*x, *y);
        }
        pb.line_to(points[points.len() - 1].0, layout.baseline());
        pb.close();
        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, chart::FILL_ALPHA);
            paint.anti_alias = true;
            pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    // Series line
    if points.len() > 1 {
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for (x, y) in &points[1..] {
            pb.line_to(*x, *y);
        }
        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, 255);
            paint.anti_alias = true;
            let stroke = Stroke {
                width: chart::LINE_WIDTH,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    // Point markers
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    for (x, y) in &points {
        if let Some(circle) = PathBuilder::from_circle(*x, *y, chart::POINT_RADIUS) {
            pixmap.fill_path(
                &circle,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    // Opaque background, so premultiplied data equals straight RGBA
    RgbaImage::from_raw(layout.width, layout.height, pixmap.take())
}

fn draw_grid(pixmap: &mut Pixmap, layout: &ChartLayout) {
    let left = layout.margin;
    let right = layout.width as f32 - layout.margin;

    let mut pb = PathBuilder::new();
    for i in 1..=chart::GRID_LINES {
        let value = layout.y_max * f64::from(i) / f64::from(chart::GRID_LINES);
        let y = layout.point_y(value);
        pb.move_to(left, y);
        pb.line_to(right, y);
    }
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(220, 220, 220, 255);
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    // Axes
    let mut pb = PathBuilder::new();
    pb.move_to(left, layout.margin);
    pb.line_to(left, layout.baseline());
    pb.line_to(right, layout.baseline());
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(120, 120, 120, 255);
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(heights: &[f64]) -> ChartLayout {
        ChartLayout::for_series(heights, 220, 120)
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(3.0), 5.0);
        assert_eq!(nice_ceiling(11.0), 20.0);
        assert_eq!(nice_ceiling(55.0), 100.0);
        assert_eq!(nice_ceiling(100.0), 100.0);
    }

    #[test]
    fn test_y_axis_starts_at_zero() {
        let layout = layout(&[10.0, 40.0]);
        assert_eq!(layout.point_y(0.0), layout.baseline());
        assert!(layout.point_y(40.0) < layout.point_y(10.0));
        assert!(layout.point_y(layout.y_max) >= layout.margin - 0.001);
    }

    #[test]
    fn test_points_are_spread_left_to_right() {
        let heights = [1.0, 2.0, 3.0];
        let layout = layout(&heights);
        let points = layout.points(&heights);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0, layout.margin);
        assert_eq!(points[2].0, 220.0 - layout.margin);
        assert!(points[0].0 < points[1].0 && points[1].0 < points[2].0);
    }

    #[test]
    fn test_single_point_is_centered() {
        let layout = layout(&[5.0]);
        assert_eq!(layout.point_x(0, 1), 110.0);
    }

    #[test]
    fn test_nearest_index() {
        let heights = [1.0, 2.0, 3.0];
        let layout = layout(&heights);
        assert_eq!(layout.nearest_index(0.0, 3), Some(0));
        assert_eq!(layout.nearest_index(112.0, 3), Some(1));
        assert_eq!(layout.nearest_index(500.0, 3), Some(2));
        assert_eq!(layout.nearest_index(50.0, 0), None);
    }

    #[test]
    fn test_render_chart_size_and_marker() {
        let heights = [10.0, 20.0];
        let layout = layout(&heights);
        let img = render_chart(&heights, &layout).unwrap();
        assert_eq!(img.dimensions(), (220, 120));

        let (x, y) = layout.points(&heights)[1];
        let pixel = img.get_pixel(x.round() as u32, y.round() as u32);
        assert!(pixel[2] > 200 && pixel[0] < 60, "marker pixel was {pixel:?}");
    }

    #[test]
    fn test_render_empty_series() {
        let layout = layout(&[]);
        let img = render_chart(&[], &layout).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }
}
