//! Geometric types for annotation rectangles and display mapping
//!
//! Rectangles are stored in native image pixels. The display may show the
//! photo at any size; [`DisplayMapping`] converts between the two spaces.

/// Axis-aligned rectangle in native image pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from origin and extents
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a normalized rectangle from the two corners of a drag gesture
    ///
    /// The origin is the min corner and both extents are non-negative,
    /// whichever direction the pointer travelled.
    pub fn from_drag(start: (f32, f32), end: (f32, f32)) -> Self {
        let (min_x, min_y, max_x, max_y) = normalize_rect(start.0, start.1, end.0, end.1);
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Scale both origin and extents per axis
    pub fn scale(&self, sx: f32, sy: f32) -> Rect {
        Rect {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }

    /// Translate the rectangle by the given offset
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Relationship between a photo's native size and the size it is drawn at
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMapping {
    /// Native image size in pixels
    pub image_size: (u32, u32),
    /// Size the image occupies on screen, in logical pixels
    pub display_size: (f32, f32),
}

impl DisplayMapping {
    pub fn new(image_size: (u32, u32), display_size: (f32, f32)) -> Self {
        Self {
            image_size,
            display_size,
        }
    }

    /// Fit an image into a `max_width` x `max_height` box without upscaling
    pub fn fit(image_size: (u32, u32), max_width: f32, max_height: f32) -> Self {
        let (w, h) = (image_size.0 as f32, image_size.1 as f32);
        let scale = if w > 0.0 && h > 0.0 {
            (max_width / w).min(max_height / h).min(1.0)
        } else {
            1.0
        };
        Self {
            image_size,
            display_size: (w * scale, h * scale),
        }
    }

    /// Native pixels per displayed pixel, horizontally
    pub fn scale_x(&self) -> f32 {
        ratio(self.image_size.0 as f32, self.display_size.0)
    }

    /// Native pixels per displayed pixel, vertically
    pub fn scale_y(&self) -> f32 {
        ratio(self.image_size.1 as f32, self.display_size.1)
    }

    /// Map a point in display space (relative to the image's top-left) to native pixels
    pub fn to_image(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale_x(), y * self.scale_y())
    }

    /// Map a rectangle in native pixels to display space
    pub fn to_display(&self, rect: Rect) -> Rect {
        rect.scale(1.0 / self.scale_x(), 1.0 / self.scale_y())
    }
}

fn ratio(native: f32, displayed: f32) -> f32 {
    if native > 0.0 && displayed > 0.0 {
        native / displayed
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_drag_normalizes_every_direction() {
        let expected = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Rect::from_drag((10.0, 20.0), (40.0, 60.0)), expected);
        assert_eq!(Rect::from_drag((40.0, 60.0), (10.0, 20.0)), expected);
        assert_eq!(Rect::from_drag((40.0, 20.0), (10.0, 60.0)), expected);
        assert_eq!(Rect::from_drag((10.0, 60.0), (40.0, 20.0)), expected);
    }

    #[test]
    fn test_from_drag_zero_extent() {
        let rect = Rect::from_drag((5.0, 5.0), (5.0, 5.0));
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn test_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(rect.right(), 6.0);
        assert_eq!(rect.bottom(), 8.0);
        assert_eq!(rect.translate(1.0, -1.0), Rect::new(3.0, 2.0, 4.0, 5.0));
    }

    #[test]
    fn test_fit_never_upscales() {
        let mapping = DisplayMapping::fit((300, 200), 600.0, 400.0);
        assert_eq!(mapping.display_size, (300.0, 200.0));
        assert_eq!(mapping.scale_x(), 1.0);
    }

    #[test]
    fn test_fit_limited_by_height() {
        let mapping = DisplayMapping::fit((1200, 1600), 600.0, 400.0);
        assert_eq!(mapping.display_size, (300.0, 400.0));
        assert_eq!(mapping.scale_x(), 4.0);
        assert_eq!(mapping.scale_y(), 4.0);
    }

    #[test]
    fn test_to_image_uses_native_over_displayed() {
        let mapping = DisplayMapping::new((1000, 500), (250.0, 250.0));
        assert_eq!(mapping.to_image(100.0, 100.0), (400.0, 200.0));
    }

    #[test]
    fn test_to_display_inverts_to_image() {
        let mapping = DisplayMapping::new((800, 400), (400.0, 200.0));
        let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(mapping.to_display(rect), Rect::new(50.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_zero_display_size_falls_back_to_identity() {
        let mapping = DisplayMapping::new((800, 400), (0.0, 0.0));
        assert_eq!(mapping.to_image(12.0, 7.0), (12.0, 7.0));
    }
}
