//! Photo type for the image being annotated

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

/// A decoded photo with both raw RGBA data and a display handle
#[derive(Clone, Debug)]
pub struct PhotoImage {
    pub rgba: RgbaImage,
    pub handle: cosmic::widget::image::Handle,
}

impl PhotoImage {
    /// Decode the photo at `path` into RGBA
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let rgba = image::open(path)
            .with_context(|| format!("failed to decode {}", path.display()))?
            .into_rgba8();
        log::debug!(
            "PhotoImage loaded from {}: {}x{} pixels",
            path.display(),
            rgba.width(),
            rgba.height()
        );
        Ok(Self::from_rgba(rgba))
    }

    /// Wrap already decoded pixels
    pub fn from_rgba(rgba: RgbaImage) -> Self {
        let handle = cosmic::widget::image::Handle::from_rgba(
            rgba.width(),
            rgba.height(),
            rgba.clone().into_vec(),
        );
        Self { rgba, handle }
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.rgba.dimensions()
    }
}
