//! Viewport sizing: logical dimensions plus a clamped device pixel ratio.

use texcube_common::Dimensions;

/// Upper bound on the device pixel ratio applied to the drawable buffer.
/// Bounds fragment cost on high-DPI displays.
pub const DEFAULT_MAX_PIXEL_RATIO: f32 = 2.0;

/// Clamp a host-reported pixel ratio into `(0, max]`.
///
/// Non-finite or non-positive reports fall back to 1.
pub fn clamp_pixel_ratio(host_ratio: f64, max: f32) -> f32 {
    let ratio = host_ratio as f32;
    if !ratio.is_finite() || ratio <= 0.0 {
        tracing::debug!("ignoring invalid device pixel ratio {host_ratio}");
        return 1.0_f32.min(max);
    }
    ratio.min(max)
}

/// Current size of the drawable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    dimensions: Dimensions,
    pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(dimensions: Dimensions, host_ratio: f64, max_pixel_ratio: f32) -> Self {
        Self {
            dimensions,
            pixel_ratio: clamp_pixel_ratio(host_ratio, max_pixel_ratio),
            max_pixel_ratio,
        }
    }

    /// Apply a resize signal from the host.
    pub fn resize(&mut self, dimensions: Dimensions, host_ratio: f64) {
        self.dimensions = dimensions;
        self.pixel_ratio = clamp_pixel_ratio(host_ratio, self.max_pixel_ratio);
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Pixel ratio actually applied to the buffer, after clamping.
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.dimensions.aspect()
    }

    /// Drawable buffer size in physical pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.dimensions.width), scale(self.dimensions.height))
    }
}
