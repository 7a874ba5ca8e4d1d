use crate::errors::{Error, Result};
use crate::math::Dimensions;

const DEFAULT_WINDOW: Dimensions = Dimensions::new(1280.0, 720.0);
const DEFAULT_SCROLL_SENSITIVITY: f32 = 0.1;
const DEFAULT_RESAMPLE_COUNT: usize = 2000;
const DEFAULT_MIN_CONTAINER_SIZE: Dimensions = Dimensions::new(50.0, 50.0);
const DEFAULT_DRAG_MARGIN: Dimensions = Dimensions::new(50.0, 50.0);
const DEFAULT_MIN_STROKE: f32 = 1.0;

/// Bounds a single zoom step is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomBand {
    pub min: f32,
    pub max: f32,
}

impl ZoomBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, factor: f32) -> f32 {
        factor.clamp(self.min, self.max)
    }
}

impl Default for ZoomBand {
    fn default() -> Self {
        Self::new(0.5, 1.5)
    }
}

/// Engine-wide settings, fixed once a [`Stage`](crate::stage::Stage) is built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Window size the scene was authored against. Resize scales are
    /// computed relative to it.
    pub window: Dimensions,
    /// Zoom gained per scroll unit.
    pub scroll_sensitivity: f32,
    pub zoom_band: ZoomBand,
    /// Number of points every polyline is resampled to.
    pub resample_count: usize,
    /// Default zoom floor for containers.
    pub min_container_size: Dimensions,
    /// Part of a container that must stay covered by its panned content.
    pub drag_margin: Dimensions,
    /// Floor for rescaled radii and line thicknesses.
    pub min_stroke: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            scroll_sensitivity: DEFAULT_SCROLL_SENSITIVITY,
            zoom_band: ZoomBand::default(),
            resample_count: DEFAULT_RESAMPLE_COUNT,
            min_container_size: DEFAULT_MIN_CONTAINER_SIZE,
            drag_margin: DEFAULT_DRAG_MARGIN,
            min_stroke: DEFAULT_MIN_STROKE,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn window(mut self, width: f32, height: f32) -> Self {
        self.window = Dimensions::new(width, height);
        self
    }

    #[inline]
    pub fn scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }

    #[inline]
    pub fn zoom_band(mut self, min: f32, max: f32) -> Self {
        self.zoom_band = ZoomBand::new(min, max);
        self
    }

    #[inline]
    pub fn resample_count(mut self, count: usize) -> Self {
        self.resample_count = count;
        self
    }

    #[inline]
    pub fn min_container_size(mut self, width: f32, height: f32) -> Self {
        self.min_container_size = Dimensions::new(width, height);
        self
    }

    #[inline]
    pub fn drag_margin(mut self, width: f32, height: f32) -> Self {
        self.drag_margin = Dimensions::new(width, height);
        self
    }

    #[inline]
    pub fn min_stroke(mut self, stroke: f32) -> Self {
        self.min_stroke = stroke;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "baseline window must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.zoom_band.min > 0.0 && self.zoom_band.min <= 1.0 && self.zoom_band.max >= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "zoom band [{}, {}] must satisfy 0 < min <= 1 <= max",
                self.zoom_band.min, self.zoom_band.max
            )));
        }
        if self.resample_count < 2 {
            return Err(Error::InvalidConfig("resample count must be at least 2".to_owned()));
        }
        if self.min_stroke < 0.0 {
            return Err(Error::InvalidConfig("minimum stroke cannot be negative".to_owned()));
        }
        Ok(())
    }
}
