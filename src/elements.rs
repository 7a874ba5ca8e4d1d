use crate::color::Color;
use crate::math::{Dimensions, Vector2};

/// Procedural primitive drawn by a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    FilledCircle,
    /// Ring of the given thickness at the baseline box size.
    OutlinedCircle { thickness: f32 },
}

/// A procedural shape placed in node-local coordinates.
///
/// `center` is relative to the node's baseline box and moves with the box as
/// it is rescaled; `radius` scales by the smaller of the two box scales.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    center: Vector2,
    radius: f32,
    color: Color,
    placed_center: Vector2,
    placed_radius: f32,
    placed_thickness: f32,
}

impl Shape {
    pub fn circle(center: impl Into<Vector2>, radius: f32, color: impl Into<Color>) -> Self {
        let center = center.into();
        Self {
            kind: ShapeKind::FilledCircle,
            center,
            radius,
            color: color.into(),
            placed_center: center,
            placed_radius: radius,
            placed_thickness: 0.0,
        }
    }

    pub fn ring(center: impl Into<Vector2>, radius: f32, thickness: f32, color: impl Into<Color>) -> Self {
        Self {
            kind: ShapeKind::OutlinedCircle { thickness },
            placed_thickness: thickness,
            ..Self::circle(center, radius, color)
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Center in the current box, relative to the node origin.
    pub fn placed_center(&self) -> Vector2 {
        self.placed_center
    }

    pub fn placed_radius(&self) -> f32 {
        self.placed_radius
    }

    pub fn placed_thickness(&self) -> f32 {
        self.placed_thickness
    }

    /// Moves the center in node-local baseline coordinates.
    pub(crate) fn set_center(&mut self, center: Vector2) {
        self.center = center;
    }

    /// Re-places the shape for a box scaled by `scale` from its baseline.
    pub(crate) fn refit(&mut self, scale: Vector2, min_stroke: f32) {
        let uniform = scale.min_element();
        self.placed_center = Vector2::new(self.center.x * scale.x, self.center.y * scale.y);
        self.placed_radius = (self.radius * uniform).max(min_stroke);
        if let ShapeKind::OutlinedCircle { thickness } = self.kind {
            self.placed_thickness = (thickness * uniform).max(min_stroke);
        }
    }
}

/// Represents an asset that can be loaded as a texture. This can be either a file path or embedded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Path(&'static str), // For external assets
    Bytes{file_name: &'static str, data: &'static [u8]}, // For embedded assets
}

impl Asset {
    /// Cache key for the loaded texture.
    pub fn name(&self) -> &str {
        match self {
            Asset::Path(path) => path,
            Asset::Bytes { file_name, .. } => file_name,
        }
    }
}

/// Sizing of one texture axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextureSize {
    Fixed(f32),
    /// Copies the parent's matching baseline dimension. `Auto` on both axes
    /// makes a square of the parent's smaller side.
    #[default]
    Auto,
}

impl From<f32> for TextureSize {
    fn from(value: f32) -> Self {
        TextureSize::Fixed(value)
    }
}

/// An image drawn as one axis-aligned quad over the node box.
#[derive(Debug, Clone)]
pub struct TextureObject {
    asset: Asset,
    width: TextureSize,
    height: TextureSize,
    tint: Color,
}

impl TextureObject {
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            width: TextureSize::Auto,
            height: TextureSize::Auto,
            tint: Color::WHITE,
        }
    }

    #[inline]
    pub fn size(mut self, width: impl Into<TextureSize>, height: impl Into<TextureSize>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    #[inline]
    pub fn tint(mut self, tint: impl Into<Color>) -> Self {
        self.tint = tint.into();
        self
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    pub fn tint_color(&self) -> Color {
        self.tint
    }

    /// Box size this texture asks for inside a parent frame of `frame`.
    pub fn resolve_size(&self, frame: Dimensions) -> Dimensions {
        match (self.width, self.height) {
            (TextureSize::Auto, TextureSize::Auto) => {
                let side = frame.min_side();
                Dimensions::new(side, side)
            }
            (width, height) => Dimensions::new(
                match width {
                    TextureSize::Fixed(w) => w,
                    TextureSize::Auto => frame.width,
                },
                match height {
                    TextureSize::Fixed(h) => h,
                    TextureSize::Auto => frame.height,
                },
            ),
        }
    }
}
