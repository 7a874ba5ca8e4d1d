use crate::{
    color::Color,
    elements::Asset,
    id::{FontId, NodeId},
    math::{BoundingBox, Vector2},
};

/// Represents a filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// The fill color of the rectangle.
    pub color: Color,
}

/// Represents the outline of a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleOutline {
    pub color: Color,
    /// Line width in pixels.
    pub thickness: f32,
}

/// Represents an open line through screen-space points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// At least two points, in final screen coordinates.
    pub points: Vec<Vector2>,
    /// The stroke color.
    pub color: Color,
    /// The stroke width.
    pub thickness: f32,
}

/// Represents a filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f32,
    pub color: Color,
}

/// Represents a ring.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleOutline {
    pub center: Vector2,
    pub radius: f32,
    pub thickness: f32,
    pub color: Color,
}

/// Represents a textured quad covering the command's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// The asset to draw.
    pub asset: Asset,
    /// Multiplied with the texture colors.
    pub tint: Color,
}

/// Represents a text element with styling attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// The text content.
    pub text: String,
    /// The color of the text.
    pub color: Color,
    /// The ID of the font used.
    pub font_id: FontId,
    /// The font size.
    pub font_size: u16,
    /// Top-left corner of the text box.
    pub position: Vector2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommandConfig {
    Rectangle(Rectangle),
    RectangleOutline(RectangleOutline),
    Polyline(Polyline),
    Circle(Circle),
    CircleOutline(CircleOutline),
    Image(Image),
    Text(Text),
}

/// Represents a render command for drawing an element on the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    /// The bounding box defining the area occupied by the element.
    pub bounding_box: BoundingBox,
    /// The specific configuration for rendering this command.
    pub config: RenderCommandConfig,
    /// The node that emitted this command.
    pub id: NodeId,
}

impl RenderCommand {
    pub(crate) fn new(id: NodeId, bounding_box: BoundingBox, config: RenderCommandConfig) -> Self {
        Self {
            bounding_box,
            config,
            id,
        }
    }

    pub(crate) fn circle(id: NodeId, center: Vector2, radius: f32, color: Color) -> Self {
        Self::new(
            id,
            circle_bounds(center, radius),
            RenderCommandConfig::Circle(Circle { center, radius, color }),
        )
    }

    pub(crate) fn ring(id: NodeId, center: Vector2, radius: f32, thickness: f32, color: Color) -> Self {
        Self::new(
            id,
            circle_bounds(center, radius),
            RenderCommandConfig::CircleOutline(CircleOutline {
                center,
                radius,
                thickness,
                color,
            }),
        )
    }

    /// `None` for runs too short to draw.
    pub(crate) fn polyline(id: NodeId, points: Vec<Vector2>, color: Color, thickness: f32) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let bounding_box = BoundingBox::enclosing(&points)?;
        Some(Self::new(
            id,
            bounding_box,
            RenderCommandConfig::Polyline(Polyline { points, color, thickness }),
        ))
    }
}

fn circle_bounds(center: Vector2, radius: f32) -> BoundingBox {
    BoundingBox::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
}
