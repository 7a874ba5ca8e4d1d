//! The positioned, sized entity every scene element is built on.
//!
//! A node keeps the geometry it was authored with (its baseline, relative to
//! its parent) and derives its current screen geometry from that baseline on
//! every resize, so repeated resizes never accumulate error. Zoom is tracked
//! separately as a per-axis multiplier that survives resizes.

use crate::anchor::Anchor;
use crate::color::Color;
use crate::container::Container;
use crate::elements::{Shape, TextureObject};
use crate::errors::Result;
use crate::id::NodeId;
use crate::math::{BoundingBox, Dimensions, Vector2, EPSILON};
use crate::polyline::Polyline;
use crate::text::TextObject;

/// Size bounds a zoom must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: Dimensions,
    pub max: Option<Dimensions>,
}

impl ZoomLimits {
    /// No floor beyond zero and no ceiling.
    pub const UNBOUNDED: ZoomLimits = ZoomLimits {
        min: Dimensions::new(0.0, 0.0),
        max: None,
    };

    pub const fn new(min: Dimensions, max: Option<Dimensions>) -> Self {
        Self { min, max }
    }

    pub fn admits(&self, size: Dimensions) -> bool {
        if size.width < self.min.width || size.height < self.min.height {
            return false;
        }
        match self.max {
            Some(max) => size.width <= max.width && size.height <= max.height,
            None => true,
        }
    }
}

/// Construction parameters shared by every node kind.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub(crate) bounds: Option<BoundingBox>,
    pub(crate) anchor: Anchor,
    pub(crate) visible: bool,
    pub(crate) rescale: bool,
    pub(crate) keep_proportion: bool,
    pub(crate) name: Option<String>,
    pub(crate) border: Option<Color>,
    pub(crate) zoom_limits: Option<ZoomLimits>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bounds: None,
            anchor: Anchor::Center,
            visible: true,
            rescale: true,
            keep_proportion: false,
            name: None,
            border: None,
            zoom_limits: None,
        }
    }
}

impl NodeConfig {
    /// Baseline box relative to the parent's origin.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Some(BoundingBox::new(x, y, width, height)),
            ..Self::default()
        }
    }

    /// Fills the parent's baseline box (or the baseline window at top level).
    pub fn fill() -> Self {
        Self::default()
    }

    /// Position only, for nodes whose size comes from their content or asset.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    #[inline]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the anchor by name, failing on anything outside the nine anchors.
    pub fn anchor_name(self, name: &str) -> Result<Self> {
        Ok(self.anchor(name.parse()?))
    }

    #[inline]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// When false the node keeps its baseline size through resizes and
    /// zooms, and its children stop following the window scale.
    #[inline]
    pub fn rescale(mut self, rescale: bool) -> Self {
        self.rescale = rescale;
        self
    }

    #[inline]
    pub fn keep_proportion(mut self, keep: bool) -> Self {
        self.keep_proportion = keep;
        self
    }

    #[inline]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Outlines the node box, for debugging layouts.
    #[inline]
    pub fn border(mut self, color: impl Into<Color>) -> Self {
        self.border = Some(color.into());
        self
    }

    #[inline]
    pub fn zoom_limits(mut self, limits: ZoomLimits) -> Self {
        self.zoom_limits = Some(limits);
        self
    }
}

/// What a node draws and how it reacts to input.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Container(Container),
    Shape(Shape),
    Polyline(Polyline),
    Text(TextObject),
    Texture(TextureObject),
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Container(_) => "container",
            NodeKind::Shape(_) => "shape",
            NodeKind::Polyline(_) => "polyline",
            NodeKind::Text(_) => "text",
            NodeKind::Texture(_) => "texture",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    name: Option<String>,
    parent: Option<NodeId>,
    baseline: BoundingBox,
    position: Vector2,
    size: Dimensions,
    /// Window scale last applied, after the pinned-parent rule.
    scale: Vector2,
    anchor: Anchor,
    visible: bool,
    rescale_enabled: bool,
    keep_proportion: bool,
    zoom_scale: Vector2,
    zoom_limits: ZoomLimits,
    /// Sum of the pan offsets of every enclosing container.
    frame_offset: Vector2,
    border: Option<Color>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(
        config: NodeConfig,
        baseline: BoundingBox,
        parent: Option<NodeId>,
        default_limits: ZoomLimits,
        kind: NodeKind,
    ) -> Self {
        Self {
            name: config.name,
            parent,
            baseline,
            position: baseline.position(),
            size: baseline.dimensions(),
            scale: Vector2::ONE,
            anchor: config.anchor,
            visible: config.visible,
            rescale_enabled: config.rescale,
            keep_proportion: config.keep_proportion,
            zoom_scale: Vector2::ONE,
            zoom_limits: config.zoom_limits.unwrap_or(default_limits),
            frame_offset: Vector2::ZERO,
            border: config.border,
            kind,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Authored box, relative to the parent's origin.
    pub fn baseline(&self) -> BoundingBox {
        self.baseline
    }

    /// Current origin, before pan offsets.
    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_parts(self.position, self.size)
    }

    /// Where the node is drawn: its bounds shifted by every enclosing pan.
    pub fn screen_bounds(&self) -> BoundingBox {
        BoundingBox::from_parts(self.position + self.frame_offset, self.size)
    }

    pub fn frame_offset(&self) -> Vector2 {
        self.frame_offset
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The anchor's reference point on the current bounds.
    pub fn anchor_point(&self) -> Vector2 {
        self.anchor.point_on(self.bounds())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rescale_enabled(&self) -> bool {
        self.rescale_enabled
    }

    pub fn keeps_proportion(&self) -> bool {
        self.keep_proportion
    }

    pub fn zoom_scale(&self) -> Vector2 {
        self.zoom_scale
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        self.zoom_limits
    }

    pub fn border(&self) -> Option<Color> {
        self.border
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            NodeKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            NodeKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_border(&mut self, border: Option<Color>) {
        self.border = border;
    }

    pub(crate) fn set_zoom_limits(&mut self, limits: ZoomLimits) {
        self.zoom_limits = limits;
    }

    pub(crate) fn shift_frame(&mut self, delta: Vector2) {
        self.frame_offset += delta;
    }

    pub(crate) fn set_frame_offset(&mut self, offset: Vector2) {
        self.frame_offset = offset;
    }

    /// Text boxes are sized by their content, never by scale or zoom.
    fn sized_by_content(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Whether zoom changes this node's size (and so must be validated).
    pub fn resizes_with_zoom(&self) -> bool {
        self.rescale_enabled && !self.sized_by_content()
    }

    /// Recomputes size and position from the baseline for a window scale.
    ///
    /// `parent` carries the parent's origin and its rescale flag. A parent
    /// that does not rescale pins this node to scale 1.
    pub(crate) fn rescale(&mut self, scale_x: f32, scale_y: f32, parent: Option<(Vector2, bool)>) {
        let (sx, sy) = match parent {
            Some((_, false)) => (1.0, 1.0),
            _ => (scale_x, scale_y),
        };
        self.scale = Vector2::new(sx, sy);
        if self.rescale_enabled && !self.sized_by_content() {
            let factors = self.size_factors();
            self.size = self.baseline.dimensions().scale(factors.x, factors.y);
        }
        self.resolve_position(parent.map_or(Vector2::ZERO, |(origin, _)| origin));
    }

    /// Window and zoom scale this node's box follows.
    fn size_factors(&self) -> Vector2 {
        if !self.rescale_enabled {
            return Vector2::ONE;
        }
        let (fx, fy) = if self.keep_proportion {
            let uniform = self.scale.x.min(self.scale.y);
            (uniform, uniform)
        } else {
            (self.scale.x, self.scale.y)
        };
        Vector2::new(fx * self.zoom_scale.x, fy * self.zoom_scale.y)
    }

    /// Scale from the baseline box to the current box. An axis without
    /// baseline extent follows the window and zoom scale instead.
    pub fn box_scale(&self) -> Vector2 {
        let baseline = self.baseline.dimensions();
        let ratio = self.size.ratio_to(baseline);
        let factors = self.size_factors();
        let axis = |extent: f32, ratio: f32, factor: f32| if extent.abs() < EPSILON { factor } else { ratio };
        Vector2::new(
            axis(baseline.width, ratio.x, factors.x),
            axis(baseline.height, ratio.y, factors.y),
        )
    }

    /// Places the node so its anchor sits on the scaled baseline anchor,
    /// offset by the parent's origin.
    pub(crate) fn resolve_position(&mut self, parent_origin: Vector2) {
        self.position = parent_origin + self.anchor.resolve(self.baseline, self.scale.x, self.scale.y, self.size);
    }

    /// Replaces the size of a content-sized node.
    pub(crate) fn set_content_size(&mut self, size: Dimensions) {
        self.size = size;
    }

    fn zoom_factors(&self, factor_x: f32, factor_y: f32) -> (f32, f32) {
        if self.keep_proportion {
            let uniform = factor_x.min(factor_y);
            (uniform, uniform)
        } else {
            (factor_x, factor_y)
        }
    }

    /// Size this node would have after a zoom by `(factor_x, factor_y)`.
    pub fn zoomed_size(&self, factor_x: f32, factor_y: f32) -> Dimensions {
        if !self.resizes_with_zoom() {
            return self.size;
        }
        let (fx, fy) = self.zoom_factors(factor_x, factor_y);
        self.size.scale(fx, fy)
    }

    pub fn admits_zoom(&self, factor_x: f32, factor_y: f32) -> bool {
        !self.resizes_with_zoom() || self.zoom_limits.admits(self.zoomed_size(factor_x, factor_y))
    }

    /// Applies a validated zoom. The node keeps its anchor point fixed and
    /// also moves by `inherited`, the correction already applied to its
    /// parent. Returns the total correction for this node's children.
    pub(crate) fn commit_zoom(&mut self, factor_x: f32, factor_y: f32, inherited: Vector2) -> Vector2 {
        let before = self.anchor_point();
        let (fx, fy) = self.zoom_factors(factor_x, factor_y);
        self.zoom_scale.x *= fx;
        self.zoom_scale.y *= fy;
        self.size = self.zoomed_size(factor_x, factor_y);
        let after = self.anchor_point();
        let shift = before - after + inherited;
        self.position += shift;
        shift
    }

    /// Refreshes caches derived from the current box size.
    pub(crate) fn refit(&mut self, min_stroke: f32) {
        let (size, scale) = (self.size, self.box_scale());
        match &mut self.kind {
            NodeKind::Shape(shape) => shape.refit(scale, min_stroke),
            NodeKind::Polyline(line) => line.refit(scale, size, min_stroke),
            NodeKind::Container(_) | NodeKind::Text(_) | NodeKind::Texture(_) => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::container::ContainerConfig;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    fn container(config: NodeConfig) -> Node {
        let bounds = config.bounds.unwrap_or_default();
        Node::new(
            config,
            bounds,
            None,
            ZoomLimits::UNBOUNDED,
            NodeKind::Container(Container::new(&ContainerConfig::default())),
        )
    }

    #[test]
    fn anchor_fidelity_under_uniform_rescale() {
        for anchor in Anchor::ALL {
            let mut node = container(NodeConfig::new(10.0, 20.0, 300.0, 100.0).anchor(anchor));
            let baseline_point = anchor.point_on(node.baseline());
            node.rescale(1.75, 1.75, None);
            let point = node.anchor_point();
            assert_close(point.x, baseline_point.x * 1.75);
            assert_close(point.y, baseline_point.y * 1.75);
        }
    }

    #[test]
    fn keep_proportion_uses_smaller_scale() {
        let mut node = container(NodeConfig::new(0.0, 0.0, 100.0, 50.0).keep_proportion(true));
        node.rescale(2.0, 3.0, None);
        assert_eq!(node.size(), Dimensions::new(200.0, 100.0));
    }

    #[test]
    fn pinned_by_non_rescaling_parent() {
        let mut node = container(NodeConfig::new(10.0, 10.0, 40.0, 40.0).anchor(Anchor::TopLeft));
        node.rescale(2.0, 2.0, Some((Vector2::new(100.0, 100.0), false)));
        assert_eq!(node.size(), Dimensions::new(40.0, 40.0));
        assert_eq!(node.position(), Vector2::new(110.0, 110.0));
    }

    #[test]
    fn zoom_keeps_anchor_point() {
        let mut node = container(NodeConfig::new(10.0, 10.0, 100.0, 100.0).anchor(Anchor::BottomRight));
        node.rescale(1.0, 1.0, None);
        let before = node.anchor_point();
        let shift = node.commit_zoom(1.5, 1.5, Vector2::ZERO);
        assert_eq!(node.anchor_point(), before);
        assert_eq!(node.size(), Dimensions::new(150.0, 150.0));
        assert_eq!(shift, Vector2::new(-50.0, -50.0));
        assert_eq!(node.zoom_scale(), Vector2::new(1.5, 1.5));
    }

    #[test]
    fn non_rescaling_node_ignores_zoom_size() {
        let mut node = container(NodeConfig::new(0.0, 0.0, 100.0, 100.0).rescale(false));
        node.rescale(1.0, 1.0, None);
        assert!(node.admits_zoom(0.01, 0.01));
        node.commit_zoom(2.0, 2.0, Vector2::new(5.0, 0.0));
        assert_eq!(node.size(), Dimensions::new(100.0, 100.0));
        assert_eq!(node.position(), Vector2::new(5.0, 0.0));
    }

    #[test]
    fn box_scale_falls_back_to_window_scale_on_empty_axes() {
        let mut sized = container(NodeConfig::new(0.0, 0.0, 100.0, 50.0));
        sized.rescale(2.0, 3.0, None);
        assert_eq!(sized.box_scale(), Vector2::new(2.0, 3.0));

        let mut point = container(NodeConfig::at(10.0, 10.0));
        point.rescale(2.0, 3.0, None);
        assert_eq!(point.box_scale(), Vector2::new(2.0, 3.0));
        point.commit_zoom(1.5, 1.5, Vector2::ZERO);
        assert_eq!(point.box_scale(), Vector2::new(3.0, 4.5));

        let mut square = container(NodeConfig::at(10.0, 10.0).keep_proportion(true));
        square.rescale(2.0, 3.0, None);
        assert_eq!(square.box_scale(), Vector2::new(2.0, 2.0));

        let mut fixed = container(NodeConfig::at(10.0, 10.0).rescale(false));
        fixed.rescale(2.0, 3.0, None);
        assert_eq!(fixed.box_scale(), Vector2::ONE);
    }

    #[test]
    fn zoom_limits() {
        let limits = ZoomLimits::new(Dimensions::new(50.0, 50.0), Some(Dimensions::new(500.0, 500.0)));
        assert!(limits.admits(Dimensions::new(50.0, 500.0)));
        assert!(!limits.admits(Dimensions::new(49.0, 100.0)));
        assert!(!limits.admits(Dimensions::new(100.0, 501.0)));
        assert!(ZoomLimits::UNBOUNDED.admits(Dimensions::new(1e9, 0.0)));
    }

    #[test]
    fn unknown_anchor_name_is_a_config_error() {
        assert!(NodeConfig::new(0.0, 0.0, 1.0, 1.0).anchor_name("diagonal").is_err());
        let config = NodeConfig::new(0.0, 0.0, 1.0, 1.0).anchor_name("left_center").unwrap();
        assert_eq!(config.anchor, Anchor::LeftCenter);
    }
}
