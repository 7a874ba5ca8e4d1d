use smallvec::SmallVec;

use crate::anchor::Anchor;
use crate::color::Color;
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::events::EventRegistry;
use crate::id::NodeId;
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::node::{NodeConfig, ZoomLimits};

impl From<BoundingBox> for NodeConfig {
    fn from(bounds: BoundingBox) -> Self {
        NodeConfig::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }
}

/// Construction parameters for a [`Container`]: the shared node settings
/// plus the container's capabilities.
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub(crate) node: NodeConfig,
    scrollable_x: bool,
    scrollable_y: bool,
    zoomable: bool,
    overflow: bool,
    background: Option<Color>,
}

impl From<NodeConfig> for ContainerConfig {
    fn from(node: NodeConfig) -> Self {
        Self {
            node,
            ..Self::default()
        }
    }
}

impl From<BoundingBox> for ContainerConfig {
    fn from(bounds: BoundingBox) -> Self {
        NodeConfig::from(bounds).into()
    }
}

impl ContainerConfig {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        NodeConfig::new(x, y, width, height).into()
    }

    /// Fills the parent's baseline box.
    pub fn fill() -> Self {
        Self::default()
    }

    #[inline]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.node = self.node.anchor(anchor);
        self
    }

    pub fn anchor_name(mut self, name: &str) -> Result<Self> {
        self.node = self.node.anchor_name(name)?;
        Ok(self)
    }

    #[inline]
    pub fn visible(mut self, visible: bool) -> Self {
        self.node = self.node.visible(visible);
        self
    }

    #[inline]
    pub fn rescale(mut self, rescale: bool) -> Self {
        self.node = self.node.rescale(rescale);
        self
    }

    #[inline]
    pub fn keep_proportion(mut self, keep: bool) -> Self {
        self.node = self.node.keep_proportion(keep);
        self
    }

    #[inline]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node = self.node.name(name);
        self
    }

    #[inline]
    pub fn border(mut self, color: impl Into<Color>) -> Self {
        self.node = self.node.border(color);
        self
    }

    #[inline]
    pub fn zoom_limits(mut self, limits: ZoomLimits) -> Self {
        self.node = self.node.zoom_limits(limits);
        self
    }

    /// Allows panning along each axis.
    #[inline]
    pub fn scrollable(mut self, x: bool, y: bool) -> Self {
        self.scrollable_x = x;
        self.scrollable_y = y;
        self
    }

    #[inline]
    pub fn zoomable(mut self, zoomable: bool) -> Self {
        self.zoomable = zoomable;
        self
    }

    /// When false, child polylines and point shapes are clipped to the
    /// container's bounds.
    #[inline]
    pub fn overflow(mut self, overflow: bool) -> Self {
        self.overflow = overflow;
        self
    }

    #[inline]
    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// Node kind that owns an ordered list of children and handles zoom and pan.
#[derive(Debug, Clone)]
pub struct Container {
    /// Paint order, back to front.
    pub(crate) children: SmallVec<[NodeId; 8]>,
    pub(crate) events: EventRegistry,
    scrollable_x: bool,
    scrollable_y: bool,
    zoomable: bool,
    overflow: bool,
    drag_offset: Vector2,
    background: Option<Color>,
}

impl Container {
    pub(crate) fn new(config: &ContainerConfig) -> Self {
        Self {
            children: SmallVec::new(),
            events: EventRegistry::new(),
            scrollable_x: config.scrollable_x,
            scrollable_y: config.scrollable_y,
            zoomable: config.zoomable,
            overflow: config.overflow,
            drag_offset: Vector2::ZERO,
            background: config.background,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    pub fn scrollable(&self) -> (bool, bool) {
        (self.scrollable_x, self.scrollable_y)
    }

    pub fn is_draggable(&self) -> bool {
        self.scrollable_x || self.scrollable_y
    }

    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Pan translation applied to the contents.
    pub fn drag_offset(&self) -> Vector2 {
        self.drag_offset
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub(crate) fn attach(&mut self, child: NodeId) {
        self.children.push(child);
        self.events.subscribe_all(child);
    }

    pub(crate) fn detach(&mut self, child: NodeId) {
        self.children.retain(|id| *id != child);
        self.events.unsubscribe(child);
    }

    /// Zeroes the axes this container cannot pan along. `None` when it cannot
    /// pan at all.
    pub fn gate_drag(&self, delta: Vector2) -> Option<Vector2> {
        if !self.is_draggable() {
            return None;
        }
        Some(Vector2::new(
            if self.scrollable_x { delta.x } else { 0.0 },
            if self.scrollable_y { delta.y } else { 0.0 },
        ))
    }

    /// Moves the pan offset to `offset` clamped into `[-bound, bound]`.
    /// Returns how far the offset actually moved.
    pub(crate) fn set_drag_offset(&mut self, offset: Vector2, bound: Vector2) -> Vector2 {
        let clamped = offset.clamp_symmetric(bound);
        let applied = clamped - self.drag_offset;
        self.drag_offset = clamped;
        applied
    }
}

/// Largest pan offset a container of `size` allows along each axis.
pub fn max_drag_offset(size: Dimensions, margin: Dimensions) -> Vector2 {
    Vector2::new((size.width - margin.width).max(0.0), (size.height - margin.height).max(0.0))
}

/// Zoom factor for one scroll step: the larger scroll component (y on ties)
/// scaled by the sensitivity, clamped to the configured band.
pub fn zoom_delta(scroll: Vector2, config: &EngineConfig) -> f32 {
    let dominant = if scroll.x.abs() > scroll.y.abs() { scroll.x } else { scroll.y };
    config.zoom_band.clamp(1.0 + dominant * config.scroll_sensitivity)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zoom_delta_picks_dominant_axis_and_clamps() {
        let config = EngineConfig::default();
        assert!((zoom_delta(Vector2::new(0.0, 1.0), &config) - 1.1).abs() < 1e-6);
        assert!((zoom_delta(Vector2::new(-3.0, 1.0), &config) - 0.7).abs() < 1e-6);
        assert!((zoom_delta(Vector2::new(2.0, -2.0), &config) - 0.8).abs() < 1e-6);
        assert_eq!(zoom_delta(Vector2::new(0.0, 40.0), &config), 1.5);
        assert_eq!(zoom_delta(Vector2::new(0.0, -40.0), &config), 0.5);
        assert_eq!(zoom_delta(Vector2::ZERO, &config), 1.0);
    }

    #[test]
    fn drag_gating() {
        let vertical = Container::new(&ContainerConfig::default().scrollable(false, true));
        assert_eq!(vertical.gate_drag(Vector2::new(10.0, 10.0)), Some(Vector2::new(0.0, 10.0)));
        let fixed = Container::new(&ContainerConfig::default());
        assert_eq!(fixed.gate_drag(Vector2::new(10.0, 10.0)), None);
    }

    #[test]
    fn drag_offset_is_clamped() {
        let mut container = Container::new(&ContainerConfig::default().scrollable(true, true));
        let bound = max_drag_offset(Dimensions::new(100.0, 60.0), Dimensions::new(50.0, 50.0));
        assert_eq!(bound, Vector2::new(50.0, 10.0));

        let applied = container.set_drag_offset(Vector2::new(30.0, 30.0), bound);
        assert_eq!(applied, Vector2::new(30.0, 10.0));
        let applied = container.set_drag_offset(container.drag_offset() + Vector2::new(30.0, -5.0), bound);
        assert_eq!(applied, Vector2::new(20.0, -5.0));
        assert_eq!(container.drag_offset(), Vector2::new(50.0, 5.0));
    }

    #[test]
    fn max_drag_offset_never_negative() {
        assert_eq!(max_drag_offset(Dimensions::new(20.0, 80.0), Dimensions::new(50.0, 50.0)), Vector2::new(0.0, 30.0));
    }
}
