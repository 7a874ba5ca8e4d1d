//! The scene arena and every pass that walks it.
//!
//! Nodes live in one [`SlotMap`]; parents and children refer to each other by
//! [`NodeId`]. Each pass (resize, zoom, drag, draw) starts at the scene's own
//! subscriber lists and descends through each container's lists, so a parent
//! is always handled before its children.

use std::fmt;

use slotmap::SlotMap;

use crate::color::Color;
use crate::config::EngineConfig;
use crate::container::{max_drag_offset, zoom_delta, Container, ContainerConfig};
use crate::elements::{Shape, ShapeKind, TextureObject};
use crate::errors::{Error, Result};
use crate::events::{Claim, EventKind, EventRegistry, Subscribers};
use crate::id::{FontId, NodeId};
use crate::math::{BoundingBox, Vector2};
use crate::node::{Node, NodeConfig, NodeKind, ZoomLimits};
use crate::polyline::{clip_runs, Polyline};
use crate::render_commands::{self, RenderCommand, RenderCommandConfig};
use crate::text::{FontRegistry, TextMeasurer, TextObject};
use crate::transform::{validate_then_commit, Commit, Zoom};

const BORDER_THICKNESS: f32 = 1.0;

pub struct Scene {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Top-level nodes.
    roots: EventRegistry,
    fonts: FontRegistry,
    measurer: Box<dyn TextMeasurer>,
    config: EngineConfig,
    /// Current window size over the baseline window.
    scale: Vector2,
    last_zoom: Option<Commit>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("fonts", &self.fonts)
            .field("config", &self.config)
            .field("scale", &self.scale)
            .field("last_zoom", &self.last_zoom)
            .finish_non_exhaustive()
    }
}

/// Re-measures dirty text and adopts the measured size. Returns whether the
/// size was refreshed.
fn refresh_text(node: &mut Node, measurer: &dyn TextMeasurer) -> bool {
    let NodeKind::Text(text) = &mut node.kind else {
        return false;
    };
    if !text.is_dirty() {
        return false;
    }
    let size = text.remeasure(measurer);
    node.set_content_size(size);
    true
}

impl Scene {
    pub fn new(config: EngineConfig, measurer: impl TextMeasurer + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            nodes: SlotMap::with_key(),
            roots: EventRegistry::new(),
            fonts: FontRegistry::new(),
            measurer: Box::new(measurer),
            config,
            scale: Vector2::ONE,
            last_zoom: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Window scale applied by the last resize.
    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    /// Outcome of the most recent zoom, claimed or direct.
    pub fn last_zoom(&self) -> Option<Commit> {
        self.last_zoom
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in paint order.
    pub fn top_level(&self) -> Subscribers {
        self.roots.subscribers(EventKind::Draw)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::UnknownNode(id))
    }

    pub fn container(&self, id: NodeId) -> Result<&Container> {
        self.node(id)?.as_container().ok_or(Error::NotAContainer(id))
    }

    /// First node carrying `name`, in paint order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.top_level().ids().iter().find_map(|&id| self.find_in(id, name))
    }

    fn find_in(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if node.name() == Some(name) {
            return Some(id);
        }
        node.as_container()?
            .events
            .subscribers(EventKind::Draw)
            .ids()
            .iter()
            .find_map(|&child| self.find_in(child, name))
    }

    pub fn add_container(&mut self, parent: Option<NodeId>, config: ContainerConfig) -> Result<NodeId> {
        let kind = NodeKind::Container(Container::new(&config));
        self.insert(parent, config.node, kind)
    }

    pub fn add_shape(&mut self, parent: Option<NodeId>, config: NodeConfig, shape: Shape) -> Result<NodeId> {
        self.insert(parent, config, NodeKind::Shape(shape))
    }

    pub fn add_polyline(&mut self, parent: Option<NodeId>, config: NodeConfig, line: Polyline) -> Result<NodeId> {
        self.insert(parent, config, NodeKind::Polyline(line))
    }

    /// The text box takes its size from the measured content; only the
    /// position of `config` is used.
    pub fn add_text(&mut self, parent: Option<NodeId>, config: NodeConfig, text: TextObject) -> Result<NodeId> {
        if !self.fonts.contains(text.font_id()) {
            return Err(Error::UnknownFont(text.font_id()));
        }
        self.insert(parent, config, NodeKind::Text(text))
    }

    /// The texture box takes its size from the texture's sizing mode; only
    /// the position of `config` is used.
    pub fn add_texture(&mut self, parent: Option<NodeId>, config: NodeConfig, texture: TextureObject) -> Result<NodeId> {
        self.insert(parent, config, NodeKind::Texture(texture))
    }

    fn insert(&mut self, parent: Option<NodeId>, config: NodeConfig, mut kind: NodeKind) -> Result<NodeId> {
        let (frame, frame_offset) = match parent {
            Some(parent) => {
                let node = self.node(parent)?;
                let container = node.as_container().ok_or(Error::NotAContainer(parent))?;
                (node.baseline().dimensions(), node.frame_offset() + container.drag_offset())
            }
            None => (self.config.window, Vector2::ZERO),
        };
        let requested = config
            .bounds
            .unwrap_or_else(|| BoundingBox::from_parts(Vector2::ZERO, frame));
        let baseline = match &mut kind {
            NodeKind::Text(text) => BoundingBox::from_parts(requested.position(), text.remeasure(self.measurer.as_ref())),
            NodeKind::Texture(texture) => BoundingBox::from_parts(requested.position(), texture.resolve_size(frame)),
            NodeKind::Polyline(line) => {
                line.prepare(self.config.resample_count);
                requested
            }
            NodeKind::Container(_) | NodeKind::Shape(_) => requested,
        };
        let limits = match kind {
            NodeKind::Container(_) => ZoomLimits::new(self.config.min_container_size, None),
            _ => ZoomLimits::UNBOUNDED,
        };
        let label = kind.label();

        let mut node = Node::new(config, baseline, parent, limits, kind);
        node.set_frame_offset(frame_offset);
        let id = self.nodes.insert(node);
        match self.parent_container_mut(parent) {
            Some(container) => container.attach(id),
            None => self.roots.subscribe_all(id),
        }
        self.rescale_node(id, self.scale.x, self.scale.y);
        tracing::debug!(?id, ?parent, kind = label, "attached node");
        Ok(id)
    }

    /// Removes `id` and its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id)?.parent();
        match self.parent_container_mut(parent) {
            Some(container) => container.detach(id),
            None => self.roots.unsubscribe(id),
        }
        let removed = self.drop_subtree(id);
        tracing::debug!(?id, removed, "removed subtree");
        Ok(())
    }

    fn drop_subtree(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.remove(id) else {
            return 0;
        };
        match node.kind {
            NodeKind::Container(container) => {
                1 + container
                    .children
                    .iter()
                    .map(|&child| self.drop_subtree(child))
                    .sum::<usize>()
            }
            _ => 1,
        }
    }

    fn parent_container_mut(&mut self, parent: Option<NodeId>) -> Option<&mut Container> {
        self.nodes.get_mut(parent?)?.as_container_mut()
    }

    fn parent_frame(&self, id: NodeId) -> Option<(Vector2, bool)> {
        let parent = self.nodes.get(id)?.parent()?;
        self.nodes
            .get(parent)
            .map(|parent| (parent.position(), parent.rescale_enabled()))
    }

    /// Resizes the scene for a window of `width` x `height`.
    pub fn rescale_all(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            tracing::warn!(width, height, "ignoring resize to a non-positive window");
            return;
        }
        let window = self.config.window;
        self.scale = Vector2::new(width / window.width, height / window.height);
        let Vector2 { x: scale_x, y: scale_y } = self.scale;
        tracing::trace!(scale_x, scale_y, nodes = self.nodes.len(), "rescaling scene");
        self.roots
            .subscribers(EventKind::Resize)
            .broadcast(|id| self.rescale_node(id, scale_x, scale_y));
    }

    /// Recomputes `id` and its subtree from their baselines.
    pub fn rescale_node(&mut self, id: NodeId, scale_x: f32, scale_y: f32) {
        let parent = self.parent_frame(id);
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        refresh_text(node, self.measurer.as_ref());
        node.rescale(scale_x, scale_y, parent);
        let children = node
            .as_container()
            .map(|container| container.events.subscribers(EventKind::Resize));
        self.after_geometry_change(id);
        if let Some(children) = children {
            children.broadcast(|child| self.rescale_node(child, scale_x, scale_y));
        }
    }

    /// Brings caches in line with a node's new size: leaf geometry, and the
    /// pan offset of a container whose pan range changed.
    pub(crate) fn after_geometry_change(&mut self, id: NodeId) {
        let (min_stroke, margin) = (self.config.min_stroke, self.config.drag_margin);
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.refit(min_stroke);
        let size = node.size();
        let Some(container) = node.as_container_mut() else {
            return;
        };
        let current = container.drag_offset();
        let applied = container.set_drag_offset(current, max_drag_offset(size, margin));
        if applied != Vector2::ZERO {
            tracing::debug!(?id, ?applied, "pan offset re-clamped");
            self.shift_contents(id, applied);
        }
    }

    /// Offers a scroll at screen point `at` to the scene. The deepest
    /// zoomable container under the point claims it.
    pub fn offer_zoom(&mut self, at: Vector2, scroll: Vector2) -> Claim {
        self.roots
            .subscribers(EventKind::Zoom)
            .offer(|id| self.zoom_at(id, at, scroll))
    }

    fn zoom_at(&mut self, id: NodeId, at: Vector2, scroll: Vector2) -> Claim {
        let Some(node) = self.nodes.get(id).filter(|node| node.is_visible()) else {
            return Claim::NotClaimed;
        };
        let Some(container) = node.as_container() else {
            return Claim::NotClaimed;
        };
        let takes = container.is_zoomable() && node.screen_bounds().contains(at);
        let children = container.events.subscribers(EventKind::Zoom);
        if children.offer(|child| self.zoom_at(child, at, scroll)).is_claimed() {
            return Claim::Claimed;
        }
        if !takes {
            return Claim::NotClaimed;
        }
        let factor = zoom_delta(scroll, &self.config);
        let _ = self.apply_zoom(id, Zoom::uniform(factor));
        Claim::Claimed
    }

    /// Zooms container `id` and its subtree by `factor`, regardless of the
    /// container's zoomable flag. The factor is used as given.
    pub fn zoom_by(&mut self, id: NodeId, factor: f32) -> Result<Commit> {
        self.container(id)?;
        Ok(self.apply_zoom(id, Zoom::uniform(factor)))
    }

    fn apply_zoom(&mut self, id: NodeId, zoom: Zoom) -> Commit {
        let outcome = validate_then_commit(self, id, &zoom);
        match outcome {
            Commit::Committed => {
                let size = self.nodes.get(id).map(Node::size);
                tracing::debug!(?id, factor = zoom.factor_x, ?size, "zoom committed");
            }
            Commit::Rejected { node } => {
                tracing::debug!(?id, factor = zoom.factor_x, refused_by = ?node, "zoom rejected");
            }
        }
        self.last_zoom = Some(outcome);
        outcome
    }

    /// Offers pointer motion at screen point `at` to the scene. The deepest
    /// container under the point that can pan along some axis claims it.
    pub fn offer_drag(&mut self, at: Vector2, delta: Vector2) -> Claim {
        self.roots
            .subscribers(EventKind::Drag)
            .offer(|id| self.drag_at(id, at, delta))
    }

    fn drag_at(&mut self, id: NodeId, at: Vector2, delta: Vector2) -> Claim {
        let Some(node) = self.nodes.get(id).filter(|node| node.is_visible()) else {
            return Claim::NotClaimed;
        };
        let Some(container) = node.as_container() else {
            return Claim::NotClaimed;
        };
        let gated = container.gate_drag(delta).filter(|_| node.screen_bounds().contains(at));
        let children = container.events.subscribers(EventKind::Drag);
        if children.offer(|child| self.drag_at(child, at, delta)).is_claimed() {
            return Claim::Claimed;
        }
        match gated {
            Some(delta) => {
                self.pan(id, delta);
                Claim::Claimed
            }
            None => Claim::NotClaimed,
        }
    }

    /// Pans container `id` by `(dx, dy)`, dropping the axes it cannot pan
    /// along. `NotClaimed` when it cannot pan at all.
    pub fn drag_by(&mut self, id: NodeId, dx: f32, dy: f32) -> Result<Claim> {
        let Some(delta) = self.container(id)?.gate_drag(Vector2::new(dx, dy)) else {
            return Ok(Claim::NotClaimed);
        };
        self.pan(id, delta);
        Ok(Claim::Claimed)
    }

    fn pan(&mut self, id: NodeId, delta: Vector2) -> Vector2 {
        let margin = self.config.drag_margin;
        let Some(node) = self.nodes.get_mut(id) else {
            return Vector2::ZERO;
        };
        let bound = max_drag_offset(node.size(), margin);
        let Some(container) = node.as_container_mut() else {
            return Vector2::ZERO;
        };
        let target = container.drag_offset() + delta;
        let applied = container.set_drag_offset(target, bound);
        tracing::debug!(?id, offset = ?container.drag_offset(), ?applied, "drag applied");
        if applied != Vector2::ZERO {
            self.shift_contents(id, applied);
        }
        applied
    }

    /// Moves the drawn frame of everything inside container `id`.
    fn shift_contents(&mut self, id: NodeId, delta: Vector2) {
        let Some(children) = self
            .nodes
            .get(id)
            .and_then(Node::as_container)
            .map(|container| container.events.subscribers(EventKind::ApplyDrag))
        else {
            return;
        };
        children.broadcast(|child| {
            if let Some(node) = self.nodes.get_mut(child) {
                node.shift_frame(delta);
                self.shift_contents(child, delta);
            }
        });
    }

    /// Replaces the text of a text node. It is re-measured on the next draw.
    pub fn update_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(object) => {
                object.set_text(text);
                Ok(())
            }
            _ => Err(Error::WrongKind(id, "text")),
        }
    }

    pub fn set_font(&mut self, id: NodeId, font: Option<FontId>, font_size: Option<u16>) -> Result<()> {
        if let Some(font) = font.filter(|font| !self.fonts.contains(*font)) {
            return Err(Error::UnknownFont(font));
        }
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(object) => {
                object.set_font(font, font_size);
                Ok(())
            }
            _ => Err(Error::WrongKind(id, "text")),
        }
    }

    /// Replaces the control points of a polyline and re-places it.
    pub fn set_polyline_points<P: Into<Vector2>>(&mut self, id: NodeId, points: impl IntoIterator<Item = P>) -> Result<()> {
        let points: Vec<Vector2> = points.into_iter().map(Into::into).collect();
        let min_stroke = self.config.min_stroke;
        let node = self.node_mut(id)?;
        let NodeKind::Polyline(line) = &mut node.kind else {
            return Err(Error::WrongKind(id, "polyline"));
        };
        line.set_control_points(points);
        node.refit(min_stroke);
        Ok(())
    }

    /// Moves a shape's center, in the node's baseline box coordinates.
    pub fn move_shape(&mut self, id: NodeId, center: impl Into<Vector2>) -> Result<()> {
        let min_stroke = self.config.min_stroke;
        let node = self.node_mut(id)?;
        let NodeKind::Shape(shape) = &mut node.kind else {
            return Err(Error::WrongKind(id, "shape"));
        };
        shape.set_center(center.into());
        node.refit(min_stroke);
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.node_mut(id)?.set_visible(visible);
        Ok(())
    }

    pub fn set_border(&mut self, id: NodeId, border: Option<Color>) -> Result<()> {
        self.node_mut(id)?.set_border(border);
        Ok(())
    }

    pub fn set_zoom_limits(&mut self, id: NodeId, limits: ZoomLimits) -> Result<()> {
        self.node_mut(id)?.set_zoom_limits(limits);
        Ok(())
    }

    /// Emits the frame's primitives in paint order, in screen coordinates.
    pub fn draw(&mut self) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        self.roots
            .subscribers(EventKind::Draw)
            .broadcast(|id| self.draw_node(id, &mut commands));
        tracing::trace!(commands = commands.len(), "scene drawn");
        commands
    }

    /// Bounds children of `id`'s parent are clipped to, if it clips.
    fn clip_bounds(&self, id: NodeId) -> Option<BoundingBox> {
        let parent = self.nodes.get(self.nodes.get(id)?.parent()?)?;
        match parent.as_container()?.overflow() {
            true => None,
            false => Some(parent.screen_bounds()),
        }
    }

    fn draw_node(&mut self, id: NodeId, out: &mut Vec<RenderCommand>) {
        let parent = self.parent_frame(id);
        let clip = self.clip_bounds(id);
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.is_visible() {
            return;
        }
        if refresh_text(node, self.measurer.as_ref()) {
            node.resolve_position(parent.map_or(Vector2::ZERO, |(origin, _)| origin));
        }

        let bounds = node.screen_bounds();
        let origin = bounds.position();
        let mut children = None;
        match &node.kind {
            NodeKind::Container(container) => {
                if let Some(color) = container.background() {
                    out.push(RenderCommand::new(
                        id,
                        bounds,
                        RenderCommandConfig::Rectangle(render_commands::Rectangle { color }),
                    ));
                }
                children = Some(container.events.subscribers(EventKind::Draw));
            }
            NodeKind::Shape(shape) => {
                let center = origin + shape.placed_center();
                if clip.map_or(true, |clip| clip.contains(center)) {
                    out.push(match shape.kind() {
                        ShapeKind::FilledCircle => RenderCommand::circle(id, center, shape.placed_radius(), shape.color()),
                        ShapeKind::OutlinedCircle { .. } => RenderCommand::ring(
                            id,
                            center,
                            shape.placed_radius(),
                            shape.placed_thickness(),
                            shape.color(),
                        ),
                    });
                }
            }
            NodeKind::Polyline(line) => {
                let points = line.placed_points().iter().map(|point| *point + origin);
                let (color, thickness) = (line.stroke_color(), line.current_thickness());
                match clip {
                    Some(clip) => out.extend(
                        clip_runs(points, clip)
                            .into_iter()
                            .filter_map(|run| RenderCommand::polyline(id, run, color, thickness)),
                    ),
                    None => out.extend(RenderCommand::polyline(id, points.collect(), color, thickness)),
                }
            }
            NodeKind::Text(text) => out.push(RenderCommand::new(
                id,
                bounds,
                RenderCommandConfig::Text(render_commands::Text {
                    text: text.text().to_owned(),
                    color: text.text_color(),
                    font_id: text.font_id(),
                    font_size: text.size(),
                    position: origin,
                }),
            )),
            NodeKind::Texture(texture) => out.push(RenderCommand::new(
                id,
                bounds,
                RenderCommandConfig::Image(render_commands::Image {
                    asset: texture.asset(),
                    tint: texture.tint_color(),
                }),
            )),
        }
        if let Some(color) = node.border() {
            out.push(RenderCommand::new(
                id,
                bounds,
                RenderCommandConfig::RectangleOutline(render_commands::RectangleOutline {
                    color,
                    thickness: BORDER_THICKNESS,
                }),
            ));
        }
        if let Some(children) = children {
            children.broadcast(|child| self.draw_node(child, out));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::anchor::Anchor;
    use crate::elements::Asset;
    use crate::math::Dimensions;
    use crate::text::FixedAdvanceMeasurer;

    fn scene() -> Scene {
        Scene::new(EngineConfig::default(), FixedAdvanceMeasurer::default()).unwrap()
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{a} != {b}");
    }

    fn kinds(commands: &[RenderCommand]) -> Vec<&'static str> {
        commands
            .iter()
            .map(|command| match command.config {
                RenderCommandConfig::Rectangle(_) => "rect",
                RenderCommandConfig::RectangleOutline(_) => "outline",
                RenderCommandConfig::Polyline(_) => "line",
                RenderCommandConfig::Circle(_) => "circle",
                RenderCommandConfig::CircleOutline(_) => "ring",
                RenderCommandConfig::Image(_) => "image",
                RenderCommandConfig::Text(_) => "text",
            })
            .collect()
    }

    #[test]
    fn attaching_under_a_leaf_fails() {
        let mut scene = scene();
        let dot = scene
            .add_shape(None, NodeConfig::new(0.0, 0.0, 10.0, 10.0), Shape::circle((5.0, 5.0), 2.0, Color::RED))
            .unwrap();
        let err = scene.add_container(Some(dot), ContainerConfig::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(err, Err(Error::NotAContainer(dot)));
        assert!(matches!(scene.update_text(dot, "x"), Err(Error::WrongKind(_, "text"))));
    }

    #[test]
    fn remove_drops_subtree() {
        let mut scene = scene();
        let outer = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let inner = scene.add_container(Some(outer), ContainerConfig::fill()).unwrap();
        let dot = scene
            .add_shape(Some(inner), NodeConfig::fill(), Shape::circle((1.0, 1.0), 1.0, Color::RED))
            .unwrap();
        let keep = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 10.0, 10.0)).unwrap();

        scene.remove(outer).unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.node(dot).err(), Some(Error::UnknownNode(dot)));
        assert_eq!(scene.top_level().ids(), &[keep]);
        assert_eq!(scene.remove(outer), Err(Error::UnknownNode(outer)));
    }

    #[test]
    fn fill_takes_parent_baseline_box() {
        let mut scene = scene();
        let outer = scene.add_container(None, ContainerConfig::new(100.0, 50.0, 300.0, 200.0).anchor(Anchor::TopLeft)).unwrap();
        let inner = scene.add_container(Some(outer), ContainerConfig::fill().anchor(Anchor::TopLeft)).unwrap();
        let inner = scene.node(inner).unwrap();
        assert_eq!(inner.size(), Dimensions::new(300.0, 200.0));
        assert_eq!(inner.position(), Vector2::new(100.0, 50.0));
    }

    #[test]
    fn dirty_text_is_remeasured_and_re_anchored() {
        let mut scene = scene();
        let hud = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 200.0, 100.0).anchor(Anchor::TopLeft)).unwrap();
        let label = scene
            .add_text(Some(hud), NodeConfig::at(100.0, 50.0), TextObject::new("P1").font_size(10))
            .unwrap();
        // Two glyphs at 6px, centered on (100 + 6, 50 + 5).
        assert_close(scene.node(label).unwrap().size().width, 12.0);
        let center = scene.node(label).unwrap().anchor_point();

        scene.update_text(label, "P1 +0.4").unwrap();
        let commands = scene.draw();
        let node = scene.node(label).unwrap();
        assert_close(node.size().width, 42.0);
        assert_close(node.size().height, 10.0);
        assert_close(node.anchor_point().x, center.x);
        assert_close(node.anchor_point().y, center.y);
        match &commands[0].config {
            RenderCommandConfig::Text(text) => {
                assert_eq!(text.text, "P1 +0.4");
                assert_close(text.position.x, node.position().x);
                assert_close(text.position.y, node.position().y);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn unknown_font_is_rejected() {
        let mut scene = scene();
        let label = scene.add_text(None, NodeConfig::at(0.0, 0.0), TextObject::new("x")).unwrap();
        let stray = FontId(7);
        assert_eq!(scene.set_font(label, Some(stray), None), Err(Error::UnknownFont(stray)));
        let wide = scene.fonts_mut().register("wide").unwrap();
        scene.set_font(label, Some(wide), Some(24)).unwrap();
    }

    #[test]
    fn draw_order_and_visibility() {
        let mut scene = scene();
        let panel = scene
            .add_container(
                None,
                ContainerConfig::new(0.0, 0.0, 200.0, 200.0).background(Color::GRAY).border(Color::WHITE).overflow(true),
            )
            .unwrap();
        scene
            .add_texture(Some(panel), NodeConfig::at(0.0, 0.0), TextureObject::new(Asset::Path("logo.png")))
            .unwrap();
        let hidden = scene.add_container(Some(panel), ContainerConfig::fill().background(Color::RED)).unwrap();
        scene
            .add_shape(Some(hidden), NodeConfig::fill(), Shape::circle((10.0, 10.0), 4.0, Color::RED))
            .unwrap();
        scene.set_visible(hidden, false).unwrap();

        assert_eq!(kinds(&scene.draw()), vec!["rect", "outline", "image"]);
        scene.set_visible(hidden, true).unwrap();
        assert_eq!(kinds(&scene.draw()), vec!["rect", "outline", "image", "rect", "circle"]);
    }

    #[test]
    fn shapes_outside_clipping_parent_are_skipped() {
        let mut scene = scene();
        let panel = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 100.0, 100.0).anchor(Anchor::TopLeft)).unwrap();
        scene
            .add_shape(Some(panel), NodeConfig::fill(), Shape::circle((150.0, 50.0), 3.0, Color::RED))
            .unwrap();
        scene
            .add_shape(Some(panel), NodeConfig::fill(), Shape::ring((50.0, 50.0), 3.0, 1.0, Color::RED))
            .unwrap();
        assert_eq!(kinds(&scene.draw()), vec!["ring"]);
    }

    #[test]
    fn late_children_inherit_the_pan() {
        let mut scene = scene();
        let map = scene
            .add_container(None, ContainerConfig::new(0.0, 0.0, 400.0, 400.0).scrollable(true, true))
            .unwrap();
        assert_eq!(scene.drag_by(map, 30.0, -20.0).unwrap(), Claim::Claimed);
        let marker = scene.add_container(Some(map), ContainerConfig::new(0.0, 0.0, 60.0, 60.0)).unwrap();
        assert_eq!(scene.node(marker).unwrap().frame_offset(), Vector2::new(30.0, -20.0));
        assert_eq!(scene.node(map).unwrap().frame_offset(), Vector2::ZERO);
    }

    #[test]
    fn shrinking_window_re_clamps_pan() {
        let mut scene = scene();
        let map = scene
            .add_container(None, ContainerConfig::new(0.0, 0.0, 400.0, 400.0).scrollable(true, true))
            .unwrap();
        let child = scene.add_container(Some(map), ContainerConfig::fill()).unwrap();
        assert_eq!(scene.drag_by(map, 500.0, 0.0).unwrap(), Claim::Claimed);
        assert_eq!(scene.container(map).unwrap().drag_offset(), Vector2::new(350.0, 0.0));

        scene.rescale_all(640.0, 360.0);
        assert_eq!(scene.container(map).unwrap().drag_offset(), Vector2::new(150.0, 0.0));
        assert_eq!(scene.node(child).unwrap().frame_offset(), Vector2::new(150.0, 0.0));
    }

    #[test]
    fn offer_goes_to_deepest_capable_container() {
        let mut scene = scene();
        let outer = scene
            .add_container(None, ContainerConfig::new(0.0, 0.0, 400.0, 400.0).anchor(Anchor::TopLeft).zoomable(true))
            .unwrap();
        let fixed = scene
            .add_container(Some(outer), ContainerConfig::new(0.0, 0.0, 100.0, 100.0).anchor(Anchor::TopLeft))
            .unwrap();
        let at = Vector2::new(50.0, 50.0);

        // `fixed` is hit but cannot zoom, so `outer` takes the scroll.
        assert_eq!(scene.offer_zoom(at, Vector2::new(0.0, 1.0)), Claim::Claimed);
        assert_eq!(scene.last_zoom(), Some(Commit::Committed));
        assert!((scene.node(outer).unwrap().size().width - 440.0).abs() < 1e-3);
        assert!((scene.node(fixed).unwrap().size().width - 110.0).abs() < 1e-3);

        assert_eq!(scene.offer_zoom(Vector2::new(900.0, 900.0), Vector2::new(0.0, 1.0)), Claim::NotClaimed);
        assert_eq!(scene.offer_drag(at, Vector2::new(5.0, 5.0)), Claim::NotClaimed);
    }

    #[test]
    fn shape_on_a_zero_size_node_follows_window_scale() {
        let mut scene = scene();
        let dot = scene
            .add_shape(None, NodeConfig::at(100.0, 100.0), Shape::circle((5.0, 5.0), 10.0, Color::RED))
            .unwrap();
        let circle = |commands: &[RenderCommand]| match &commands[0].config {
            RenderCommandConfig::Circle(circle) => (circle.center, circle.radius),
            other => panic!("expected circle, got {other:?}"),
        };

        let (center, radius) = circle(&scene.draw());
        assert_close(center.x, 105.0);
        assert_close(center.y, 105.0);
        assert_close(radius, 10.0);

        scene.rescale_all(2560.0, 1440.0);
        let (center, radius) = circle(&scene.draw());
        assert_close(center.x, 210.0);
        assert_close(center.y, 210.0);
        assert_close(radius, 20.0);
        assert_eq!(scene.node(dot).unwrap().box_scale(), Vector2::new(2.0, 2.0));
    }

    #[test]
    fn polyline_on_a_zero_size_node_follows_window_scale() {
        let mut scene = scene();
        scene
            .add_polyline(
                None,
                NodeConfig::at(0.0, 0.0).anchor(Anchor::TopLeft),
                Polyline::new([(0.0, 0.0), (10.0, 20.0)]).thickness(3.0).resample_count(2),
            )
            .unwrap();
        scene.rescale_all(1920.0, 1080.0);
        match &scene.draw()[0].config {
            RenderCommandConfig::Polyline(line) => {
                assert_close(line.points[1].x, 15.0);
                assert_close(line.points[1].y, 30.0);
                assert_close(line.thickness, 4.5);
            }
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn find_by_name() {
        let mut scene = scene();
        let track = scene
            .add_container(None, ContainerConfig::new(0.0, 0.0, 10.0, 10.0).name("track"))
            .unwrap();
        assert_eq!(scene.find("track"), Some(track));
        assert_eq!(scene.find("leaderboard"), None);
    }

    #[test]
    fn find_follows_paint_order_after_slot_reuse() {
        let mut scene = scene();
        let filler = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let first = scene
            .add_container(None, ContainerConfig::new(0.0, 0.0, 10.0, 10.0).name("sector"))
            .unwrap();
        scene.remove(filler).unwrap();
        // Takes the freed slot ahead of `first` in the arena.
        let second = scene
            .add_container(None, ContainerConfig::new(0.0, 0.0, 10.0, 10.0).name("sector"))
            .unwrap();
        let nested = scene
            .add_shape(Some(second), NodeConfig::fill().name("apex"), Shape::circle((1.0, 1.0), 1.0, Color::RED))
            .unwrap();
        assert_eq!(scene.find("sector"), Some(first));
        assert_eq!(scene.find("apex"), Some(nested));
    }
}
