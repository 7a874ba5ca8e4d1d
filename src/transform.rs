//! All-or-nothing geometric transforms over a subtree.
//!
//! A transform is first checked against every node it would touch. Only when
//! all of them admit it is it applied, top-down, so a refused transform
//! leaves the scene exactly as it was.

use crate::engine::Scene;
use crate::events::{EventKind, Subscribers};
use crate::id::NodeId;
use crate::math::Vector2;
use crate::node::Node;

/// A change that can be validated and then committed across a subtree.
pub trait Transform {
    /// Subscriber list the commit walks.
    const CHANNEL: EventKind;

    fn admits(&self, node: &Node) -> bool;

    /// Applies the change to `node`, given the translation already applied
    /// to its parent. Returns the translation its children inherit.
    fn apply(&self, node: &mut Node, inherited: Vector2) -> Vector2;
}

/// Per-axis zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    pub factor_x: f32,
    pub factor_y: f32,
}

impl Zoom {
    pub const fn uniform(factor: f32) -> Self {
        Self {
            factor_x: factor,
            factor_y: factor,
        }
    }
}

impl Transform for Zoom {
    const CHANNEL: EventKind = EventKind::ApplyZoom;

    fn admits(&self, node: &Node) -> bool {
        node.admits_zoom(self.factor_x, self.factor_y)
    }

    fn apply(&self, node: &mut Node, inherited: Vector2) -> Vector2 {
        node.commit_zoom(self.factor_x, self.factor_y, inherited)
    }
}

/// Outcome of [`validate_then_commit`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Committed,
    /// Nothing changed; `node` is the first node (depth-first) that refused.
    Rejected { node: NodeId },
}

impl Commit {
    pub fn is_committed(self) -> bool {
        self == Commit::Committed
    }
}

pub fn validate_then_commit<T: Transform>(scene: &mut Scene, root: NodeId, transform: &T) -> Commit {
    if let Some(node) = first_refusal(scene, root, transform) {
        return Commit::Rejected { node };
    }
    commit(scene, root, transform, Vector2::ZERO);
    Commit::Committed
}

fn children<T: Transform>(node: &Node) -> Subscribers {
    node.as_container()
        .map(|container| container.events.subscribers(T::CHANNEL))
        .unwrap_or_else(|| Subscribers::empty(T::CHANNEL))
}

fn first_refusal<T: Transform>(scene: &Scene, id: NodeId, transform: &T) -> Option<NodeId> {
    let node = scene.nodes.get(id)?;
    if !transform.admits(node) {
        return Some(id);
    }
    children::<T>(node)
        .ids()
        .iter()
        .find_map(|&child| first_refusal(scene, child, transform))
}

fn commit<T: Transform>(scene: &mut Scene, id: NodeId, transform: &T, inherited: Vector2) {
    let Some(node) = scene.nodes.get_mut(id) else {
        return;
    };
    let shift = transform.apply(node, inherited);
    let children = children::<T>(node);
    scene.after_geometry_change(id);
    children.broadcast(|child| commit(scene, child, transform, shift));
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::EngineConfig;
    use crate::container::ContainerConfig;
    use crate::math::Dimensions;
    use crate::node::ZoomLimits;
    use crate::text::FixedAdvanceMeasurer;

    fn scene() -> Scene {
        Scene::new(EngineConfig::default(), FixedAdvanceMeasurer::default()).unwrap()
    }

    #[test]
    fn rejection_names_first_failing_node() {
        let mut scene = scene();
        let outer = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 400.0, 400.0)).unwrap();
        let ok = scene.add_container(Some(outer), ContainerConfig::new(0.0, 0.0, 200.0, 200.0)).unwrap();
        let tight = scene.add_container(Some(outer), ContainerConfig::new(0.0, 0.0, 60.0, 60.0)).unwrap();
        let small = scene.add_container(Some(ok), ContainerConfig::new(0.0, 0.0, 55.0, 55.0)).unwrap();

        let before: Vec<_> = [outer, ok, tight].iter().map(|&id| scene.nodes[id].bounds()).collect();
        let outcome = validate_then_commit(&mut scene, outer, &Zoom::uniform(0.5));
        // Depth-first: `ok`'s 55px child refuses before `tight` is reached.
        assert_eq!(outcome, Commit::Rejected { node: small });
        let after: Vec<_> = [outer, ok, tight].iter().map(|&id| scene.nodes[id].bounds()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn commit_reaches_whole_subtree() {
        let mut scene = scene();
        let outer = scene.add_container(None, ContainerConfig::new(0.0, 0.0, 400.0, 400.0)).unwrap();
        let inner = scene
            .add_container(
                Some(outer),
                ContainerConfig::new(0.0, 0.0, 100.0, 100.0).zoom_limits(ZoomLimits::UNBOUNDED),
            )
            .unwrap();
        let outcome = validate_then_commit(&mut scene, outer, &Zoom::uniform(1.5));
        assert_eq!(outcome, Commit::Committed);
        assert_eq!(scene.nodes[outer].size(), Dimensions::new(600.0, 600.0));
        assert_eq!(scene.nodes[inner].size(), Dimensions::new(150.0, 150.0));
        assert_eq!(scene.nodes[inner].zoom_scale(), Vector2::new(1.5, 1.5));
    }
}
