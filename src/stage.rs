//! The root of a scene: owns it, tracks the window, and turns raw window
//! input into scene passes.

use std::ops::{Deref, DerefMut};

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::events::Claim;
use crate::engine::Scene;
use crate::layout::Margin;
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::render_commands::RenderCommand;
use crate::text::TextMeasurer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// A scene plus the window state that drives it.
///
/// Dereferences to [`Scene`] for building and querying the tree.
#[derive(Debug)]
pub struct Stage {
    scene: Scene,
    window: Dimensions,
    drag_button: PointerButton,
    dragging: bool,
}

impl Deref for Stage {
    type Target = Scene;

    fn deref(&self) -> &Scene {
        &self.scene
    }
}

impl DerefMut for Stage {
    fn deref_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

impl Stage {
    pub fn new(config: EngineConfig, measurer: impl TextMeasurer + 'static) -> Result<Self> {
        let window = config.window;
        let scene = Scene::new(config, measurer)?;
        tracing::info!(width = window.width, height = window.height, "stage created");
        Ok(Self {
            scene,
            window,
            drag_button: PointerButton::Left,
            dragging: false,
        })
    }

    /// Button whose press starts panning. Left by default.
    #[inline]
    pub fn drag_button(mut self, button: PointerButton) -> Self {
        self.drag_button = button;
        self
    }

    /// Current window size.
    pub fn window(&self) -> Dimensions {
        self.window
    }

    /// Bounds of `margin` inside the baseline window, for placing top-level
    /// containers by their distance to the window edges.
    pub fn margin_bounds(&self, margin: Margin) -> BoundingBox {
        margin.bounds_in(self.scene.config().window)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.window = Dimensions::new(width, height);
        }
        self.scene.rescale_all(width, height);
    }

    /// Mouse wheel at `(x, y)`.
    pub fn scroll(&mut self, x: f32, y: f32, dx: f32, dy: f32) -> Claim {
        self.scene.offer_zoom(Vector2::new(x, y), Vector2::new(dx, dy))
    }

    pub fn pointer_press(&mut self, button: PointerButton) {
        if button == self.drag_button {
            self.dragging = true;
        }
    }

    pub fn pointer_release(&mut self, button: PointerButton) {
        if button == self.drag_button {
            self.dragging = false;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer moved by `(dx, dy)` to `(x, y)`. Only pans while the drag
    /// button is held.
    pub fn pointer_motion(&mut self, x: f32, y: f32, dx: f32, dy: f32) -> Claim {
        if !self.dragging {
            return Claim::NotClaimed;
        }
        self.scene.offer_drag(Vector2::new(x, y), Vector2::new(dx, dy))
    }

    pub fn draw(&mut self) -> Vec<RenderCommand> {
        self.scene.draw()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::anchor::Anchor;
    use crate::container::ContainerConfig;
    use crate::errors::Error;
    use crate::text::FixedAdvanceMeasurer;

    fn stage() -> Stage {
        Stage::new(EngineConfig::default(), FixedAdvanceMeasurer::default()).unwrap()
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = EngineConfig::default().window(0.0, 720.0);
        assert!(matches!(
            Stage::new(config, FixedAdvanceMeasurer::default()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn motion_pans_only_while_latched() {
        let mut stage = stage();
        let map = stage
            .add_container(
                None,
                ContainerConfig::new(0.0, 0.0, 400.0, 400.0)
                    .anchor(Anchor::TopLeft)
                    .scrollable(true, true),
            )
            .unwrap();

        assert_eq!(stage.pointer_motion(10.0, 10.0, 5.0, 5.0), Claim::NotClaimed);
        stage.pointer_press(PointerButton::Right);
        assert!(!stage.is_dragging());
        stage.pointer_press(PointerButton::Left);
        assert_eq!(stage.pointer_motion(10.0, 10.0, 5.0, 5.0), Claim::Claimed);
        stage.pointer_release(PointerButton::Left);
        assert_eq!(stage.pointer_motion(10.0, 10.0, 5.0, 5.0), Claim::NotClaimed);
        assert_eq!(stage.container(map).unwrap().drag_offset(), Vector2::new(5.0, 5.0));
    }

    #[test]
    fn margin_placement() {
        let mut stage = stage();
        let bounds = stage.margin_bounds(Margin::fraction(0.1, 0.1, 0.05, 0.05));
        let hud = stage
            .add_container(None, ContainerConfig::from(bounds).anchor(Anchor::TopLeft))
            .unwrap();
        let node = stage.node(hud).unwrap();
        assert!((node.position().x - 64.0).abs() < 1e-3);
        assert!((node.position().y - 72.0).abs() < 1e-3);
        assert!((node.size().width - 1152.0).abs() < 1e-3);
        assert!((node.size().height - 576.0).abs() < 1e-3);
    }

    #[test]
    fn resize_tracks_window() {
        let mut stage = stage();
        stage.resize(1920.0, 1080.0);
        assert_eq!(stage.window(), Dimensions::new(1920.0, 1080.0));
        assert_eq!(stage.scale(), Vector2::new(1.5, 1.5));
        stage.resize(-1.0, 10.0);
        assert_eq!(stage.scale(), Vector2::new(1.5, 1.5));
    }
}
