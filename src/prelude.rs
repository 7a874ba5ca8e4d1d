//! The pitwall prelude, a single import for building and driving a scene.
//!
//! ```rust
//! use pitwall::prelude::*;
//! ```

// Core types
pub use crate::config::EngineConfig;
pub use crate::engine::Scene;
pub use crate::errors::Error;
pub use crate::id::{FontId, NodeId};
pub use crate::stage::{PointerButton, Stage};

// Building blocks
pub use crate::container::ContainerConfig;
pub use crate::elements::{Asset, Shape, TextureObject, TextureSize};
pub use crate::layout::{Margin, MarginUnit};
pub use crate::math::{BoundingBox, Dimensions, Vector2};
pub use crate::node::{NodeConfig, ZoomLimits};
pub use crate::polyline::{PointMapping, Polyline};
pub use crate::text::{FixedAdvanceMeasurer, TextMeasurer, TextObject};

// Outcomes
pub use crate::events::Claim;
pub use crate::transform::Commit;

// Anchors, usable bare (`TopLeft`, `Center`, ...)
pub use crate::anchor::Anchor::{self, *};

// Backend
pub use crate::renderer::{render, FontSet, InputState, MacroquadMeasurer};

// Full macroquad prelude, with Color shadowed by pitwall's version
pub use macroquad::prelude::*;
pub use crate::color::Color;
// Explicit alias for when users need macroquad's Color
pub use macroquad::prelude::Color as MacroquadColor;
