//! Hierarchical 2D layout for replay visualizations.
//!
//! A [`Stage`](stage::Stage) owns a tree of anchored, sized nodes (containers,
//! shapes, polylines, text and textures) authored against a baseline window.
//! Window resizes rescale the tree from its baselines, scroll zooms the
//! container under the pointer as one validated transaction, and dragging
//! pans a container's contents. Each frame the tree is flattened into
//! [`RenderCommand`](render_commands::RenderCommand)s in screen coordinates,
//! which [`renderer::render`] draws with macroquad.

pub mod align;
pub mod anchor;
pub mod color;
pub mod config;
pub mod container;
pub mod elements;
pub mod engine;
pub mod errors;
pub mod events;
pub mod id;
pub mod layout;
pub mod math;
pub mod node;
pub mod polyline;
pub mod prelude;
pub mod render_commands;
pub mod renderer;
pub mod stage;
pub mod text;
pub mod transform;

pub use color::Color;
pub use errors::{Error, Result};
