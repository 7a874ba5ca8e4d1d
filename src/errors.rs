use crate::id::{FontId, NodeId};

/// Errors raised while building or addressing a scene.
///
/// Refused zoom and drag gestures are not errors: they come back as
/// [`Claim`](crate::events::Claim) and [`Commit`](crate::transform::Commit) values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An anchor name outside the nine supported ones.
    #[error("unknown anchor `{0}`, expected one of: center, top_left, top_right, top_center, bottom_left, bottom_right, bottom_center, left_center, right_center")]
    UnknownAnchor(String),
    #[error("node {0:?} does not exist in this scene")]
    UnknownNode(NodeId),
    /// Children can only be attached under containers.
    #[error("node {0:?} is not a container")]
    NotAContainer(NodeId),
    /// The operation needs a node of another kind (e.g. a text update on a shape).
    #[error("node {0:?} is not a {1} node")]
    WrongKind(NodeId, &'static str),
    #[error("font {0:?} is not registered")]
    UnknownFont(FontId),
    #[error("a font named `{0}` is already registered")]
    DuplicateFont(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
