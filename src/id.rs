slotmap::new_key_type! {
    /// Handle to a node in a [`Scene`](crate::engine::Scene).
    ///
    /// Handles stay valid until the node (or one of its ancestors) is removed;
    /// a stale handle is reported as [`Error::UnknownNode`](crate::errors::Error::UnknownNode).
    pub struct NodeId;
}

/// Handle to a font registered in a [`FontRegistry`](crate::text::FontRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FontId(pub(crate) u16);

impl FontId {
    /// The backend's built-in font, always present.
    pub const DEFAULT: FontId = FontId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
