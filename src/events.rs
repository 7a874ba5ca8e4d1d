//! Per-kind subscriber lists used to fan input and lifecycle passes out
//! through the tree.
//!
//! Every node subscribes to all six kinds on its parent (or on the scene
//! root) when it is attached. `Zoom` and `Drag` are offered: subscribers are
//! asked in registration order until one claims the event. The other kinds
//! are broadcast to every subscriber.

use smallvec::SmallVec;

use crate::id::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    Resize,
    Draw,
    Zoom,
    ApplyZoom,
    Drag,
    ApplyDrag,
}

/// How an event travels to a subscriber list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Stops at the first subscriber that claims it.
    Offer,
    /// Reaches every subscriber.
    Broadcast,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Resize,
        EventKind::Draw,
        EventKind::Zoom,
        EventKind::ApplyZoom,
        EventKind::Drag,
        EventKind::ApplyDrag,
    ];

    pub const fn dispatch(self) -> Dispatch {
        match self {
            EventKind::Zoom | EventKind::Drag => Dispatch::Offer,
            _ => Dispatch::Broadcast,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Result of offering an event to a subscriber.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    Claimed,
    NotClaimed,
}

impl Claim {
    pub fn is_claimed(self) -> bool {
        self == Claim::Claimed
    }
}

type SubscriberList = SmallVec<[NodeId; 8]>;

#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    lists: [SubscriberList; EventKind::ALL.len()],
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, id: NodeId) {
        self.lists[kind.index()].push(id);
    }

    /// Registers `id` for every event kind.
    pub fn subscribe_all(&mut self, id: NodeId) {
        for kind in EventKind::ALL {
            self.subscribe(kind, id);
        }
    }

    /// Drops `id` from every list.
    pub fn unsubscribe(&mut self, id: NodeId) {
        for list in &mut self.lists {
            list.retain(|subscriber| *subscriber != id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(|list| list.is_empty())
    }

    /// Snapshot of the subscribers for `kind`, detached from the registry so
    /// handlers may mutate the tree while it is walked.
    pub fn subscribers(&self, kind: EventKind) -> Subscribers {
        Subscribers {
            kind,
            ids: self.lists[kind.index()].clone(),
        }
    }
}

/// Detached subscriber list for one event kind.
#[derive(Debug, Clone)]
pub struct Subscribers {
    kind: EventKind,
    ids: SubscriberList,
}

impl Subscribers {
    pub fn empty(kind: EventKind) -> Self {
        Self {
            kind,
            ids: SubscriberList::new(),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Asks subscribers in order until one claims.
    pub fn offer(&self, mut handler: impl FnMut(NodeId) -> Claim) -> Claim {
        debug_assert_eq!(self.kind.dispatch(), Dispatch::Offer, "{:?} is not an offered event", self.kind);
        for &id in &self.ids {
            if handler(id).is_claimed() {
                return Claim::Claimed;
            }
        }
        Claim::NotClaimed
    }

    pub fn broadcast(&self, mut handler: impl FnMut(NodeId)) {
        debug_assert_eq!(self.kind.dispatch(), Dispatch::Broadcast, "{:?} is not a broadcast event", self.kind);
        for &id in &self.ids {
            handler(id);
        }
    }
}
