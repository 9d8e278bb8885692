//! Pane identity and records.
//!
//! A pane is a node of the freeform layout tree. The tree is stored flat: each
//! record carries its parent pointer and the registry derives children from
//! those pointers. Identifiers are allocated monotonically and never reused,
//! so a stale [`PaneId`] can only ever miss, never alias a newer pane.

use std::fmt;

use freeform_core::geometry::{Axis, Insets};
use serde::{Deserialize, Serialize};

use crate::adapter::RelationshipToken;
use crate::error::PaneRejection;

/// Stable identifier for panes.
///
/// `0` is reserved for the tree root; children always receive larger values
/// than any pane that existed before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(u64);

impl PaneId {
    /// The root pane of every tree.
    pub const ROOT: Self = Self(0);

    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Return the next ID, or `None` on overflow.
    #[must_use]
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic ID allocator scoped to one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneIdAllocator {
    next: PaneId,
}

impl PaneIdAllocator {
    /// Start allocating from a known ID.
    #[must_use]
    pub const fn with_next(next: PaneId) -> Self {
        Self { next }
    }

    /// Peek at the next ID without consuming.
    #[must_use]
    pub const fn peek(&self) -> PaneId {
        self.next
    }

    /// Whether `count` more IDs can be handed out.
    #[must_use]
    pub fn can_allocate(&self, count: usize) -> bool {
        u64::try_from(count)
            .ok()
            .and_then(|count| self.next.0.checked_add(count))
            .is_some()
    }

    /// Allocate the next ID and advance.
    pub fn allocate(&mut self) -> Result<PaneId, PaneRejection> {
        let current = self.next;
        self.next = current
            .checked_next()
            .ok_or(PaneRejection::IdSpaceExhausted)?;
        Ok(current)
    }
}

impl Default for PaneIdAllocator {
    fn default() -> Self {
        Self { next: PaneId::ROOT }
    }
}

/// Where installed content sits inside its pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Center,
    Top,
    Bottom,
    Leading,
    Trailing,
    TopLeading,
    TopTrailing,
    BottomLeading,
    BottomTrailing,
}

/// How content is placed along one axis of its pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPlacement {
    /// Centered and kept within the inset bounds on both sides.
    CenterBounded,
    /// Centered only.
    Center,
    /// Pinned to the leading/top edge.
    Start,
    /// Pinned to the trailing/bottom edge.
    End,
}

impl Alignment {
    pub const ALL: [Self; 9] = [
        Self::Center,
        Self::Top,
        Self::Bottom,
        Self::Leading,
        Self::Trailing,
        Self::TopLeading,
        Self::TopTrailing,
        Self::BottomLeading,
        Self::BottomTrailing,
    ];

    /// Placement of content along `axis`.
    #[must_use]
    pub const fn placement(self, axis: Axis) -> AxisPlacement {
        match (self, axis) {
            (Self::Center, _) => AxisPlacement::CenterBounded,
            (Self::Top | Self::Bottom, Axis::Horizontal)
            | (Self::Leading | Self::Trailing, Axis::Vertical) => AxisPlacement::Center,
            (Self::Leading | Self::TopLeading | Self::BottomLeading, Axis::Horizontal)
            | (Self::Top | Self::TopLeading | Self::TopTrailing, Axis::Vertical) => {
                AxisPlacement::Start
            }
            (Self::Trailing | Self::TopTrailing | Self::BottomTrailing, Axis::Horizontal)
            | (Self::Bottom | Self::BottomLeading | Self::BottomTrailing, Axis::Vertical) => {
                AxisPlacement::End
            }
        }
    }
}

/// One node of the layout tree.
///
/// `S` is the host's surface handle and `C` the installed content handle. The
/// pane owns its surface exclusively; the surface is removed when the pane is
/// destroyed.
#[derive(Debug)]
pub struct Pane<S, C> {
    pub(crate) id: PaneId,
    pub(crate) parent: Option<PaneId>,
    pub(crate) surface: S,
    pub(crate) content: Option<C>,
    pub(crate) alignment: Alignment,
    pub(crate) margins: Insets,
    /// Relationships placing this pane's surface inside its parent.
    pub(crate) frame_relationships: Vec<RelationshipToken>,
    /// Relationships placing installed content inside this pane's surface.
    pub(crate) content_relationships: Vec<RelationshipToken>,
}

impl<S, C> Pane<S, C> {
    pub(crate) fn new(id: PaneId, parent: Option<PaneId>, surface: S) -> Self {
        Self {
            id,
            parent,
            surface,
            content: None,
            alignment: Alignment::default(),
            margins: Insets::ZERO,
            frame_relationships: Vec::new(),
            content_relationships: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> PaneId {
        self.id
    }

    /// Parent pane, `None` only for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<PaneId> {
        self.parent
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub const fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub const fn margins(&self) -> Insets {
        self.margins
    }

    /// Relationship tokens currently held by this pane (frame first, then content).
    pub fn relationships(&self) -> impl Iterator<Item = RelationshipToken> + '_ {
        self.frame_relationships
            .iter()
            .chain(self.content_relationships.iter())
            .copied()
    }
}
