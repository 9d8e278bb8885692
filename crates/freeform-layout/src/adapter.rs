//! Host surface seam.
//!
//! The pane tree never draws anything. It drives a [`SurfaceAdapter`], which
//! owns the host's renderable rectangles and the geometric relationships
//! between them, and keeps only opaque handles and [`RelationshipToken`]s.

use std::fmt;

use freeform_core::color::Background;
use freeform_core::geometry::{Dimension, Edge, Size};

/// Handle for an active relationship, issued by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipToken(u64);

impl RelationshipToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Comparison used by offset relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    /// The item edge may lie at or beyond the target edge plus offset.
    GreaterOrEqual,
    /// The item edge may lie at or before the target edge plus offset.
    LessOrEqual,
}

/// Discriminator for [`Relationship`], used in logs and adapter bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    EdgeEqual,
    EdgeOffset,
    EdgeProportional,
    SizeRatio,
}

/// A geometric relationship between two surfaces.
///
/// `item` is the surface being positioned, `target` the surface it is
/// positioned against.
#[derive(Debug, Clone, PartialEq)]
pub enum Relationship<S> {
    /// `item.edge == target.target_edge`
    EdgeEqual {
        item: S,
        edge: Edge,
        target: S,
        target_edge: Edge,
    },
    /// `item.edge (relation) target.target_edge + offset`
    EdgeOffset {
        item: S,
        edge: Edge,
        relation: Relation,
        target: S,
        target_edge: Edge,
        offset: f64,
    },
    /// `item.edge == target.target_edge * multiplier`
    EdgeProportional {
        item: S,
        edge: Edge,
        target: S,
        target_edge: Edge,
        multiplier: f64,
    },
    /// `item.dimension == target.target_dimension * multiplier`
    SizeRatio {
        item: S,
        dimension: Dimension,
        target: S,
        target_dimension: Dimension,
        multiplier: f64,
    },
}

impl<S> Relationship<S> {
    /// Pin `edge` of `item` to `target_edge` of `target`, shifted by `offset`.
    ///
    /// A zero offset yields the plain [`Relationship::EdgeEqual`] form.
    pub fn pin(item: S, edge: Edge, target: S, target_edge: Edge, offset: f64) -> Self {
        if offset == 0.0 {
            Self::EdgeEqual {
                item,
                edge,
                target,
                target_edge,
            }
        } else {
            Self::EdgeOffset {
                item,
                edge,
                relation: Relation::Equal,
                target,
                target_edge,
                offset,
            }
        }
    }

    /// Constrain `dimension` of `item` to a fraction of the same dimension of `target`.
    pub fn size_ratio(item: S, dimension: Dimension, target: S, multiplier: f64) -> Self {
        Self::SizeRatio {
            item,
            dimension,
            target,
            target_dimension: dimension,
            multiplier,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> RelationshipKind {
        match self {
            Self::EdgeEqual { .. } => RelationshipKind::EdgeEqual,
            Self::EdgeOffset { .. } => RelationshipKind::EdgeOffset,
            Self::EdgeProportional { .. } => RelationshipKind::EdgeProportional,
            Self::SizeRatio { .. } => RelationshipKind::SizeRatio,
        }
    }

    /// Surface being positioned.
    #[must_use]
    pub fn item(&self) -> &S {
        match self {
            Self::EdgeEqual { item, .. }
            | Self::EdgeOffset { item, .. }
            | Self::EdgeProportional { item, .. }
            | Self::SizeRatio { item, .. } => item,
        }
    }

    /// Surface positioned against.
    #[must_use]
    pub fn target(&self) -> &S {
        match self {
            Self::EdgeEqual { target, .. }
            | Self::EdgeOffset { target, .. }
            | Self::EdgeProportional { target, .. }
            | Self::SizeRatio { target, .. } => target,
        }
    }
}

/// Host-side surface operations consumed by the pane tree.
///
/// Implementations are driven from a single thread; the tree never calls an
/// adapter concurrently.
pub trait SurfaceAdapter {
    /// Opaque handle to one renderable rectangle.
    type Surface: Clone + PartialEq + fmt::Debug;

    /// Create a surface attached as a child of `parent`.
    fn create_child_surface(&mut self, parent: &Self::Surface) -> Self::Surface;

    /// Detach `surface` from its parent and release it.
    fn remove_surface(&mut self, surface: &Self::Surface);

    fn set_background(&mut self, surface: &Self::Surface, background: Background);

    /// Activate `relationship` and return a token that deactivates it later.
    fn activate(&mut self, relationship: Relationship<Self::Surface>) -> RelationshipToken;

    fn deactivate(&mut self, token: RelationshipToken);

    /// Whether `surface` lies anywhere below `ancestor` in the host's surface tree.
    fn is_descendant(&self, surface: &Self::Surface, ancestor: &Self::Surface) -> bool;

    /// Current laid-out size of `surface`.
    fn size(&self, surface: &Self::Surface) -> Size;

    /// Show or clear a small identifying label on `surface`.
    ///
    /// Hosts without a debug overlay can ignore this.
    fn set_debug_label(&mut self, _surface: &Self::Surface, _label: Option<&str>) {}
}
