//! Content installed into leaf panes.
//!
//! Content is anything that can be attached to a surface and detached again.
//! The pane tree is agnostic to what that is; [`PaneContent`] covers the two
//! shapes the widget layer produces (a full widget or a bare view).

use freeform_core::geometry::{Axis, Insets};

use crate::adapter::{Relation, Relationship};
use crate::pane::{Alignment, AxisPlacement};

/// An attachable unit of UI content.
///
/// `surface` is the rectangle the content occupies once attached; the pane
/// tree positions it against the pane's own surface.
pub trait ContentHandle {
    type Surface;

    fn attach(&mut self, surface: &Self::Surface);

    fn detach(&mut self);

    fn surface(&self) -> Self::Surface;
}

/// Which variant of content is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Widget,
    View,
}

/// Content installed by the widget layer: a widget with its own lifecycle, or
/// a bare view.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneContent<W, V> {
    Widget(W),
    View(V),
}

impl<W, V> PaneContent<W, V> {
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Widget(_) => ContentKind::Widget,
            Self::View(_) => ContentKind::View,
        }
    }

    #[must_use]
    pub fn as_widget(&self) -> Option<&W> {
        match self {
            Self::Widget(widget) => Some(widget),
            Self::View(_) => None,
        }
    }

    #[must_use]
    pub fn as_view(&self) -> Option<&V> {
        match self {
            Self::Widget(_) => None,
            Self::View(view) => Some(view),
        }
    }
}

impl<W, V> ContentHandle for PaneContent<W, V>
where
    W: ContentHandle,
    V: ContentHandle<Surface = W::Surface>,
{
    type Surface = W::Surface;

    fn attach(&mut self, surface: &Self::Surface) {
        match self {
            Self::Widget(widget) => widget.attach(surface),
            Self::View(view) => view.attach(surface),
        }
    }

    fn detach(&mut self) {
        match self {
            Self::Widget(widget) => widget.detach(),
            Self::View(view) => view.detach(),
        }
    }

    fn surface(&self) -> Self::Surface {
        match self {
            Self::Widget(widget) => widget.surface(),
            Self::View(view) => view.surface(),
        }
    }
}

/// Relationships placing `content` inside `pane` for `alignment`.
///
/// Pinned edges sit exactly `margins` inside the pane; centered content is
/// shifted by half the margin difference so it stays centered in the inset
/// area. Fully centered content is additionally kept within the inset bounds
/// on all four sides.
pub fn alignment_relationships<S: Clone>(
    content: &S,
    pane: &S,
    alignment: Alignment,
    margins: Insets,
) -> Vec<Relationship<S>> {
    let mut out = Vec::with_capacity(6);
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let leading = axis.leading_edge();
        let trailing = axis.trailing_edge();
        let lead_inset = margins.for_edge(leading);
        let trail_inset = margins.for_edge(trailing);
        match alignment.placement(axis) {
            AxisPlacement::CenterBounded => {
                out.push(center(content, pane, axis, lead_inset, trail_inset));
                out.push(Relationship::EdgeOffset {
                    item: content.clone(),
                    edge: leading,
                    relation: Relation::GreaterOrEqual,
                    target: pane.clone(),
                    target_edge: leading,
                    offset: lead_inset,
                });
                out.push(Relationship::EdgeOffset {
                    item: content.clone(),
                    edge: trailing,
                    relation: Relation::LessOrEqual,
                    target: pane.clone(),
                    target_edge: trailing,
                    offset: -trail_inset,
                });
            }
            AxisPlacement::Center => {
                out.push(center(content, pane, axis, lead_inset, trail_inset));
            }
            AxisPlacement::Start => out.push(Relationship::pin(
                content.clone(),
                leading,
                pane.clone(),
                leading,
                lead_inset,
            )),
            AxisPlacement::End => out.push(Relationship::pin(
                content.clone(),
                trailing,
                pane.clone(),
                trailing,
                -trail_inset,
            )),
        }
    }
    out
}

fn center<S: Clone>(
    content: &S,
    pane: &S,
    axis: Axis,
    lead_inset: f64,
    trail_inset: f64,
) -> Relationship<S> {
    let edge = axis.center();
    Relationship::pin(
        content.clone(),
        edge,
        pane.clone(),
        edge,
        (lead_inset - trail_inset) / 2.0,
    )
}
