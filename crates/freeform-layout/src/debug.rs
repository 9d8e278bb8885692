#![forbid(unsafe_code)]

//! Pane tree debugging utilities.
//!
//! Provides introspection into the freeform tree:
//! - Identifier labels on every visible pane, pushed through the adapter
//! - A log of structural operations while enabled
//! - Export of the live tree to Graphviz DOT format
//!
//! The debugger is owned by [`crate::FreeformPanel`] and is inert unless
//! enabled, either at runtime or through `debug_overlay` in the config.

use std::fmt::Write as _;

use freeform_core::geometry::Axis;

use crate::pane::{Alignment, PaneId};
use crate::registry::PaneRegistry;
use crate::visible::VisiblePaneIndex;

/// A structural operation observed while debugging was enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneRecord {
    Split {
        pane: PaneId,
        axis: Axis,
        proportions: Vec<f64>,
        children: Vec<PaneId>,
    },
    Merge {
        pane: PaneId,
        /// Destroyed panes, deepest first.
        destroyed: Vec<PaneId>,
    },
    ContentInstalled {
        pane: PaneId,
        alignment: Alignment,
    },
    ContentRemoved {
        pane: PaneId,
    },
    Realigned {
        pane: PaneId,
        alignment: Alignment,
    },
}

impl PaneRecord {
    /// Pane the operation was requested on.
    #[must_use]
    pub const fn pane(&self) -> PaneId {
        match self {
            Self::Split { pane, .. }
            | Self::Merge { pane, .. }
            | Self::ContentInstalled { pane, .. }
            | Self::ContentRemoved { pane }
            | Self::Realigned { pane, .. } => *pane,
        }
    }

    /// One-line human readable form.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Split {
                pane,
                axis,
                proportions,
                children,
            } => format!("split {pane} {axis:?} {proportions:?} -> {children:?}"),
            Self::Merge { pane, destroyed } => format!("merge {pane} destroyed {destroyed:?}"),
            Self::ContentInstalled { pane, alignment } => {
                format!("content {pane} installed {alignment:?}")
            }
            Self::ContentRemoved { pane } => format!("content {pane} removed"),
            Self::Realigned { pane, alignment } => format!("realign {pane} {alignment:?}"),
        }
    }
}

/// Records pane operations and drives identifier labels.
#[derive(Debug, Clone, Default)]
pub struct PaneDebugger {
    enabled: bool,
    records: Vec<PaneRecord>,
}

impl PaneDebugger {
    /// Create a debugger, disabled unless `enabled`.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            records: Vec::new(),
        }
    }

    /// Check if debugging is enabled.
    #[inline]
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Clear all recorded operations.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Record an operation. No-op while disabled.
    pub(crate) fn record(&mut self, record: PaneRecord) {
        if self.enabled {
            self.records.push(record);
        }
    }

    #[must_use]
    pub fn records(&self) -> &[PaneRecord] {
        &self.records
    }

    /// Label shown on a visible pane.
    #[must_use]
    pub fn label(pane: PaneId) -> String {
        format!("pane {pane}")
    }

    /// Generate a summary report of all recorded operations.
    #[must_use]
    pub fn report(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            "=== Pane Debug Report ({} operations) ===",
            self.records.len()
        );
        for (i, record) in self.records.iter().enumerate() {
            let _ = writeln!(s, "  [{i}] {}", record.summary());
        }
        s
    }

    /// Export the live tree to Graphviz DOT format.
    ///
    /// Visible leaves are drawn filled; panes holding content are outlined in
    /// blue. Edges run parent to child in creation order.
    #[must_use]
    pub fn export_dot<S, C>(
        registry: &PaneRegistry<S, C>,
        visible: &VisiblePaneIndex,
    ) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "digraph FreeformPanes {{");
        let _ = writeln!(s, "  rankdir=TB;");
        let _ = writeln!(s, "  node [shape=record];");

        for pane in registry.iter() {
            let id = pane.id();
            let style = if visible.contains(id) {
                "filled"
            } else {
                "solid"
            };
            let color = if pane.content().is_some() {
                "blue"
            } else {
                "black"
            };
            let _ = writeln!(
                s,
                "  p{id} [label=\"{{{id}|{:?}}}\", style=\"{style}\", color=\"{color}\"];",
                pane.alignment()
            );
            for child in registry.children(id) {
                let _ = writeln!(s, "  p{id} -> p{child};");
            }
        }

        let _ = writeln!(s, "}}");
        s
    }
}
