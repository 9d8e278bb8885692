//! Rejection and validation errors.
//!
//! Layout requests never fail loudly: the forgiving entry points on
//! [`crate::FreeformPanel`] turn a [`PaneRejection`] into an empty result.
//! The typed reasons are still available through the `try_*` methods and in
//! debug logs.

use std::io;

use thiserror::Error;

use crate::pane::PaneId;

/// Why a layout request was refused. A refused request changes nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaneRejection {
    #[error("pane {pane} is not registered")]
    UnknownPane { pane: PaneId },
    #[error("pane {pane} is not a visible leaf")]
    NotLeaf { pane: PaneId },
    #[error("pane {pane} has no children to merge")]
    AlreadyLeaf { pane: PaneId },
    #[error("pane {pane} is the root and has no parent")]
    RootHasNoParent { pane: PaneId },
    #[error("no split proportions given")]
    NoProportions,
    #[error("proportion {value} at index {index} is negative or not finite")]
    InvalidProportion { index: usize, value: f64 },
    #[error("proportion {value} at index {index} requests an absolute dimension")]
    AbsoluteDimension { index: usize, value: f64 },
    #[error("proportions sum to {sum}, beyond the {tolerance} overshoot tolerance")]
    OutOfTolerance { sum: f64, tolerance: f64 },
    #[error("pane id space exhausted")]
    IdSpaceExhausted,
}

/// Structural invariant violations reported by [`crate::FreeformPanel::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaneModelError {
    #[error("root pane {root} not found")]
    MissingRoot { root: PaneId },
    #[error("root pane {root} must not have parent {parent}")]
    RootHasParent { root: PaneId, parent: PaneId },
    #[error("pane {pane} has no parent but is not the root")]
    OrphanPane { pane: PaneId },
    #[error("pane {pane} references missing parent {parent}")]
    MissingParent { pane: PaneId, parent: PaneId },
    #[error("children index of pane {parent} disagrees with parent pointers")]
    ChildIndexMismatch { parent: PaneId },
    #[error("pane {pane} is younger than its child {child}")]
    ChildNotYounger { pane: PaneId, child: PaneId },
    #[error("visible pane {pane} is not registered")]
    VisibleMissing { pane: PaneId },
    #[error("visible pane {pane} has children")]
    VisibleNotLeaf { pane: PaneId },
    #[error("pane {pane} appears more than once in the visible index")]
    DuplicateVisible { pane: PaneId },
    #[error("leaf pane {pane} is missing from the visible index")]
    LeafNotVisible { pane: PaneId },
    #[error("pane {pane} has children but still holds content")]
    ContentOnInternalNode { pane: PaneId },
    #[error("pane {pane} is not below the allocator's next id {next}")]
    IdNotBelowNext { pane: PaneId, next: PaneId },
}

/// Errors loading a [`crate::FreeformConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_name_the_pane() {
        let err = PaneRejection::NotLeaf {
            pane: PaneId::new(7),
        };
        assert_eq!(err.to_string(), "pane 7 is not a visible leaf");
    }

    #[test]
    fn tolerance_message_carries_sum() {
        let err = PaneRejection::OutOfTolerance {
            sum: 1.2,
            tolerance: 0.05,
        };
        assert!(err.to_string().contains("1.2"));
    }
}
