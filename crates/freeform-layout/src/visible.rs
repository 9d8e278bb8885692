//! Ordered index of the panes that are currently leaves.
//!
//! Order follows tree traversal: splitting a pane replaces it with its
//! children at the same position, so iterating the index walks the leaves
//! leading-to-trailing and top-to-bottom within each split.

use crate::pane::PaneId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisiblePaneIndex {
    order: Vec<PaneId>,
}

impl VisiblePaneIndex {
    /// Index holding only `root`.
    #[must_use]
    pub fn with_root(root: PaneId) -> Self {
        Self { order: vec![root] }
    }

    #[must_use]
    pub fn contains(&self, id: PaneId) -> bool {
        self.order.contains(&id)
    }

    #[must_use]
    pub fn position(&self, id: PaneId) -> Option<usize> {
        self.order.iter().position(|visible| *visible == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PaneId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.order.iter().copied()
    }

    /// Replace `id` in place with `replacements`. Returns `false` if `id` is absent.
    pub(crate) fn replace(&mut self, id: PaneId, replacements: &[PaneId]) -> bool {
        let Some(at) = self.position(id) else {
            return false;
        };
        let _ = self.order.splice(at..=at, replacements.iter().copied());
        true
    }

    /// Remove `id`, returning the position it held.
    pub(crate) fn remove(&mut self, id: PaneId) -> Option<usize> {
        let at = self.position(id)?;
        let _ = self.order.remove(at);
        Some(at)
    }

    /// Insert `id` at `at`, clamped to the end of the index.
    pub(crate) fn insert(&mut self, at: usize, id: PaneId) {
        let at = at.min(self.order.len());
        self.order.insert(at, id);
    }
}
