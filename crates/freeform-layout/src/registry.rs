//! Authoritative pane storage.
//!
//! Panes live in a flat `BTreeMap` keyed by [`PaneId`], each carrying its
//! parent pointer. A secondary `parent -> children` index is kept in lock-step
//! with the parent pointers so child lookups do not scan the whole map.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::error::PaneRejection;
use crate::pane::{Pane, PaneId, PaneIdAllocator};

/// Arena of panes plus the identifier allocator that feeds it.
#[derive(Debug)]
pub struct PaneRegistry<S, C> {
    panes: BTreeMap<PaneId, Pane<S, C>>,
    children: FxHashMap<PaneId, Vec<PaneId>>,
    allocator: PaneIdAllocator,
}

impl<S, C> PaneRegistry<S, C> {
    /// Create a registry holding only the root pane (id `0`) on `surface`.
    #[must_use]
    pub fn with_root(surface: S) -> Self {
        let root = PaneId::ROOT;
        let mut panes = BTreeMap::new();
        let _ = panes.insert(root, Pane::new(root, None, surface));
        Self {
            panes,
            children: FxHashMap::default(),
            allocator: PaneIdAllocator::with_next(PaneId::new(1)),
        }
    }

    #[must_use]
    pub fn get(&self, id: PaneId) -> Option<&Pane<S, C>> {
        self.panes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: PaneId) -> Option<&mut Pane<S, C>> {
        self.panes.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Iterate panes in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Pane<S, C>> {
        self.panes.values()
    }

    /// Next identifier that will be allocated.
    #[must_use]
    pub const fn next_id(&self) -> PaneId {
        self.allocator.peek()
    }

    /// Direct children of `id` in creation (and therefore ascending) order.
    #[must_use]
    pub fn children(&self, id: PaneId) -> &[PaneId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has_children(&self, id: PaneId) -> bool {
        !self.children(id).is_empty()
    }

    /// `id` and all its descendants, parents before children.
    #[must_use]
    pub fn subtree(&self, id: PaneId) -> Vec<PaneId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Descendants of `id` in teardown order: each child's subtree, deepest
    /// first, before the child itself. `id` is not included.
    #[must_use]
    pub fn descendants_post_order(&self, id: PaneId) -> Vec<PaneId> {
        let mut out = Vec::new();
        let mut stack: Vec<(PaneId, bool)> = self
            .children(id)
            .iter()
            .rev()
            .map(|child| (*child, false))
            .collect();
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                out.push(current);
                continue;
            }
            stack.push((current, true));
            stack.extend(self.children(current).iter().rev().map(|child| (*child, false)));
        }
        out
    }

    pub(crate) fn can_allocate(&self, count: usize) -> bool {
        self.allocator.can_allocate(count)
    }

    pub(crate) fn allocate(&mut self) -> Result<PaneId, PaneRejection> {
        self.allocator.allocate()
    }

    /// Register a freshly created child pane.
    ///
    /// The caller guarantees `pane.parent` is registered.
    pub(crate) fn insert_child(&mut self, pane: Pane<S, C>) {
        if let Some(parent) = pane.parent {
            self.children.entry(parent).or_default().push(pane.id);
        }
        let _ = self.panes.insert(pane.id, pane);
    }

    /// Remove a childless pane, unlinking it from its parent's child list.
    ///
    /// Returns `None` if the pane is absent or still has children.
    pub(crate) fn remove_leaf(&mut self, id: PaneId) -> Option<Pane<S, C>> {
        if self.has_children(id) {
            return None;
        }
        let pane = self.panes.remove(&id)?;
        let _ = self.children.remove(&id);
        if let Some(parent) = pane.parent
            && let Some(siblings) = self.children.get_mut(&parent)
        {
            siblings.retain(|child| *child != id);
            if siblings.is_empty() {
                let _ = self.children.remove(&parent);
            }
        }
        Some(pane)
    }

    /// Raw children index, for structural validation.
    pub(crate) fn children_index(&self) -> impl Iterator<Item = (PaneId, &[PaneId])> {
        self.children
            .iter()
            .map(|(parent, kids)| (*parent, kids.as_slice()))
    }
}
