//! The freeform panel: split, merge, content and query operations over a
//! pane tree.
//!
//! # Invariants
//!
//! 1. The root pane (`0`) always exists and has no parent.
//! 2. The visible index holds every leaf exactly once and nothing else.
//! 3. Children are always younger than their parent (larger id).
//! 4. Only leaves hold content.
//! 5. A rejected request changes nothing: validation runs to completion
//!    before the first mutation.
//!
//! # Failure Modes
//!
//! | Request | Rejection | Forgiving result |
//! |---------|-----------|------------------|
//! | unknown pane | [`PaneRejection::UnknownPane`] | empty / `None` / `false` |
//! | split or fill an internal pane | [`PaneRejection::NotLeaf`] | empty / `false` |
//! | merge a leaf | [`PaneRejection::AlreadyLeaf`] | empty |
//! | merge siblings of the root | [`PaneRejection::RootHasNoParent`] | `None` |
//! | malformed proportions | see [`crate::proportions`] | empty |

use std::collections::BTreeSet;

use freeform_core::color::Background;
use freeform_core::geometry::{Axis, Insets};

use crate::adapter::{Relationship, RelationshipToken, SurfaceAdapter};
use crate::config::FreeformConfig;
use crate::content::{ContentHandle, alignment_relationships};
use crate::debug::{PaneDebugger, PaneRecord};
use crate::error::{PaneModelError, PaneRejection};
use crate::pane::{Alignment, Pane, PaneId};
use crate::proportions::{SplitPlan, check_proportions};
use crate::registry::PaneRegistry;
use crate::visible::VisiblePaneIndex;

/// A surface recursively subdivided into panes.
///
/// `A` drives the host's surfaces; `C` is the content installed into leaves.
/// All operations are synchronous and must be called from the thread that
/// owns the host surfaces.
#[derive(Debug)]
pub struct FreeformPanel<A, C>
where
    A: SurfaceAdapter,
{
    adapter: A,
    registry: PaneRegistry<A::Surface, C>,
    visible: VisiblePaneIndex,
    config: FreeformConfig,
    split_tolerance: f64,
    debugger: PaneDebugger,
}

impl<A, C> FreeformPanel<A, C>
where
    A: SurfaceAdapter,
    C: ContentHandle<Surface = A::Surface>,
{
    /// Create a panel whose root pane occupies `root_surface`.
    pub fn new(adapter: A, root_surface: A::Surface, config: FreeformConfig) -> Self {
        for problem in config.validate() {
            tracing::warn!(message = "freeform.config.invalid", problem = %problem);
        }
        let mut panel = Self {
            adapter,
            registry: PaneRegistry::with_root(root_surface),
            visible: VisiblePaneIndex::with_root(PaneId::ROOT),
            split_tolerance: config.effective_split_tolerance(),
            debugger: PaneDebugger::new(config.debug_overlay),
            config,
        };
        panel.refresh_debug_labels();
        panel
    }

    /// Split the leaf `pane` along `axis` into `proportions.len()` children.
    ///
    /// Returns the new child ids in creation order, or `[pane]` for a single
    /// proportion (no split). Content installed in `pane` is detached and
    /// dropped first.
    pub fn try_split_pane(
        &mut self,
        pane: PaneId,
        axis: Axis,
        proportions: &[f64],
    ) -> Result<Vec<PaneId>, PaneRejection> {
        let _span = tracing::debug_span!(
            "freeform.split",
            pane = %pane,
            axis = ?axis,
            parts = proportions.len(),
        )
        .entered();

        self.ensure_visible(pane)?;
        let count = match check_proportions(proportions, self.split_tolerance)? {
            SplitPlan::Unsplit => return Ok(vec![pane]),
            SplitPlan::Parts(count) => count,
        };
        let Some(parent_surface) = self.registry.get(pane).map(|p| p.surface().clone()) else {
            return Err(PaneRejection::UnknownPane { pane });
        };
        if !self.registry.can_allocate(count) {
            return Err(PaneRejection::IdSpaceExhausted);
        }
        let ids = (0..count)
            .map(|_| self.registry.allocate())
            .collect::<Result<Vec<_>, _>>()?;

        drop(self.clear_content(pane));

        let mut previous: Option<A::Surface> = None;
        for (index, (&id, &proportion)) in ids.iter().zip(proportions).enumerate() {
            let surface = self.adapter.create_child_surface(&parent_surface);
            let relationships = split_relationships(
                &surface,
                &parent_surface,
                previous.as_ref(),
                axis,
                proportion,
                index + 1 == count,
            );
            let mut child = Pane::new(id, Some(pane), surface.clone());
            child.frame_relationships = self.activate_all(relationships);
            self.registry.insert_child(child);
            previous = Some(surface);
        }
        self.adapter
            .set_background(&parent_surface, Background::Clear);
        let _ = self.visible.replace(pane, &ids);

        tracing::trace!(pane = %pane, children = ?ids, "split complete");
        self.debugger.record(PaneRecord::Split {
            pane,
            axis,
            proportions: proportions.to_vec(),
            children: ids.clone(),
        });
        self.refresh_debug_labels();
        Ok(ids)
    }

    /// Forgiving [`Self::try_split_pane`]: a rejected split returns an empty list.
    pub fn split_pane(&mut self, pane: PaneId, axis: Axis, proportions: &[f64]) -> Vec<PaneId> {
        self.try_split_pane(pane, axis, proportions)
            .unwrap_or_else(|err| {
                tracing::debug!(message = "freeform.split.rejected", reason = %err);
                Vec::new()
            })
    }

    /// Collapse every pane below `pane` and make `pane` a leaf again.
    ///
    /// Returns the destroyed ids in teardown order: each child's subtree
    /// deepest first, then the child. `pane` takes the visible position of
    /// its first visible descendant and gets the configured panel background
    /// back; any custom background it had before the split is not restored.
    pub fn try_merge_children(&mut self, pane: PaneId) -> Result<Vec<PaneId>, PaneRejection> {
        let _span = tracing::debug_span!("freeform.merge", pane = %pane).entered();

        if !self.registry.contains(pane) {
            return Err(PaneRejection::UnknownPane { pane });
        }
        if !self.registry.has_children(pane) {
            return Err(PaneRejection::AlreadyLeaf { pane });
        }

        let doomed = self.registry.descendants_post_order(pane);
        let doomed_set: BTreeSet<PaneId> = doomed.iter().copied().collect();
        let position = self
            .visible
            .iter()
            .position(|id| doomed_set.contains(&id))
            .unwrap_or(self.visible.len());

        for &id in &doomed {
            self.destroy_leaf(id);
        }

        self.visible.insert(position, pane);
        if let Some(surface) = self.registry.get(pane).map(|p| p.surface().clone()) {
            self.adapter
                .set_background(&surface, self.config.panel_background);
        }

        tracing::trace!(pane = %pane, destroyed = ?doomed, "merge complete");
        self.debugger.record(PaneRecord::Merge {
            pane,
            destroyed: doomed.clone(),
        });
        self.refresh_debug_labels();
        Ok(doomed)
    }

    /// Forgiving [`Self::try_merge_children`]: a rejected merge returns an empty list.
    pub fn merge_children(&mut self, pane: PaneId) -> Vec<PaneId> {
        self.try_merge_children(pane).unwrap_or_else(|err| {
            tracing::debug!(message = "freeform.merge.rejected", reason = %err);
            Vec::new()
        })
    }

    /// Merge `pane` and all its siblings back into their parent.
    ///
    /// Returns the parent.
    pub fn try_merge_siblings(&mut self, pane: PaneId) -> Result<PaneId, PaneRejection> {
        let Some(record) = self.registry.get(pane) else {
            return Err(PaneRejection::UnknownPane { pane });
        };
        let Some(parent) = record.parent() else {
            return Err(PaneRejection::RootHasNoParent { pane });
        };
        let _ = self.try_merge_children(parent)?;
        Ok(parent)
    }

    /// Forgiving [`Self::try_merge_siblings`]: `None` for the root or an unknown pane.
    pub fn merge_siblings(&mut self, pane: PaneId) -> Option<PaneId> {
        self.try_merge_siblings(pane)
            .map_err(|err| {
                tracing::debug!(message = "freeform.merge.rejected", reason = %err);
            })
            .ok()
    }

    /// Install `content` in the leaf `pane`, replacing any content already there.
    ///
    /// The replaced content is detached and dropped. Content passed to a
    /// rejected request is dropped without being attached.
    pub fn try_add_content(
        &mut self,
        pane: PaneId,
        mut content: C,
        alignment: Alignment,
        margins: Insets,
    ) -> Result<(), PaneRejection> {
        let _span = tracing::debug_span!(
            "freeform.content",
            pane = %pane,
            op = "add",
            alignment = ?alignment,
        )
        .entered();

        self.ensure_visible(pane)?;
        drop(self.clear_content(pane));

        let margins = Insets::new(margins.top, margins.left, margins.bottom, margins.right);
        let Some(record) = self.registry.get_mut(pane) else {
            return Err(PaneRejection::UnknownPane { pane });
        };
        content.attach(&record.surface);
        let relationships =
            alignment_relationships(&content.surface(), &record.surface, alignment, margins);
        record.content_relationships = relationships
            .into_iter()
            .map(|rel| self.adapter.activate(rel))
            .collect();
        record.content = Some(content);
        record.alignment = alignment;
        record.margins = margins;

        self.debugger
            .record(PaneRecord::ContentInstalled { pane, alignment });
        Ok(())
    }

    /// Forgiving [`Self::try_add_content`] with centered alignment and no margins.
    pub fn add_content(&mut self, pane: PaneId, content: C) -> bool {
        self.add_content_aligned(pane, content, Alignment::Center, Insets::ZERO)
    }

    /// Forgiving [`Self::try_add_content`]: returns whether the content was installed.
    pub fn add_content_aligned(
        &mut self,
        pane: PaneId,
        content: C,
        alignment: Alignment,
        margins: Insets,
    ) -> bool {
        self.try_add_content(pane, content, alignment, margins)
            .map_err(|err| {
                tracing::debug!(message = "freeform.content.rejected", reason = %err);
            })
            .is_ok()
    }

    /// Detach and return the content installed in `pane`, if any.
    pub fn try_remove_content(&mut self, pane: PaneId) -> Result<Option<C>, PaneRejection> {
        let _span =
            tracing::debug_span!("freeform.content", pane = %pane, op = "remove").entered();

        if !self.registry.contains(pane) {
            return Err(PaneRejection::UnknownPane { pane });
        }
        let removed = self.clear_content(pane);
        if removed.is_some() {
            self.debugger.record(PaneRecord::ContentRemoved { pane });
        }
        Ok(removed)
    }

    /// Forgiving [`Self::try_remove_content`].
    pub fn remove_content(&mut self, pane: PaneId) -> Option<C> {
        self.try_remove_content(pane).unwrap_or_else(|err| {
            tracing::debug!(message = "freeform.content.rejected", reason = %err);
            None
        })
    }

    /// Change how content sits inside `pane`.
    ///
    /// Does nothing when `alignment` equals the current alignment, margins
    /// included. Otherwise records both and, if content is installed,
    /// replaces its relationship set. Returns whether anything changed.
    pub fn try_set_alignment(
        &mut self,
        pane: PaneId,
        alignment: Alignment,
        margins: Insets,
    ) -> Result<bool, PaneRejection> {
        let Some(record) = self.registry.get_mut(pane) else {
            return Err(PaneRejection::UnknownPane { pane });
        };
        if record.alignment == alignment {
            return Ok(false);
        }
        let _span = tracing::debug_span!(
            "freeform.content",
            pane = %pane,
            op = "align",
            alignment = ?alignment,
        )
        .entered();

        let margins = Insets::new(margins.top, margins.left, margins.bottom, margins.right);
        record.alignment = alignment;
        record.margins = margins;
        if let Some(content) = &record.content {
            for token in record.content_relationships.drain(..) {
                self.adapter.deactivate(token);
            }
            let relationships =
                alignment_relationships(&content.surface(), &record.surface, alignment, margins);
            record.content_relationships = relationships
                .into_iter()
                .map(|rel| self.adapter.activate(rel))
                .collect();
        }

        self.debugger.record(PaneRecord::Realigned { pane, alignment });
        Ok(true)
    }

    /// Forgiving [`Self::try_set_alignment`].
    pub fn set_alignment(&mut self, pane: PaneId, alignment: Alignment, margins: Insets) -> bool {
        self.try_set_alignment(pane, alignment, margins)
            .unwrap_or_else(|err| {
                tracing::debug!(message = "freeform.content.rejected", reason = %err);
                false
            })
    }

    // --- Queries ---

    /// The root pane.
    #[must_use]
    pub const fn root(&self) -> PaneId {
        PaneId::ROOT
    }

    #[must_use]
    pub fn get_parent(&self, pane: PaneId) -> Option<PaneId> {
        self.registry.get(pane).and_then(Pane::parent)
    }

    /// All panes sharing `pane`'s parent, `pane` included, ascending by id.
    ///
    /// Empty for the root and for unknown panes.
    #[must_use]
    pub fn get_siblings(&self, pane: PaneId) -> Vec<PaneId> {
        let Some(parent) = self.get_parent(pane) else {
            return Vec::new();
        };
        let mut siblings = self.registry.children(parent).to_vec();
        siblings.sort_unstable();
        siblings
    }

    /// Direct children of `pane`, ascending by id.
    #[must_use]
    pub fn children(&self, pane: PaneId) -> &[PaneId] {
        self.registry.children(pane)
    }

    /// Visible pane whose surface is `surface` or an ancestor of it.
    #[must_use]
    pub fn find_pane_containing(&self, surface: &A::Surface) -> Option<PaneId> {
        self.visible.iter().find(|id| {
            self.registry.get(*id).is_some_and(|pane| {
                pane.surface() == surface || self.adapter.is_descendant(surface, pane.surface())
            })
        })
    }

    /// Visible pane holding `content`, or whose surface contains its surface.
    #[must_use]
    pub fn find_pane_containing_content(&self, content: &C) -> Option<PaneId> {
        self.find_pane_containing(&content.surface())
    }

    /// Surface backing `pane`.
    #[must_use]
    pub fn background_surface_for(&self, pane: PaneId) -> Option<&A::Surface> {
        self.registry.get(pane).map(Pane::surface)
    }

    /// Whether `pane` exists and has no children.
    #[must_use]
    pub fn is_leaf(&self, pane: PaneId) -> bool {
        self.registry.contains(pane) && !self.registry.has_children(pane)
    }

    /// Leaves in traversal order.
    #[must_use]
    pub fn visible_panes(&self) -> &[PaneId] {
        self.visible.as_slice()
    }

    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn contains(&self, pane: PaneId) -> bool {
        self.registry.contains(pane)
    }

    #[must_use]
    pub fn content(&self, pane: PaneId) -> Option<&C> {
        self.registry.get(pane).and_then(Pane::content)
    }

    #[must_use]
    pub fn alignment(&self, pane: PaneId) -> Option<Alignment> {
        self.registry.get(pane).map(Pane::alignment)
    }

    #[must_use]
    pub fn margins(&self, pane: PaneId) -> Option<Insets> {
        self.registry.get(pane).map(Pane::margins)
    }

    /// `pane` and its descendants, parents before children.
    #[must_use]
    pub fn subtree(&self, pane: PaneId) -> Vec<PaneId> {
        self.registry.subtree(pane)
    }

    #[must_use]
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    #[must_use]
    pub const fn registry(&self) -> &PaneRegistry<A::Surface, C> {
        &self.registry
    }

    #[must_use]
    pub const fn config(&self) -> &FreeformConfig {
        &self.config
    }

    // --- Debugging ---

    /// Show or hide identifier labels and start or stop recording operations.
    pub fn set_debug_overlay(&mut self, enabled: bool) {
        if self.debugger.enabled() == enabled {
            return;
        }
        self.debugger.set_enabled(enabled);
        if enabled {
            self.refresh_debug_labels();
        } else {
            for pane in self.registry.iter() {
                self.adapter.set_debug_label(pane.surface(), None);
            }
        }
    }

    #[must_use]
    pub const fn debugger(&self) -> &PaneDebugger {
        &self.debugger
    }

    /// Graphviz DOT rendering of the live tree.
    #[must_use]
    pub fn to_dot(&self) -> String {
        PaneDebugger::export_dot(&self.registry, &self.visible)
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), PaneModelError> {
        validate_panel(&self.registry, &self.visible)
    }

    // --- Internals ---

    fn ensure_visible(&self, pane: PaneId) -> Result<(), PaneRejection> {
        if !self.registry.contains(pane) {
            return Err(PaneRejection::UnknownPane { pane });
        }
        if !self.visible.contains(pane) {
            return Err(PaneRejection::NotLeaf { pane });
        }
        Ok(())
    }

    fn activate_all(&mut self, relationships: Vec<Relationship<A::Surface>>) -> Vec<RelationshipToken> {
        relationships
            .into_iter()
            .map(|rel| self.adapter.activate(rel))
            .collect()
    }

    /// Detach `pane`'s content and deactivate its placement.
    fn clear_content(&mut self, pane: PaneId) -> Option<C> {
        let record = self.registry.get_mut(pane)?;
        let mut content = record.content.take()?;
        content.detach();
        for token in record.content_relationships.drain(..) {
            self.adapter.deactivate(token);
        }
        Some(content)
    }

    /// Tear down a pane whose children are already gone.
    fn destroy_leaf(&mut self, pane: PaneId) {
        let Some(mut record) = self.registry.remove_leaf(pane) else {
            tracing::warn!(pane = %pane, "teardown skipped a pane that still has children");
            return;
        };
        if let Some(mut content) = record.content.take() {
            content.detach();
        }
        for token in record
            .content_relationships
            .drain(..)
            .chain(record.frame_relationships.drain(..))
        {
            self.adapter.deactivate(token);
        }
        self.adapter.remove_surface(&record.surface);
        let _ = self.visible.remove(pane);
    }

    fn refresh_debug_labels(&mut self) {
        if !self.debugger.enabled() {
            return;
        }
        for pane in self.registry.iter() {
            let label = self
                .visible
                .contains(pane.id())
                .then(|| PaneDebugger::label(pane.id()));
            self.adapter
                .set_debug_label(pane.surface(), label.as_deref());
        }
    }
}

/// Relationships placing one child of a split inside its parent.
///
/// Along the split axis the child is chained to `previous` (or the parent's
/// leading edge for the first child) and sized to `proportion` of the parent;
/// the last child is instead pinned to the parent's trailing edge so it
/// absorbs whatever the proportions leave. Across the axis every child spans
/// the parent.
fn split_relationships<S: Clone>(
    child: &S,
    parent: &S,
    previous: Option<&S>,
    axis: Axis,
    proportion: f64,
    is_last: bool,
) -> Vec<Relationship<S>> {
    let leading = axis.leading_edge();
    let trailing = axis.trailing_edge();
    let cross = axis.cross();
    let chain = match previous {
        Some(previous) => Relationship::pin(child.clone(), leading, previous.clone(), trailing, 0.0),
        None => Relationship::pin(child.clone(), leading, parent.clone(), leading, 0.0),
    };
    let extent = if is_last {
        Relationship::pin(child.clone(), trailing, parent.clone(), trailing, 0.0)
    } else {
        Relationship::size_ratio(child.clone(), axis.dimension(), parent.clone(), proportion)
    };
    vec![
        chain,
        extent,
        Relationship::pin(
            child.clone(),
            cross.leading_edge(),
            parent.clone(),
            cross.leading_edge(),
            0.0,
        ),
        Relationship::size_ratio(child.clone(), cross.dimension(), parent.clone(), 1.0),
    ]
}

fn validate_panel<S, C>(
    registry: &PaneRegistry<S, C>,
    visible: &VisiblePaneIndex,
) -> Result<(), PaneModelError> {
    let root = PaneId::ROOT;
    let Some(root_pane) = registry.get(root) else {
        return Err(PaneModelError::MissingRoot { root });
    };
    if let Some(parent) = root_pane.parent() {
        return Err(PaneModelError::RootHasParent { root, parent });
    }

    let next = registry.next_id();
    for pane in registry.iter() {
        let id = pane.id();
        if id >= next {
            return Err(PaneModelError::IdNotBelowNext { pane: id, next });
        }
        match pane.parent() {
            None if id != root => return Err(PaneModelError::OrphanPane { pane: id }),
            None => {}
            Some(parent) => {
                if !registry.contains(parent) {
                    return Err(PaneModelError::MissingParent { pane: id, parent });
                }
                if parent >= id {
                    return Err(PaneModelError::ChildNotYounger {
                        pane: parent,
                        child: id,
                    });
                }
                if !registry.children(parent).contains(&id) {
                    return Err(PaneModelError::ChildIndexMismatch { parent });
                }
            }
        }
        if pane.content().is_some() && registry.has_children(id) {
            return Err(PaneModelError::ContentOnInternalNode { pane: id });
        }
    }

    for (parent, children) in registry.children_index() {
        let consistent = children
            .iter()
            .all(|child| registry.get(*child).and_then(Pane::parent) == Some(parent));
        if children.is_empty() || !consistent {
            return Err(PaneModelError::ChildIndexMismatch { parent });
        }
    }

    let mut seen = BTreeSet::new();
    for id in visible.iter() {
        if !registry.contains(id) {
            return Err(PaneModelError::VisibleMissing { pane: id });
        }
        if registry.has_children(id) {
            return Err(PaneModelError::VisibleNotLeaf { pane: id });
        }
        if !seen.insert(id) {
            return Err(PaneModelError::DuplicateVisible { pane: id });
        }
    }
    if let Some(pane) = registry
        .iter()
        .map(Pane::id)
        .find(|id| !registry.has_children(*id) && !seen.contains(id))
    {
        return Err(PaneModelError::LeafNotVisible { pane });
    }

    Ok(())
}
