//! In-memory host for running a freeform panel without a UI toolkit.
//!
//! [`HeadlessHost`] implements [`SurfaceAdapter`] over a plain surface tree,
//! counts every adapter call, and can resolve the active relationships into
//! concrete [`Frame`]s. [`HeadlessContent`] is a content handle that attaches
//! its own surface into that tree and records attach/detach calls.
//!
//! The host is a cheap shared handle (`Rc`): the panel owns one clone while
//! tests or tools keep another to inspect state. It is single-threaded, like
//! the pane tree itself.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use freeform_core::color::Background;
use freeform_core::geometry::{Axis, Dimension, Edge, Frame, Size};

use crate::adapter::{Relation, Relationship, RelationshipToken, SurfaceAdapter};
use crate::content::ContentHandle;

/// Surface handle issued by [`HeadlessHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Adapter call counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostStats {
    pub surfaces_created: u64,
    pub surfaces_removed: u64,
    pub activations: u64,
    pub deactivations: u64,
    pub background_changes: u64,
}

#[derive(Debug, Clone)]
struct SurfaceRecord {
    parent: Option<SurfaceId>,
    intrinsic: Option<Size>,
    background: Option<Background>,
    label: Option<String>,
}

#[derive(Debug, Default)]
struct HostState {
    next_surface: u64,
    next_token: u64,
    surfaces: BTreeMap<SurfaceId, SurfaceRecord>,
    active: BTreeMap<RelationshipToken, Relationship<SurfaceId>>,
    stats: HostStats,
}

impl HostState {
    fn new_surface(&mut self, parent: Option<SurfaceId>, intrinsic: Option<Size>) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        let _ = self.surfaces.insert(
            id,
            SurfaceRecord {
                parent,
                intrinsic,
                background: None,
                label: None,
            },
        );
        id
    }
}

/// Shared in-memory surface tree.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    state: Rc<RefCell<HostState>>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a top-level surface of a fixed size, positioned at the origin.
    pub fn create_root(&self, size: Size) -> SurfaceId {
        self.state.borrow_mut().new_surface(None, Some(size))
    }

    /// Create a free-standing surface with an intrinsic size, e.g. for content.
    pub fn create_detached(&self, size: Size) -> SurfaceId {
        self.state.borrow_mut().new_surface(None, Some(size))
    }

    /// Re-parent `surface` under `parent`.
    pub fn attach(&self, surface: SurfaceId, parent: SurfaceId) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(&surface) {
            record.parent = Some(parent);
        }
    }

    /// Detach `surface` from its parent without releasing it.
    pub fn detach(&self, surface: SurfaceId) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(&surface) {
            record.parent = None;
        }
    }

    #[must_use]
    pub fn stats(&self) -> HostStats {
        self.state.borrow().stats
    }

    #[must_use]
    pub fn is_live(&self, surface: SurfaceId) -> bool {
        self.state.borrow().surfaces.contains_key(&surface)
    }

    #[must_use]
    pub fn parent_of(&self, surface: SurfaceId) -> Option<SurfaceId> {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .and_then(|record| record.parent)
    }

    /// Live surfaces directly below `parent`.
    #[must_use]
    pub fn children_of(&self, parent: SurfaceId) -> Vec<SurfaceId> {
        self.state
            .borrow()
            .surfaces
            .iter()
            .filter(|(_, record)| record.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Last background set on `surface`, if any.
    #[must_use]
    pub fn background(&self, surface: SurfaceId) -> Option<Background> {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .and_then(|record| record.background)
    }

    #[must_use]
    pub fn label(&self, surface: SurfaceId) -> Option<String> {
        self.state
            .borrow()
            .surfaces
            .get(&surface)
            .and_then(|record| record.label.clone())
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.state.borrow().surfaces.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Active relationships in activation order.
    #[must_use]
    pub fn active_relationships(&self) -> Vec<Relationship<SurfaceId>> {
        self.state.borrow().active.values().cloned().collect()
    }

    /// Active relationships that reference a surface which no longer exists.
    #[must_use]
    pub fn dangling_relationships(&self) -> usize {
        let state = self.state.borrow();
        state
            .active
            .values()
            .filter(|rel| {
                !state.surfaces.contains_key(rel.item()) || !state.surfaces.contains_key(rel.target())
            })
            .count()
    }

    /// Resolve active relationships into frames, starting from the top-level
    /// surfaces at the origin.
    ///
    /// Equalities are propagated to a fixed point; inequalities are applied
    /// afterwards by shrinking any span that crosses its bound. Surfaces whose
    /// geometry is under-determined are left out.
    #[must_use]
    pub fn resolve(&self) -> BTreeMap<SurfaceId, Frame> {
        let state = self.state.borrow();
        let mut spans: BTreeMap<SurfaceId, [Span; 2]> = BTreeMap::new();
        for (id, record) in &state.surfaces {
            let mut pair = [Span::default(), Span::default()];
            if let Some(size) = record.intrinsic {
                pair[0].len = Some(size.width);
                pair[1].len = Some(size.height);
                if record.parent.is_none() {
                    pair[0].start = Some(0.0);
                    pair[1].start = Some(0.0);
                }
            }
            pair[0].settle();
            pair[1].settle();
            let _ = spans.insert(*id, pair);
        }

        let rounds = state.active.len() + 1;
        for _ in 0..rounds {
            let mut changed = false;
            for rel in state.active.values() {
                changed |= apply_equality(&mut spans, rel);
            }
            if !changed {
                break;
            }
        }
        for rel in state.active.values() {
            apply_bound(&mut spans, rel);
        }

        spans
            .into_iter()
            .filter_map(|(id, [h, v])| {
                Some((id, Frame::new(h.start?, v.start?, h.len?, v.len?)))
            })
            .collect()
    }
}

impl SurfaceAdapter for HeadlessHost {
    type Surface = SurfaceId;

    fn create_child_surface(&mut self, parent: &SurfaceId) -> SurfaceId {
        let mut state = self.state.borrow_mut();
        state.stats.surfaces_created += 1;
        state.new_surface(Some(*parent), None)
    }

    fn remove_surface(&mut self, surface: &SurfaceId) {
        let mut state = self.state.borrow_mut();
        let mut doomed = vec![*surface];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(
                state
                    .surfaces
                    .iter()
                    .filter(|(_, record)| record.parent == Some(current))
                    .map(|(id, _)| *id),
            );
            cursor += 1;
        }
        for id in doomed {
            if state.surfaces.remove(&id).is_some() {
                state.stats.surfaces_removed += 1;
            }
        }
    }

    fn set_background(&mut self, surface: &SurfaceId, background: Background) {
        let mut state = self.state.borrow_mut();
        state.stats.background_changes += 1;
        if let Some(record) = state.surfaces.get_mut(surface) {
            record.background = Some(background);
        }
    }

    fn activate(&mut self, relationship: Relationship<SurfaceId>) -> RelationshipToken {
        let mut state = self.state.borrow_mut();
        let token = RelationshipToken::new(state.next_token);
        state.next_token += 1;
        state.stats.activations += 1;
        let _ = state.active.insert(token, relationship);
        token
    }

    fn deactivate(&mut self, token: RelationshipToken) {
        let mut state = self.state.borrow_mut();
        if state.active.remove(&token).is_some() {
            state.stats.deactivations += 1;
        }
    }

    fn is_descendant(&self, surface: &SurfaceId, ancestor: &SurfaceId) -> bool {
        let state = self.state.borrow();
        let mut current = state.surfaces.get(surface).and_then(|record| record.parent);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = state.surfaces.get(&id).and_then(|record| record.parent);
        }
        false
    }

    fn size(&self, surface: &SurfaceId) -> Size {
        if let Some(frame) = self.resolve().get(surface) {
            return frame.size();
        }
        self.state
            .borrow()
            .surfaces
            .get(surface)
            .and_then(|record| record.intrinsic)
            .unwrap_or_default()
    }

    fn set_debug_label(&mut self, surface: &SurfaceId, label: Option<&str>) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(surface) {
            record.label = label.map(str::to_owned);
        }
    }
}

/// One axis of a surface being resolved.
#[derive(Debug, Clone, Copy, Default)]
struct Span {
    start: Option<f64>,
    end: Option<f64>,
    len: Option<f64>,
    center: Option<f64>,
}

impl Span {
    /// Derive whatever follows from the known values.
    fn settle(&mut self) {
        for _ in 0..2 {
            match (self.start, self.end, self.len, self.center) {
                (Some(s), None, Some(l), _) => self.end = Some(s + l),
                (None, Some(e), Some(l), _) => self.start = Some(e - l),
                (Some(s), Some(e), None, _) => self.len = Some(e - s),
                (None, None, Some(l), Some(c)) => self.start = Some(c - l / 2.0),
                (Some(s), None, None, Some(c)) => self.len = Some(2.0 * (c - s)),
                (None, Some(e), None, Some(c)) => self.len = Some(2.0 * (e - c)),
                _ => {}
            }
        }
        if let (Some(s), Some(l)) = (self.start, self.len) {
            self.end = Some(s + l);
            self.center = Some(s + l / 2.0);
        }
    }

    fn edge(&self, edge: Edge) -> Option<f64> {
        match edge {
            Edge::Leading | Edge::Top => self.start,
            Edge::Trailing | Edge::Bottom => self.end,
            Edge::CenterX | Edge::CenterY => self.center,
        }
    }

    /// Set an edge if unknown. Returns whether anything changed.
    fn set_edge(&mut self, edge: Edge, value: f64) -> bool {
        let slot = match edge {
            Edge::Leading | Edge::Top => &mut self.start,
            Edge::Trailing | Edge::Bottom => &mut self.end,
            Edge::CenterX | Edge::CenterY => &mut self.center,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        self.settle();
        true
    }

    fn set_len(&mut self, value: f64) -> bool {
        if self.len.is_some() {
            return false;
        }
        self.len = Some(value);
        self.settle();
        true
    }
}

const fn axis_slot(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

fn apply_equality(
    spans: &mut BTreeMap<SurfaceId, [Span; 2]>,
    rel: &Relationship<SurfaceId>,
) -> bool {
    let target_value = |spans: &BTreeMap<SurfaceId, [Span; 2]>, edge: Edge| {
        spans
            .get(rel.target())
            .and_then(|pair| pair[axis_slot(edge.axis())].edge(edge))
    };
    let (axis, value, edge) = match *rel {
        Relationship::EdgeEqual {
            edge, target_edge, ..
        } => (edge.axis(), target_value(spans, target_edge), Some(edge)),
        Relationship::EdgeOffset {
            edge,
            relation: Relation::Equal,
            target_edge,
            offset,
            ..
        } => (
            edge.axis(),
            target_value(spans, target_edge).map(|v| v + offset),
            Some(edge),
        ),
        Relationship::EdgeOffset { .. } => return false,
        Relationship::EdgeProportional {
            edge,
            target_edge,
            multiplier,
            ..
        } => (
            edge.axis(),
            target_value(spans, target_edge).map(|v| v * multiplier),
            Some(edge),
        ),
        Relationship::SizeRatio {
            dimension,
            target_dimension,
            multiplier,
            ..
        } => {
            let axis = dimension_axis(dimension);
            let target_len = spans
                .get(rel.target())
                .and_then(|pair| pair[axis_slot(dimension_axis(target_dimension))].len);
            (axis, target_len.map(|len| len * multiplier), None)
        }
    };
    let Some(value) = value else {
        return false;
    };
    let Some(pair) = spans.get_mut(rel.item()) else {
        return false;
    };
    let span = &mut pair[axis_slot(axis)];
    match edge {
        Some(edge) => span.set_edge(edge, value),
        None => span.set_len(value),
    }
}

fn apply_bound(spans: &mut BTreeMap<SurfaceId, [Span; 2]>, rel: &Relationship<SurfaceId>) {
    let Relationship::EdgeOffset {
        item,
        edge,
        relation,
        target,
        target_edge,
        offset,
    } = *rel
    else {
        return;
    };
    let Some(bound) = spans
        .get(&target)
        .and_then(|pair| pair[axis_slot(target_edge.axis())].edge(target_edge))
        .map(|v| v + offset)
    else {
        return;
    };
    let Some(pair) = spans.get_mut(&item) else {
        return;
    };
    let span = &mut pair[axis_slot(edge.axis())];
    let (Some(start), Some(end)) = (span.start, span.end) else {
        return;
    };
    let (start, end) = match (relation, edge) {
        (Relation::GreaterOrEqual, Edge::Leading | Edge::Top) if start < bound => (bound, end),
        (Relation::LessOrEqual, Edge::Trailing | Edge::Bottom) if end > bound => (start, bound),
        _ => return,
    };
    let len = (end - start).max(0.0);
    *span = Span {
        start: Some(start),
        end: Some(start + len),
        len: Some(len),
        center: Some(start + len / 2.0),
    };
}

const fn dimension_axis(dimension: Dimension) -> Axis {
    match dimension {
        Dimension::Width => Axis::Horizontal,
        Dimension::Height => Axis::Vertical,
    }
}

/// What a [`HeadlessContent`] has been asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentLog {
    pub attaches: u32,
    pub detaches: u32,
    pub attached_to: Option<SurfaceId>,
}

/// Read-only view of a content handle's log that outlives handing the
/// handle to a panel.
#[derive(Debug, Clone)]
pub struct ContentObserver(Rc<RefCell<ContentLog>>);

impl ContentObserver {
    #[must_use]
    pub fn log(&self) -> ContentLog {
        *self.0.borrow()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.0.borrow().attached_to.is_some()
    }
}

/// Content backed by a surface in a [`HeadlessHost`].
#[derive(Debug, Clone)]
pub struct HeadlessContent {
    host: HeadlessHost,
    surface: SurfaceId,
    log: Rc<RefCell<ContentLog>>,
}

impl PartialEq for HeadlessContent {
    fn eq(&self, other: &Self) -> bool {
        self.surface == other.surface
    }
}

impl HeadlessContent {
    /// New content with an intrinsic size, not yet attached anywhere.
    #[must_use]
    pub fn new(host: &HeadlessHost, size: Size) -> Self {
        Self {
            host: host.clone(),
            surface: host.create_detached(size),
            log: Rc::default(),
        }
    }

    #[must_use]
    pub fn observer(&self) -> ContentObserver {
        ContentObserver(Rc::clone(&self.log))
    }
}

impl ContentHandle for HeadlessContent {
    type Surface = SurfaceId;

    fn attach(&mut self, surface: &SurfaceId) {
        self.host.attach(self.surface, *surface);
        let mut log = self.log.borrow_mut();
        log.attaches += 1;
        log.attached_to = Some(*surface);
    }

    fn detach(&mut self) {
        self.host.detach(self.surface);
        let mut log = self.log.borrow_mut();
        log.detaches += 1;
        log.attached_to = None;
    }

    fn surface(&self) -> SurfaceId {
        self.surface
    }
}
