//! Property invariants for freeform pane operations.
//!
//! Random operation streams are applied to a panel over the headless host.
//! After every step the tree must validate, the visible leaves must tile the
//! root surface without gaps or overlaps, and the host must hold no
//! relationship that points at a released surface. Rejected requests must
//! leave every observable piece of state unchanged.

use freeform_core::geometry::{Axis, Frame, Insets, Size};
use freeform_layout::headless::{HeadlessContent, HeadlessHost, HostStats};
use freeform_layout::{Alignment, ContentHandle, FreeformConfig, FreeformPanel, PaneId};
use proptest::prelude::*;

type Panel = FreeformPanel<HeadlessHost, HeadlessContent>;

const ROOT_SIZE: Size = Size::new(1024.0, 768.0);
const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
enum Op {
    Split {
        pick: usize,
        vertical: bool,
        weights: Vec<u8>,
        fill: u8,
    },
    MergeChildren {
        pick: usize,
    },
    MergeSiblings {
        pick: usize,
    },
    AddContent {
        pick: usize,
        alignment: usize,
        margin: u8,
    },
    RemoveContent {
        pick: usize,
    },
    SetAlignment {
        pick: usize,
        alignment: usize,
    },
    Stray {
        raw: u64,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (
            any::<usize>(),
            any::<bool>(),
            prop::collection::vec(1u8..=8, 2..5),
            60u8..=100,
        )
            .prop_map(|(pick, vertical, weights, fill)| Op::Split {
                pick,
                vertical,
                weights,
                fill,
            }),
        2 => any::<usize>().prop_map(|pick| Op::MergeChildren { pick }),
        1 => any::<usize>().prop_map(|pick| Op::MergeSiblings { pick }),
        2 => (any::<usize>(), 0usize..9, 0u8..16).prop_map(|(pick, alignment, margin)| {
            Op::AddContent {
                pick,
                alignment,
                margin,
            }
        }),
        1 => any::<usize>().prop_map(|pick| Op::RemoveContent { pick }),
        1 => (any::<usize>(), 0usize..9)
            .prop_map(|(pick, alignment)| Op::SetAlignment { pick, alignment }),
        1 => (50u64..10_000).prop_map(|raw| Op::Stray { raw }),
    ]
}

/// Proportions from integer weights, scaled so they sum to `fill` percent.
fn proportions(weights: &[u8], fill: u8) -> Vec<f64> {
    let total: f64 = weights.iter().map(|w| f64::from(*w)).sum();
    weights
        .iter()
        .map(|w| f64::from(*w) / total * f64::from(fill) / 100.0)
        .collect()
}

fn pick(ids: &[PaneId], index: usize) -> Option<PaneId> {
    (!ids.is_empty()).then(|| ids[index % ids.len()])
}

fn internal_panes(panel: &Panel) -> Vec<PaneId> {
    panel
        .subtree(PaneId::ROOT)
        .into_iter()
        .filter(|id| !panel.is_leaf(*id))
        .collect()
}

#[derive(Debug, PartialEq)]
struct Observed {
    stats: HostStats,
    visible: Vec<PaneId>,
    panes: usize,
    active: usize,
}

fn observe(panel: &Panel, host: &HeadlessHost) -> Observed {
    Observed {
        stats: host.stats(),
        visible: panel.visible_panes().to_vec(),
        panes: panel.pane_count(),
        active: host.active_count(),
    }
}

fn apply(panel: &mut Panel, host: &HeadlessHost, op: &Op) {
    let visible = panel.visible_panes().to_vec();
    match op {
        Op::Split {
            pick: index,
            vertical,
            weights,
            fill,
        } => {
            if let Some(pane) = pick(&visible, *index) {
                let axis = if *vertical {
                    Axis::Vertical
                } else {
                    Axis::Horizontal
                };
                let children = panel.split_pane(pane, axis, &proportions(weights, *fill));
                assert_eq!(children.len(), weights.len());
                assert!(!panel.visible_panes().contains(&pane));
            }
        }
        Op::MergeChildren { pick: index } => {
            if let Some(pane) = pick(&internal_panes(panel), *index) {
                let expected = panel.subtree(pane).len() - 1;
                let destroyed = panel.merge_children(pane);
                assert_eq!(destroyed.len(), expected);
                assert!(panel.is_leaf(pane));
                assert!(destroyed.iter().all(|id| !panel.contains(*id)));
            }
        }
        Op::MergeSiblings { pick: index } => {
            if let Some(pane) = pick(&visible, *index) {
                let parent = panel.get_parent(pane);
                assert_eq!(panel.merge_siblings(pane), parent);
            }
        }
        Op::AddContent {
            pick: index,
            alignment,
            margin,
        } => {
            if let Some(pane) = pick(&visible, *index) {
                let content = HeadlessContent::new(host, Size::new(16.0, 16.0));
                let observer = content.observer();
                assert!(panel.add_content_aligned(
                    pane,
                    content,
                    Alignment::ALL[*alignment],
                    Insets::all(f64::from(*margin)),
                ));
                assert!(observer.is_attached());
            }
        }
        Op::RemoveContent { pick: index } => {
            if let Some(pane) = pick(&visible, *index) {
                let had_content = panel.content(pane).is_some();
                assert_eq!(panel.remove_content(pane).is_some(), had_content);
                assert!(panel.content(pane).is_none());
            }
        }
        Op::SetAlignment {
            pick: index,
            alignment,
        } => {
            if let Some(pane) = pick(&visible, *index) {
                let target = Alignment::ALL[*alignment];
                let changed = panel.alignment(pane) != Some(target);
                assert_eq!(panel.set_alignment(pane, target, Insets::ZERO), changed);
                assert_eq!(panel.alignment(pane), Some(target));
            }
        }
        Op::Stray { raw } => {
            let pane = PaneId::new(*raw);
            if panel.contains(pane) {
                return;
            }
            let before = observe(panel, host);
            assert!(panel.split_pane(pane, Axis::Horizontal, &[0.5, 0.5]).is_empty());
            assert!(panel.merge_children(pane).is_empty());
            assert_eq!(panel.merge_siblings(pane), None);
            assert!(panel.remove_content(pane).is_none());
            assert!(!panel.set_alignment(pane, Alignment::Top, Insets::ZERO));
            assert_eq!(observe(panel, host), before);
        }
    }
}

fn assert_leaves_tile_root(panel: &Panel, host: &HeadlessHost) {
    let frames = host.resolve();
    let root = Frame::from_size(ROOT_SIZE);
    let leaves: Vec<Frame> = panel
        .visible_panes()
        .iter()
        .map(|pane| {
            let surface = panel
                .background_surface_for(*pane)
                .expect("visible pane is registered");
            *frames.get(surface).expect("visible pane resolves")
        })
        .collect();

    let mut area = 0.0;
    for (i, leaf) in leaves.iter().enumerate() {
        assert!(leaf.x >= root.x - EPSILON && leaf.right() <= root.right() + EPSILON);
        assert!(leaf.y >= root.y - EPSILON && leaf.bottom() <= root.bottom() + EPSILON);
        area += leaf.area();
        for other in &leaves[i + 1..] {
            assert!(leaf.overlap_area(other) <= EPSILON, "{leaf:?} overlaps {other:?}");
        }
    }
    assert!((area - root.area()).abs() <= root.area() * EPSILON);
}

fn assert_invariants(panel: &Panel, host: &HeadlessHost) {
    panel.validate().expect("panel should remain structurally valid");
    assert_eq!(host.dangling_relationships(), 0);
    assert_leaves_tile_root(panel, host);
    for pane in panel.visible_panes() {
        if let Some(content) = panel.content(*pane) {
            let surface = panel.background_surface_for(*pane).expect("registered");
            assert_eq!(panel.find_pane_containing_content(content), Some(*pane));
            assert_eq!(host.parent_of(content.surface()), Some(*surface));
        }
    }
}

fn run(ops: &[Op]) -> (Panel, HeadlessHost) {
    let host = HeadlessHost::new();
    let root = host.create_root(ROOT_SIZE);
    let mut panel = FreeformPanel::new(host.clone(), root, FreeformConfig::default());
    assert_invariants(&panel, &host);
    for op in ops {
        apply(&mut panel, &host, op);
        assert_invariants(&panel, &host);
    }
    (panel, host)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_operation_streams_preserve_invariants(
        ops in prop::collection::vec(op_strategy(), 1..48),
    ) {
        let _ = run(&ops);
    }

    #[test]
    fn merging_everything_returns_to_a_single_root(
        ops in prop::collection::vec(op_strategy(), 1..32),
    ) {
        let (mut panel, host) = run(&ops);
        if !panel.is_leaf(PaneId::ROOT) {
            let _ = panel.merge_children(PaneId::ROOT);
        }
        let _ = panel.remove_content(PaneId::ROOT);
        prop_assert_eq!(panel.visible_panes(), &[PaneId::ROOT]);
        prop_assert_eq!(panel.pane_count(), 1);
        prop_assert_eq!(host.active_count(), 0);
        let stats = host.stats();
        prop_assert_eq!(stats.surfaces_created, stats.surfaces_removed);
        prop_assert_eq!(stats.activations, stats.deactivations);
    }

    #[test]
    fn split_then_merge_is_an_exact_inverse(
        weights in prop::collection::vec(1u8..=8, 2..6),
        fill in 60u8..=100,
        vertical in any::<bool>(),
    ) {
        let host = HeadlessHost::new();
        let root = host.create_root(ROOT_SIZE);
        let mut panel: Panel = FreeformPanel::new(host.clone(), root, FreeformConfig::default());
        let axis = if vertical { Axis::Vertical } else { Axis::Horizontal };
        let children = panel.split_pane(PaneId::ROOT, axis, &proportions(&weights, fill));
        prop_assert_eq!(children.len(), weights.len());
        prop_assert_eq!(panel.visible_panes(), children.as_slice());

        let destroyed = panel.merge_children(PaneId::ROOT);
        prop_assert_eq!(destroyed, children);
        prop_assert_eq!(panel.visible_panes(), &[PaneId::ROOT]);
        prop_assert_eq!(panel.pane_count(), 1);
        prop_assert_eq!(host.active_count(), 0);
        prop_assert_eq!(host.surface_count(), 1);
    }
}
