#![no_main]

use arbitrary::Arbitrary;
use freeform_core::geometry::{Axis, Insets, Size};
use freeform_layout::headless::{HeadlessContent, HeadlessHost};
use freeform_layout::{Alignment, FreeformConfig, FreeformPanel, PaneId};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Split {
        pane: u16,
        vertical: bool,
        // Raw proportions in hundredths; values above 100 exercise the
        // absolute-size rejection path.
        parts: Vec<u16>,
    },
    MergeChildren {
        pane: u16,
    },
    MergeSiblings {
        pane: u16,
    },
    AddContent {
        pane: u16,
        alignment: u8,
        margin: u8,
    },
    RemoveContent {
        pane: u16,
    },
    SetAlignment {
        pane: u16,
        alignment: u8,
    },
}

fn alignment(raw: u8) -> Alignment {
    Alignment::ALL[usize::from(raw) % Alignment::ALL.len()]
}

fuzz_target!(|ops: Vec<Op>| {
    let host = HeadlessHost::new();
    let root = host.create_root(Size::new(640.0, 480.0));
    let mut panel: FreeformPanel<HeadlessHost, HeadlessContent> =
        FreeformPanel::new(host.clone(), root, FreeformConfig::default());

    // Bound the tree so a single input cannot allocate without limit.
    for op in ops.into_iter().take(256) {
        match op {
            Op::Split {
                pane,
                vertical,
                parts,
            } => {
                if panel.pane_count() > 512 {
                    continue;
                }
                let axis = if vertical {
                    Axis::Vertical
                } else {
                    Axis::Horizontal
                };
                let proportions: Vec<f64> = parts
                    .iter()
                    .take(8)
                    .map(|raw| f64::from(*raw) / 100.0)
                    .collect();
                let before = panel.visible_panes().to_vec();
                let pane = PaneId::new(u64::from(pane));
                let children = panel.split_pane(pane, axis, &proportions);
                if children.is_empty() || children == [pane] {
                    assert_eq!(panel.visible_panes(), before.as_slice());
                } else {
                    assert_eq!(children.len(), proportions.len());
                }
            }
            Op::MergeChildren { pane } => {
                let _ = panel.merge_children(PaneId::new(u64::from(pane)));
            }
            Op::MergeSiblings { pane } => {
                let _ = panel.merge_siblings(PaneId::new(u64::from(pane)));
            }
            Op::AddContent {
                pane,
                alignment: raw,
                margin,
            } => {
                let content = HeadlessContent::new(&host, Size::new(24.0, 24.0));
                let _ = panel.add_content_aligned(
                    PaneId::new(u64::from(pane)),
                    content,
                    alignment(raw),
                    Insets::all(f64::from(margin)),
                );
            }
            Op::RemoveContent { pane } => {
                let _ = panel.remove_content(PaneId::new(u64::from(pane)));
            }
            Op::SetAlignment {
                pane,
                alignment: raw,
            } => {
                let _ = panel.set_alignment(
                    PaneId::new(u64::from(pane)),
                    alignment(raw),
                    Insets::ZERO,
                );
            }
        }

        panel.validate().expect("pane tree invariants hold");
        assert_eq!(host.dangling_relationships(), 0, "relationship outlived its surface");
    }
});
