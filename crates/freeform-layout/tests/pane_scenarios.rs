//! End-to-end scenarios over the public panel API with the headless host.
//!
//! Run:
//!   cargo test -p freeform-layout --test pane_scenarios

use std::io::Write as _;

use freeform_core::color::{Background, Rgba};
use freeform_core::geometry::{Axis, Frame, Insets, Size};
use freeform_layout::headless::{HeadlessContent, HeadlessHost, SurfaceId};
use freeform_layout::{
    Alignment, ContentHandle, ContentKind, FreeformConfig, FreeformPanel, PaneContent, PaneId,
    PaneRejection,
};

type Content = PaneContent<HeadlessContent, HeadlessContent>;
type Panel = FreeformPanel<HeadlessHost, Content>;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;

fn setup(config: FreeformConfig) -> (Panel, HeadlessHost, SurfaceId) {
    let host = HeadlessHost::new();
    let root = host.create_root(Size::new(WIDTH, HEIGHT));
    let panel = FreeformPanel::new(host.clone(), root, config);
    (panel, host, root)
}

fn id(raw: u64) -> PaneId {
    PaneId::new(raw)
}

fn frame(panel: &Panel, host: &HeadlessHost, pane: PaneId) -> Frame {
    let surface = *panel
        .background_surface_for(pane)
        .expect("pane should exist");
    *host
        .resolve()
        .get(&surface)
        .expect("pane surface should resolve")
}

/// Camera view on the left, a map and a status strip stacked on the right.
fn operator_layout(panel: &mut Panel) -> (PaneId, PaneId, PaneId) {
    let columns = panel.split_pane(PaneId::ROOT, Axis::Horizontal, &[0.75, 0.25]);
    assert_eq!(columns, vec![id(1), id(2)]);
    let stack = panel.split_pane(columns[1], Axis::Vertical, &[0.5, 0.5]);
    assert_eq!(stack, vec![id(3), id(4)]);
    (columns[0], stack[0], stack[1])
}

#[test]
fn operator_layout_resolves_to_expected_frames() {
    let (mut panel, host, _) = setup(FreeformConfig::default());
    let (camera, map, status) = operator_layout(&mut panel);

    assert_eq!(frame(&panel, &host, camera), Frame::new(0.0, 0.0, 900.0, 800.0));
    assert_eq!(frame(&panel, &host, map), Frame::new(900.0, 0.0, 300.0, 400.0));
    assert_eq!(
        frame(&panel, &host, status),
        Frame::new(900.0, 400.0, 300.0, 400.0)
    );
    assert_eq!(panel.visible_panes(), &[camera, map, status]);
    panel.validate().expect("layout should be valid");
}

#[test]
fn undershooting_proportions_leave_the_remainder_to_the_last_child() {
    let (mut panel, host, _) = setup(FreeformConfig::default());
    let rows = panel.split_pane(PaneId::ROOT, Axis::Vertical, &[0.25, 0.25, 0.25]);
    assert_eq!(frame(&panel, &host, rows[0]).height, 200.0);
    assert_eq!(frame(&panel, &host, rows[1]).y, 200.0);
    assert_eq!(frame(&panel, &host, rows[2]), Frame::new(0.0, 400.0, WIDTH, 400.0));
}

#[test]
fn widget_and_view_content_share_one_installation_path() {
    let (mut panel, host, _) = setup(FreeformConfig::default());
    let (camera, map, _) = operator_layout(&mut panel);

    let widget = HeadlessContent::new(&host, Size::new(320.0, 240.0));
    let view = HeadlessContent::new(&host, Size::new(100.0, 40.0));
    let (widget_log, view_log) = (widget.observer(), view.observer());

    assert!(panel.add_content(camera, PaneContent::Widget(widget)));
    assert!(panel.add_content_aligned(
        map,
        PaneContent::View(view),
        Alignment::TopTrailing,
        Insets::new(8.0, 0.0, 0.0, 12.0),
    ));

    assert!(widget_log.is_attached());
    assert!(view_log.is_attached());
    assert_eq!(
        panel.content(camera).map(PaneContent::kind),
        Some(ContentKind::Widget)
    );
    assert_eq!(panel.alignment(map), Some(Alignment::TopTrailing));

    let view_surface = panel
        .content(map)
        .map(ContentHandle::surface)
        .expect("view installed");
    let resolved = host.resolve();
    assert_eq!(resolved[&view_surface], Frame::new(1088.0, 8.0, 100.0, 40.0));
}

#[test]
fn content_lookup_spans_nested_panes() {
    let (mut panel, host, _) = setup(FreeformConfig::default());
    let (_, map, status) = operator_layout(&mut panel);
    let gauge = PaneContent::View(HeadlessContent::new(&host, Size::new(10.0, 10.0)));
    assert!(panel.add_content(status, gauge.clone()));

    assert_eq!(panel.find_pane_containing_content(&gauge), Some(status));
    let map_surface = *panel.background_surface_for(map).expect("map pane");
    assert_eq!(panel.find_pane_containing(&map_surface), Some(map));

    // The internal column is never reported; only visible leaves match.
    let column_surface = *panel.background_surface_for(id(2)).expect("column pane");
    assert_eq!(panel.find_pane_containing(&column_surface), None);
}

#[test]
fn merging_a_column_detaches_its_content_and_frees_surfaces() {
    let (mut panel, host, _) = setup(FreeformConfig::default());
    let (camera, map, status) = operator_layout(&mut panel);
    let map_view = HeadlessContent::new(&host, Size::new(10.0, 10.0));
    let map_log = map_view.observer();
    assert!(panel.add_content(map, PaneContent::View(map_view)));
    let surfaces_before = host.surface_count();

    assert_eq!(panel.merge_siblings(status), Some(id(2)));
    assert_eq!(map_log.log().detaches, 1);
    assert!(!map_log.is_attached());
    assert_eq!(panel.visible_panes(), &[camera, id(2)]);
    assert_eq!(host.surface_count(), surfaces_before - 2);
    assert_eq!(host.dangling_relationships(), 0);
    assert_eq!(frame(&panel, &host, id(2)), Frame::new(900.0, 0.0, 300.0, 800.0));
    panel.validate().expect("valid after merge");
}

#[test]
fn ids_are_never_reused_across_merge_cycles() {
    let (mut panel, _, _) = setup(FreeformConfig::default());
    let first = panel.split_pane(PaneId::ROOT, Axis::Horizontal, &[0.5, 0.5]);
    let _ = panel.merge_children(PaneId::ROOT);
    let second = panel.split_pane(PaneId::ROOT, Axis::Horizontal, &[0.5, 0.5]);
    assert_eq!(first, vec![id(1), id(2)]);
    assert_eq!(second, vec![id(3), id(4)]);
    assert!(!panel.contains(id(1)));
    assert_eq!(panel.get_parent(id(1)), None);
}

#[test]
fn rejected_requests_leave_host_untouched() {
    let (mut panel, host, _) = setup(FreeformConfig::default());
    let (camera, _, _) = operator_layout(&mut panel);
    let before = (host.stats(), panel.visible_panes().to_vec(), panel.pane_count());

    assert_eq!(
        panel.try_split_pane(id(2), Axis::Vertical, &[0.5, 0.5]),
        Err(PaneRejection::NotLeaf { pane: id(2) })
    );
    assert!(matches!(
        panel.try_split_pane(camera, Axis::Vertical, &[0.6, 0.3, 0.3]),
        Err(PaneRejection::OutOfTolerance { .. })
    ));
    assert_eq!(
        panel.try_merge_children(camera),
        Err(PaneRejection::AlreadyLeaf { pane: camera })
    );
    assert_eq!(
        panel.try_merge_siblings(PaneId::ROOT),
        Err(PaneRejection::RootHasNoParent { pane: PaneId::ROOT })
    );
    let stray = PaneContent::View(HeadlessContent::new(&host, Size::new(1.0, 1.0)));
    assert_eq!(
        panel.try_add_content(id(2), stray, Alignment::Center, Insets::ZERO),
        Err(PaneRejection::NotLeaf { pane: id(2) })
    );
    assert_eq!(
        panel.try_set_alignment(id(99), Alignment::Top, Insets::ZERO),
        Err(PaneRejection::UnknownPane { pane: id(99) })
    );

    let after = (host.stats(), panel.visible_panes().to_vec(), panel.pane_count());
    assert_eq!(before, after);
}

#[test]
fn config_file_drives_tolerance_and_background() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "split_tolerance = 0.25\n\n[panel_background]\ncolor = {{ r = 10, g = 20, b = 30, a = 255 }}"
    )
    .expect("write config");
    let config = FreeformConfig::from_toml_file(file.path()).expect("config loads");
    let (mut panel, host, root) = setup(config);

    let halves = panel.split_pane(PaneId::ROOT, Axis::Horizontal, &[0.6, 0.6]);
    assert_eq!(halves.len(), 2);
    assert_eq!(host.background(root), Some(Background::Clear));
    let _ = panel.merge_children(PaneId::ROOT);
    assert_eq!(
        host.background(root),
        Some(Background::Color(Rgba::new(10, 20, 30, 255)))
    );
}

#[test]
fn debug_overlay_from_config_labels_and_exports() {
    let config = FreeformConfig {
        debug_overlay: true,
        ..FreeformConfig::default()
    };
    let (mut panel, host, root) = setup(config);
    assert_eq!(host.label(root).as_deref(), Some("pane 0"));

    let (camera, _, _) = operator_layout(&mut panel);
    let camera_surface = *panel.background_surface_for(camera).expect("camera");
    assert_eq!(host.label(camera_surface).as_deref(), Some("pane 1"));
    assert_eq!(host.label(root), None);

    let _ = panel.merge_children(PaneId::ROOT);
    assert_eq!(host.label(root).as_deref(), Some("pane 0"));

    let report = panel.debugger().report();
    assert!(report.contains("3 operations"));
    assert!(report.contains("merge 0 destroyed"));

    let dot = panel.to_dot();
    assert!(dot.starts_with("digraph FreeformPanes {"));
    assert!(dot.contains("p0 [label="));
    assert!(!dot.contains("->"));
}
