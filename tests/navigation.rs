// Scenario tests for the interactive chart: zoom in and out, breadcrumbs,
// observer events, re-entrancy and reset.

use std::{cell::RefCell, f64::consts::{PI, TAU}, rc::Rc};

use sunburst::{
    hierarchy::{RegionRecord, SchemeRecord, VillageRecord},
    Activation, ArcState, Callbacks, Dataset, FocusEvent, IgnoreReason, NodeId, Sunburst, SunburstConfig, Tick,
};

fn scheme(id: &str, region: &str) -> SchemeRecord {
    SchemeRecord { id: id.into(), name: format!("Scheme {id}"), region: region.into(), ..Default::default() }
}

/// Region A with three schemes and region B with one.
fn two_regions() -> Sunburst {
    let dataset = Dataset::new(
        vec![
            RegionRecord { name: "B".into(), ..Default::default() },
            RegionRecord { name: "A".into(), ..Default::default() },
        ],
        vec![scheme("a1", "A"), scheme("a2", "A"), scheme("a3", "A"), scheme("b1", "B")],
        vec![],
    );
    Sunburst::from_dataset(&dataset, None, SunburstConfig::default())
}

fn region(chart: &Sunburst, name: &str) -> NodeId {
    chart.tree().child_named(NodeId::ROOT, name).unwrap()
}

fn names(chart: &Sunburst) -> Vec<String> {
    chart.breadcrumb().iter().map(|c| c.name.clone()).collect()
}

#[test]
fn two_regions_split_three_to_one() {
    let chart = two_regions();
    let (a, b) = (region(&chart, "A"), region(&chart, "B"));

    let a_state = chart.current(a).unwrap();
    let b_state = chart.current(b).unwrap();
    assert!(a_state.approx_eq(&ArcState::new(0.0, 1.5 * PI, 1.0, 2.0), 1e-9));
    assert!(b_state.approx_eq(&ArcState::new(1.5 * PI, TAU, 1.0, 2.0), 1e-9));
    assert_eq!(chart.tree().root().children(), &[a, b]);
    assert_eq!(names(&chart), ["Maharashtra"]);
}

#[test]
fn zoom_into_region_updates_breadcrumb_and_notifies() {
    let mut chart = two_regions();
    let a = region(&chart, "A");

    let events: Rc<RefCell<Vec<FocusEvent>>> = Rc::default();
    let sink = events.clone();
    chart.subscribe(Callbacks::new().on_focus(move |e| sink.borrow_mut().push(e.clone())));

    assert_eq!(chart.activate(a, 0.0), Activation::Started { focus: a });
    assert!(chart.target(a).unwrap().approx_eq(&ArcState::new(0.0, TAU, 0.0, 1.0), 1e-9));
    assert!(events.borrow().is_empty());

    assert!(matches!(chart.tick(400.0), Tick::Running { .. }));
    assert_eq!(chart.tick(1000.0), Tick::Completed { focus: a });

    assert_eq!(names(&chart), ["Maharashtra", "A"]);
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(events.borrow()[0].path, ["Maharashtra", "A"]);
    assert_eq!(events.borrow()[0].details["name"], "A");

    // B is squeezed to zero width at the end of the circle and leaves the frame.
    let b = region(&chart, "B");
    assert!(chart.current(b).unwrap().is_degenerate());
    assert!(chart.frame().wedge(b).is_none());
}

#[test]
fn zoom_in_then_out_restores_every_state() {
    let mut chart = two_regions();
    let before: Vec<_> = chart.tree().iter().map(|n| chart.current(n.id()).unwrap()).collect();

    let a = region(&chart, "A");
    chart.activate(a, 0.0);
    chart.tick(1000.0);
    assert_eq!(chart.zoom_out(2000.0), Activation::Started { focus: NodeId::ROOT });
    chart.tick(3000.0);

    for (node, expected) in chart.tree().iter().zip(&before) {
        assert!(chart.current(node.id()).unwrap().approx_eq(expected, 1e-9), "{}", node.name());
    }
    assert_eq!(names(&chart), ["Maharashtra"]);
    assert_eq!(chart.zoom_out(4000.0), Activation::Ignored(IgnoreReason::AlreadyFocused));
}

#[test]
fn zoom_out_from_scheme_restores_region_view() {
    let village = |name: &str, scheme: &str| VillageRecord {
        name: name.into(),
        scheme_id: Some(scheme.into()),
        ..Default::default()
    };
    let dataset = Dataset::new(
        vec![RegionRecord { name: "A".into(), ..Default::default() }, RegionRecord { name: "B".into(), ..Default::default() }],
        vec![scheme("a1", "A"), scheme("a2", "A"), scheme("b1", "B")],
        vec![village("v1", "a1"), village("v2", "a1"), village("v3", "a2"), village("v4", "b1")],
    );
    let mut chart = Sunburst::from_dataset(&dataset, None, SunburstConfig::default());
    let a = region(&chart, "A");
    let scheme_a1 = chart.tree().child_named(a, "Scheme a1").unwrap();

    chart.activate(a, 0.0);
    assert_eq!(chart.tick(1000.0), Tick::Completed { focus: a });
    let region_view: Vec<_> = chart.tree().iter().map(|n| chart.current(n.id()).unwrap()).collect();

    assert!(chart.activate(scheme_a1, 2000.0).is_started());
    assert_eq!(chart.tick(3000.0), Tick::Completed { focus: scheme_a1 });
    assert_eq!(names(&chart), ["Maharashtra", "A", "Scheme a1"]);
    assert!(chart.current(scheme_a1).unwrap().approx_eq(&ArcState::new(0.0, TAU, 0.0, 1.0), 1e-9));

    assert_eq!(chart.zoom_out(4000.0), Activation::Started { focus: a });
    assert_eq!(chart.tick(5000.0), Tick::Completed { focus: a });
    for (node, expected) in chart.tree().iter().zip(&region_view) {
        assert!(chart.current(node.id()).unwrap().approx_eq(expected, 1e-9), "{}", node.name());
    }
    assert_eq!(names(&chart), ["Maharashtra", "A"]);
}

#[test]
fn activation_during_animation_is_dropped() {
    let mut chart = two_regions();
    let (a, b) = (region(&chart, "A"), region(&chart, "B"));
    let first = chart.tree().node(a).children()[0];

    chart.activate(a, 0.0);
    chart.tick(500.0);
    let target = chart.target(a);

    assert_eq!(chart.activate(first, 600.0), Activation::Ignored(IgnoreReason::Animating));
    assert_eq!(chart.activate(b, 600.0), Activation::Ignored(IgnoreReason::Animating));
    assert_eq!(chart.zoom_out(600.0), Activation::Ignored(IgnoreReason::Animating));
    assert_eq!(chart.target(a), target);

    assert_eq!(chart.tick(1000.0), Tick::Completed { focus: a });
}

#[test]
fn leaves_cannot_be_activated() {
    let mut chart = two_regions();
    let leaf = chart.tree().node(region(&chart, "B")).children()[0];
    assert_eq!(chart.activate(leaf, 0.0), Activation::Ignored(IgnoreReason::Leaf));
    assert!(!chart.is_animating());
}

#[test]
fn reset_mid_animation_snaps_to_canonical() {
    let mut chart = two_regions();
    let events = Rc::new(RefCell::new(0));
    let sink = events.clone();
    chart.subscribe(Callbacks::new().on_focus(move |_| *sink.borrow_mut() += 1));

    chart.activate(region(&chart, "A"), 0.0);
    chart.tick(300.0);
    let published = chart.frame();

    chart.reset();
    assert!(!chart.is_animating());
    for node in chart.tree().iter() {
        assert_eq!(chart.current(node.id()), Some(node.canonical()));
        assert_eq!(chart.target(node.id()), None);
    }
    assert_eq!(chart.focus(), NodeId::ROOT);
    assert_eq!(*events.borrow(), 1);
    assert_eq!(chart.tick(2000.0), Tick::Idle);

    // A frame taken before the reset is unaffected by it.
    assert!(published.animating);
    assert!(!chart.frame().animating);
}

#[test]
fn set_data_replaces_tree_and_returns_to_root() {
    let mut chart = two_regions();
    chart.activate(region(&chart, "A"), 0.0);

    let dataset = Dataset::new(vec![RegionRecord { name: "C".into(), ..Default::default() }], vec![scheme("c1", "C")], vec![]);
    chart.set_data(dataset.to_hierarchy(&Default::default(), None));

    assert!(!chart.is_animating());
    assert_eq!(chart.tree().len(), 3);
    assert_eq!(names(&chart), ["Maharashtra"]);
    assert!(chart.current(region(&chart, "C")).unwrap().approx_eq(&ArcState::new(0.0, TAU, 1.0, 2.0), 1e-9));
}

#[test]
fn frame_opacity_and_labels() {
    let chart = two_regions();
    let frame = chart.frame();
    let a = region(&chart, "A");

    let wedge = frame.wedge(a).unwrap();
    assert_eq!(wedge.opacity, sunburst::BRANCH_OPACITY);
    assert!(wedge.interactive);
    assert!(!wedge.label.unwrap().flipped);

    let leaf = chart.tree().node(a).children()[0];
    assert_eq!(frame.wedge(leaf).unwrap().opacity, sunburst::LEAF_OPACITY);
    assert!(frame.wedge(NodeId::ROOT).is_none());

    // B's mid-angle is past 180 degrees, so its label is turned over.
    assert!(frame.wedge(region(&chart, "B")).unwrap().label.unwrap().flipped);
}
