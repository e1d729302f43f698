use std::f32::consts::FRAC_PI_2;

use ar_scenes::{
    cgmath::Vector3,
    data_structures::{
        geometry::{Color, Geometry, GeometryKind},
        scene_graph::SceneNode,
    },
    flow::{self, ArFlow, FlowConstructor},
    screens::StaticSceneScreen,
    tracking::{
        Anchor, AnchorEvent, PlaneAlignment, PlaneAnchor, PlaneDetection, ScriptedEngine,
        SessionState,
    },
};

use crate::common::test_utils::assert_close;

mod common;

fn run_static(engine: ScriptedEngine) -> flow::App {
    let constructor: FlowConstructor =
        Box::new(|| Box::new(StaticSceneScreen::new()) as Box<dyn ArFlow>);
    flow::run(constructor, Box::new(engine), 1)
}

#[test]
fn composes_exactly_four_fixed_nodes() {
    let app = run_static(ScriptedEngine::new());
    let scene = &app.context().scene;
    assert_eq!(scene.node_count(), 4);

    let mut kinds: Vec<_> = scene
        .root_node()
        .get_children()
        .iter()
        .map(|node| node.geometry().expect("every node draws something").0.kind())
        .collect();
    kinds.sort();
    assert_eq!(
        kinds,
        vec![
            GeometryKind::Plane,
            GeometryKind::Plane,
            GeometryKind::Sphere,
            GeometryKind::Box
        ]
    );
}

#[test]
fn shapes_sizes_colours_and_positions_match_the_layout() {
    let app = run_static(ScriptedEngine::new());
    let scene = &app.context().scene;

    let expectations = [
        (
            "horizontal-plane",
            Geometry::plane(0.5, 0.5),
            Color::BLUE.with_alpha(0.5),
            Vector3::new(0.0, -0.5, -1.0),
        ),
        (
            "sphere",
            Geometry::sphere(0.1),
            Color::RED,
            Vector3::new(0.0, -0.5, -1.0),
        ),
        (
            "vertical-plane",
            Geometry::plane(0.5, 0.5),
            Color::GREEN.with_alpha(0.5),
            Vector3::new(0.0, 0.0, -1.0),
        ),
        (
            "box",
            Geometry::cube(0.1),
            Color::YELLOW,
            Vector3::new(0.0, 0.0, -1.0),
        ),
    ];
    for (name, geometry, color, position) in expectations {
        let node = scene.find(name).unwrap_or_else(|| panic!("{} is missing", name));
        let (actual_geometry, material) = node.geometry().expect("node has geometry");
        assert_eq!(actual_geometry, &geometry, "{}", name);
        assert_eq!(material.diffuse, color, "{}", name);
        assert_eq!(node.get_local_transform().position, position, "{}", name);
    }
}

#[test]
fn only_the_horizontal_plane_is_rotated() {
    let app = run_static(ScriptedEngine::new());
    let scene = &app.context().scene;

    let horizontal = scene.find("horizontal-plane").expect("horizontal plane");
    let euler = horizontal.get_local_transform().euler_angles();
    assert!((euler.x.0 + FRAC_PI_2).abs() < 1e-5, "got {:?}", euler);
    assert_close(horizontal.get_local_transform().forward(), Vector3::unit_y());

    let vertical = scene.find("vertical-plane").expect("vertical plane");
    assert_close(vertical.get_local_transform().forward(), Vector3::unit_z());
}

#[test]
fn runs_world_tracking_without_plane_detection() {
    let engine = ScriptedEngine::with_events([AnchorEvent::Added(Anchor::Plane(PlaneAnchor::new(
        1,
        PlaneAlignment::Horizontal,
        (1.0, 1.0),
        (0.0, 0.0, 0.0),
    )))]);
    let mut app = run_static(engine);

    let session = &app.context().session;
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(
        session.configuration().map(|c| c.plane_detection),
        Some(PlaneDetection::empty())
    );
    assert!(!app.context().has_anchor_handler());
    // the plane is never reported, so the layout stays untouched
    assert_eq!(app.tick(), 0);
    assert_eq!(app.context().scene.node_count(), 4);
}

#[test]
fn frame_splits_translucent_surfaces_from_solid_markers() {
    let mut app = run_static(ScriptedEngine::new());
    let frame = app.frame();

    assert_eq!(frame.opaque.len(), 2);
    assert_eq!(frame.transparent.len(), 2);
    assert!(frame.light.is_none());
    assert!(frame.overlays.world_origin.is_none());
}
