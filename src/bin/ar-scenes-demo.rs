//! Runs both screens against a scripted tracking engine and logs what each
//! frame would draw.
//!
//! `RUST_LOG` controls verbosity (default `info`), `AR_SCENES_ASSETS` points
//! at the resource bundle (default: the copy made at build time).

use ar_scenes::{
    data_structures::instance::Instance,
    flow::{self, ArFlow, FlowConstructor},
    render::Frame,
    screens::{PlaneAnchoredSceneScreen, StaticSceneScreen},
    tracking::{Anchor, AnchorEvent, PlaneAlignment, PlaneAnchor, ScriptedEngine},
};

fn describe(screen: &str, frame: &Frame) {
    log::info!(
        "{}: {} opaque, {} transparent, {} feature point(s), lighting {}",
        screen,
        frame.opaque.len(),
        frame.transparent.len(),
        frame.overlays.feature_points.len(),
        if frame.light.is_some() { "on" } else { "off" }
    );
    for drawable in frame.opaque.iter().chain(frame.transparent.iter()) {
        log::info!(
            "  {} {:?} at {:?}",
            drawable.node,
            drawable.shape,
            drawable.transform.position
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let static_screen: FlowConstructor =
        Box::new(|| Box::new(StaticSceneScreen::new()) as Box<dyn ArFlow>);
    let mut app = flow::run(static_screen, Box::new(ScriptedEngine::new()), 1);
    describe("static scene", &app.frame());

    let engine = ScriptedEngine::with_events([
        AnchorEvent::Added(Anchor::Plane(
            PlaneAnchor::new(1, PlaneAlignment::Horizontal, (2.0, 1.5), (0.3, 0.0, -0.2))
                .with_transform(Instance::at(0.0, -1.2, -1.5)),
        )),
        AnchorEvent::Added(Anchor::Plane(
            PlaneAnchor::new(2, PlaneAlignment::Vertical, (1.0, 2.0), (0.0, 0.0, 0.0))
                .with_transform(Instance::at(0.0, 0.0, -3.0)),
        )),
    ])
    .with_feature_points(vec![[0.1, -1.2, -1.4], [-0.2, -1.2, -1.6]]);
    let plane_screen: FlowConstructor =
        Box::new(|| Box::new(PlaneAnchoredSceneScreen::new()) as Box<dyn ArFlow>);
    let mut app = flow::run(plane_screen, Box::new(engine), 1);
    describe("plane anchored scene", &app.frame());

    Ok(())
}
