use std::f32::consts::FRAC_PI_2;

use crate::{
    context::Context,
    data_structures::{
        geometry::{Color, Geometry, Material},
        instance::Instance,
        scene_graph::{GeometryNode, Scene, SceneNode},
    },
    flow::ArFlow,
    tracking::TrackingConfiguration,
};

/// Places two decorative groups at fixed coordinates in front of the camera:
/// a flat horizontal surface with a sphere on it, and an upright surface with
/// a cube in front of it. Nothing reacts to tracking data.
#[derive(Debug, Default)]
pub struct StaticSceneScreen;

impl StaticSceneScreen {
    pub fn new() -> Self {
        Self
    }

    fn node(
        name: &str,
        geometry: Geometry,
        color: Color,
        transform: Instance,
    ) -> Box<dyn SceneNode> {
        let mut node = GeometryNode::new(name, geometry, Material::from_color(color));
        node.set_local_transform(transform);
        Box::new(node)
    }

    pub fn compose_scene() -> Scene {
        let mut scene = Scene::new();
        let root = scene.root_node_mut();

        let mut horizontal_plane = Self::node(
            "horizontal-plane",
            Geometry::plane(0.5, 0.5),
            Color::BLUE.with_alpha(0.5),
            Instance::at(0.0, -0.5, -1.0),
        );
        // lay flat
        horizontal_plane
            .local_transform_mut()
            .set_euler_angles(-FRAC_PI_2, 0.0, 0.0);
        root.add_child(horizontal_plane);

        root.add_child(Self::node(
            "sphere",
            Geometry::sphere(0.1),
            Color::RED,
            Instance::at(0.0, -0.5, -1.0),
        ));

        root.add_child(Self::node(
            "vertical-plane",
            Geometry::plane(0.5, 0.5),
            Color::GREEN.with_alpha(0.5),
            Instance::at(0.0, 0.0, -1.0),
        ));

        root.add_child(Self::node(
            "box",
            Geometry::cube(0.1),
            Color::YELLOW,
            Instance::at(0.0, 0.0, -1.0),
        ));

        scene
    }
}

impl ArFlow for StaticSceneScreen {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.session.run(TrackingConfiguration::world_tracking());
        ctx.scene = Self::compose_scene();
    }

    fn name(&self) -> &str {
        "static scene"
    }
}
