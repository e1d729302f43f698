#![allow(dead_code)]

use std::path::PathBuf;

use ar_scenes::{
    cgmath::{InnerSpace, Vector3},
    data_structures::{
        geometry::{Color, Geometry, Material},
        instance::Instance,
        scene_graph::{ContainerNode, GeometryNode, SceneNode},
    },
    resources::{AssetError, AssetLoader},
    tracking::{Anchor, PlaneAlignment, PlaneAnchor},
};

pub(crate) fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub(crate) fn plane_anchor(id: u64, extent: (f32, f32), center: (f32, f32, f32)) -> Anchor {
    Anchor::Plane(PlaneAnchor::new(id, PlaneAlignment::Horizontal, extent, center))
}

pub(crate) fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    assert!(
        (actual - expected).magnitude() < 1e-5,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

/// Hands out a fresh asset on every call whose first child carries an
/// arbitrary transform of its own.
pub(crate) struct OffsetModelLoader;

impl AssetLoader for OffsetModelLoader {
    fn load(&self, _: &str, _: &str) -> Result<Box<dyn SceneNode>, AssetError> {
        let mut model = GeometryNode::new(
            "model",
            Geometry::cube(1.0),
            Material::from_color(Color::WHITE),
        );
        model.set_local_transform(Instance {
            position: Vector3::new(4.0, -2.0, 7.5),
            scale: Vector3::new(2.0, 3.0, 5.0),
            ..Default::default()
        });
        let mut root = ContainerNode::new("asset-root");
        root.add_child(Box::new(model));
        root.add_child(Box::new(ContainerNode::new("ignored")));
        Ok(Box::new(root))
    }
}

/// Always fails to parse.
pub(crate) struct BrokenLoader;

impl AssetLoader for BrokenLoader {
    fn load(&self, _: &str, _: &str) -> Result<Box<dyn SceneNode>, AssetError> {
        Err(AssetError::AssetLoadFailure("unexpected token".to_string()))
    }
}

/// Children of `node` that draw a plane.
pub(crate) fn plane_children(node: &dyn SceneNode) -> Vec<&dyn SceneNode> {
    node.get_children()
        .iter()
        .map(|child| child.as_ref())
        .filter(|child| {
            matches!(
                child.geometry(),
                Some((Geometry::Plane { .. }, _))
            )
        })
        .collect()
}
