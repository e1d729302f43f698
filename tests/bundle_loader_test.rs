use ar_scenes::{
    cgmath::Vector3,
    data_structures::{geometry::Color, scene_graph::SceneNode},
    resources::{AssetError, AssetLoader, BundleLoader},
};

use crate::common::test_utils::{assert_close, fixtures};

mod common;

#[test]
fn obj_objects_become_children_with_mtl_colours() {
    let root = BundleLoader::new(fixtures())
        .load("ExternalObject", "obj")
        .expect("fixture loads");

    assert_eq!(root.name(), "ExternalObject");
    assert_eq!(root.get_children().len(), 1);
    let pyramid = &root.get_children()[0];
    assert_eq!(pyramid.name(), "Pyramid");

    let model = pyramid.model().expect("pyramid has meshes");
    let mesh = &model.meshes[0];
    // four side triangles plus the base quad split in two
    assert_eq!(mesh.indices.len(), 18);
    assert_eq!(mesh.bounds(), Some(([-0.5, 0.0, -0.5], [0.5, 1.0, 0.5])));
    assert_eq!(
        model.material_for(mesh).diffuse,
        Color::rgb(0.60, 0.55, 0.50)
    );
}

#[test]
fn parse_failures_carry_a_description() {
    let err = BundleLoader::new(fixtures().join("broken"))
        .load("ExternalObject", "obj")
        .err()
        .expect("broken fixture fails");
    match err {
        AssetError::AssetLoadFailure(description) => assert!(!description.is_empty()),
        other => panic!("expected a load failure, got {:?}", other),
    }
}

#[test]
fn unknown_extension_is_a_load_failure() {
    // the file exists, the format is not supported
    let err = BundleLoader::new(fixtures())
        .load("ExternalObject", "mtl")
        .err()
        .expect("mtl is not a model format");
    assert!(matches!(err, AssetError::AssetLoadFailure(_)), "{:?}", err);
}

#[test]
fn gltf_keeps_hierarchy_and_node_transforms() {
    let root = BundleLoader::new(fixtures().join("gltf"))
        .load("Tower", "gltf")
        .expect("gltf fixture loads");

    let names: Vec<_> = root.get_children().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["Tower", "Marker"]);

    let tower = &root.get_children()[0];
    assert_close(tower.get_local_transform().position, Vector3::new(5.0, 5.0, 5.0));
    assert_close(tower.get_local_transform().scale, Vector3::new(3.0, 3.0, 3.0));
    let model = tower.model().expect("tower has a mesh");
    assert_eq!(model.meshes[0].positions.len(), 3);
    assert_eq!(model.meshes[0].indices, vec![0, 1, 2]);
    assert_eq!(
        model.material_for(&model.meshes[0]).diffuse,
        Color { r: 0.8, g: 0.2, b: 0.1, a: 1.0 }
    );

    let flag = &tower.get_children()[0];
    assert_eq!(flag.name(), "Flag");
    assert!(flag.model().is_none());
}

#[test]
fn world_transform_of_a_gltf_child_includes_its_parent() {
    let mut root = BundleLoader::new(fixtures().join("gltf"))
        .load("Tower", "gltf")
        .expect("gltf fixture loads");
    root.update_world_transforms(&Default::default());

    let flag = &root.get_children()[0].get_children()[0];
    // (0, 1, 0) scaled by 3 and moved by (5, 5, 5)
    assert_close(flag.get_world_transform().position, Vector3::new(5.0, 8.0, 5.0));
}

#[test]
fn bundled_copy_serves_the_external_object() {
    let loader = BundleLoader::bundled();
    assert!(loader.root().ends_with("assets"));

    let root = loader
        .load("ExternalObject", "obj")
        .expect("bundled model loads");
    assert_eq!(root.get_children().len(), 1);
    assert_eq!(root.get_children()[0].name(), "Pyramid");
}

#[test]
fn environment_loader_falls_back_to_the_bundled_copy() {
    let expected = match std::env::var_os(BundleLoader::ENV_VAR) {
        Some(dir) => std::path::PathBuf::from(dir),
        None => BundleLoader::bundled().root().to_path_buf(),
    };
    assert_eq!(BundleLoader::from_env().root(), expected.as_path());
}
