use crate::data_structures::{
    geometry::Material,
    model::{Mesh, Model},
    scene_graph::{ModelNode, SceneNode},
};

/**
 * Turns every object of an OBJ file into its own `ModelNode`.
 *
 * OBJ has no node transforms, so every node starts at the identity; the
 * object's placement is baked into its vertex positions. Objects without any
 * faces are skipped.
 */
pub fn load_mesh_nodes(models: &[tobj::Model], materials: &[Material]) -> Vec<Box<dyn SceneNode>> {
    models
        .iter()
        .filter(|m| !m.mesh.indices.is_empty())
        .map(|m| {
            let positions = m
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect::<Vec<_>>();
            // Normals are optional in OBJ, missing ones are left empty
            let normals = m
                .mesh
                .normals
                .chunks_exact(3)
                .map(|n| [n[0], n[1], n[2]])
                .collect::<Vec<_>>();

            let material = m
                .mesh
                .material_id
                .and_then(|idx| materials.get(idx))
                .cloned()
                .unwrap_or_default();

            let model = Model {
                meshes: vec![Mesh {
                    name: m.name.clone(),
                    positions,
                    normals,
                    // The indices are for positions and normals because `single_index` is set
                    indices: m.mesh.indices.clone(),
                    material: 0,
                }],
                materials: vec![material],
            };
            Box::new(ModelNode::from_model(&m.name, model)) as Box<dyn SceneNode>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::data_structures::geometry::Color;

    use super::*;

    fn obj_model(name: &str, material_id: Option<usize>) -> tobj::Model {
        tobj::Model::new(
            tobj::Mesh {
                positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                indices: vec![0, 1, 2],
                material_id,
                ..Default::default()
            },
            name.to_string(),
        )
    }

    #[test]
    fn each_object_becomes_a_node_with_its_material() {
        let materials = vec![Material::new("red", Color::RED)];
        let nodes = load_mesh_nodes(
            &[obj_model("first", Some(0)), obj_model("second", None)],
            &materials,
        );

        assert_eq!(nodes.len(), 2);
        let first = nodes[0].model().expect("model node");
        assert_eq!(first.meshes[0].positions.len(), 3);
        assert_eq!(first.material_for(&first.meshes[0]).diffuse, Color::RED);
        let second = nodes[1].model().expect("model node");
        assert_eq!(second.material_for(&second.meshes[0]), Material::default());
    }

    #[test]
    fn objects_without_faces_are_skipped() {
        let empty = tobj::Model::new(tobj::Mesh::default(), "unnamed_object".to_string());
        assert!(load_mesh_nodes(&[empty], &[]).is_empty());
    }
}
