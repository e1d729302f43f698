//! Scene graph and hierarchical scene organization.
//!
//! A [`Scene`] owns a root [`ContainerNode`]. Every node stores a local
//! transform relative to its parent and a cached world transform that
//! [`Scene::update_world_transforms`] refreshes top-down. Nodes that carry
//! something visible ([`GeometryNode`], [`ModelNode`]) always have a material.

use std::fmt::Debug;

use log::warn;

use crate::{
    data_structures::{
        geometry::{Geometry, Material},
        instance::Instance,
        model::{self, Mesh},
    },
    render::{Drawable, Shape},
};

/// State every node kind shares: name, transforms and children.
#[derive(Debug, Default)]
pub struct NodeCore {
    pub name: String,
    /// (local, world)
    pub transform: (Instance, Instance),
    pub children: Vec<Box<dyn SceneNode>>,
}

impl NodeCore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

pub trait SceneNode: Debug {
    fn core(&self) -> &NodeCore;

    fn core_mut(&mut self) -> &mut NodeCore;

    /// Primitive shape and its material, if this node draws one.
    fn geometry(&self) -> Option<(&Geometry, &Material)> {
        None
    }

    /// Loaded mesh data, if this node draws any.
    fn model(&self) -> Option<&model::Model> {
        None
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn get_local_transform(&self) -> &Instance {
        &self.core().transform.0
    }

    fn local_transform_mut(&mut self) -> &mut Instance {
        &mut self.core_mut().transform.0
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.core_mut().transform.0 = instance;
    }

    /// Only valid after the last [`SceneNode::update_world_transforms`] call.
    fn get_world_transform(&self) -> &Instance {
        &self.core().transform.1
    }

    fn update_world_transforms(&mut self, parents_world_transform: &Instance) {
        let core = self.core_mut();
        let world = parents_world_transform * &core.transform.0;
        for child in core.children.iter_mut() {
            child.update_world_transforms(&world);
        }
        core.transform.1 = world;
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.core().children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.core_mut().children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.core_mut().children.push(child);
    }

    /// Detaches and returns the first child, handing ownership to the caller.
    fn take_first_child(&mut self) -> Option<Box<dyn SceneNode>> {
        let children = self.get_children_mut();
        if children.is_empty() {
            None
        } else {
            Some(children.remove(0))
        }
    }

    /// Number of nodes below this one, not counting itself.
    fn descendant_count(&self) -> usize {
        self.get_children()
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    fn get_render(&self) -> Vec<Drawable<'_>> {
        let world = self.get_world_transform();
        let own = self
            .geometry()
            .map(|(geometry, material)| Drawable {
                node: self.name(),
                shape: Shape::Primitive(geometry),
                material: material.clone(),
                transform: world.clone(),
            })
            .into_iter()
            .chain(self.model().into_iter().flat_map(|model| {
                model.meshes.iter().map(move |mesh| Drawable {
                    node: self.name(),
                    shape: Shape::Mesh(mesh),
                    material: model.material_for(mesh),
                    transform: world.clone(),
                })
            }));
        own.chain(
            self.get_children()
                .iter()
                .flat_map(|child| child.get_render()),
        )
        .collect()
    }
}

/// A node without anything to draw: scene roots, anchor nodes, empty groups.
#[derive(Debug, Default)]
pub struct ContainerNode {
    core: NodeCore,
}

impl ContainerNode {
    pub fn new(name: &str) -> Self {
        Self {
            core: NodeCore::new(name),
        }
    }

    pub fn with_transform(name: &str, local: Instance) -> Self {
        let mut node = Self::new(name);
        node.set_local_transform(local);
        node
    }
}

impl SceneNode for ContainerNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}

/// A built-in primitive. The material is required up front so a node can never
/// be attached with geometry but without a surface.
#[derive(Debug)]
pub struct GeometryNode {
    core: NodeCore,
    geometry: Geometry,
    material: Material,
}

impl GeometryNode {
    pub fn new(name: &str, geometry: Geometry, material: Material) -> Self {
        Self {
            core: NodeCore::new(name),
            geometry,
            material,
        }
    }
}

impl SceneNode for GeometryNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn geometry(&self) -> Option<(&Geometry, &Material)> {
        Some((&self.geometry, &self.material))
    }
}

/// Meshes loaded from a model file.
#[derive(Debug)]
pub struct ModelNode {
    core: NodeCore,
    model: model::Model,
}

impl ModelNode {
    pub fn from_model(name: &str, model: model::Model) -> Self {
        Self {
            core: NodeCore::new(name),
            model,
        }
    }
}

impl SceneNode for ModelNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn model(&self) -> Option<&model::Model> {
        Some(&self.model)
    }
}

/// Depth-first search by node name, including `node` itself.
pub fn find<'a>(node: &'a dyn SceneNode, name: &str) -> Option<&'a dyn SceneNode> {
    if node.name() == name {
        return Some(node);
    }
    node.get_children()
        .iter()
        .find_map(|child| find(child.as_ref(), name))
}

pub fn find_mut<'a>(node: &'a mut dyn SceneNode, name: &str) -> Option<&'a mut dyn SceneNode> {
    if node.name() == name {
        return Some(node);
    }
    node.get_children_mut()
        .iter_mut()
        .find_map(|child| find_mut(child.as_mut(), name))
}

/// Root container of everything a view renders.
#[derive(Debug)]
pub struct Scene {
    root: ContainerNode,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            root: ContainerNode::new("root"),
        }
    }

    pub fn root_node(&self) -> &ContainerNode {
        &self.root
    }

    pub fn root_node_mut(&mut self) -> &mut ContainerNode {
        &mut self.root
    }

    /// Nodes below the root.
    pub fn node_count(&self) -> usize {
        self.root.descendant_count()
    }

    pub fn find(&self, name: &str) -> Option<&dyn SceneNode> {
        find(&self.root, name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut dyn SceneNode> {
        find_mut(&mut self.root, name)
    }

    /// Detaches a direct child of the root by name.
    pub fn remove_top_level(&mut self, name: &str) -> Option<Box<dyn SceneNode>> {
        let children = self.root.get_children_mut();
        match children.iter().position(|child| child.name() == name) {
            Some(idx) => Some(children.remove(idx)),
            None => {
                warn!("No top-level node named {} to remove.", name);
                None
            }
        }
    }

    /// Detaches every top-level node with the given name. Returns how many
    /// were removed.
    pub fn remove_all_top_level(&mut self, name: &str) -> usize {
        let children = self.root.get_children_mut();
        let before = children.len();
        children.retain(|child| child.name() != name);
        before - children.len()
    }

    pub fn top_level_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut Box<dyn SceneNode>> + 'a {
        self.root
            .get_children_mut()
            .iter_mut()
            .filter(move |child| child.name() == name)
    }

    pub fn update_world_transforms(&mut self) {
        self.root.update_world_transforms(&Instance::default());
    }

    pub fn get_render(&self) -> Vec<Drawable<'_>> {
        self.root.get_render()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a glTF node (and its subtree) into scene nodes, keeping the
/// node's own transform as the local transform.
pub fn to_scene_node(
    node: gltf::scene::Node,
    buffers: &[Vec<u8>],
    materials: &[Material],
) -> Box<dyn SceneNode> {
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node-{}", node.index()));
    let mut scene_node: Box<dyn SceneNode> = match node.mesh() {
        Some(mesh) => {
            let mut meshes = Vec::new();
            let mut used_materials = Vec::new();
            for primitive in mesh.primitives() {
                let reader =
                    primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
                let positions: Vec<[f32; 3]> = reader
                    .read_positions()
                    .map(|iter| iter.collect())
                    .unwrap_or_default();
                let normals: Vec<[f32; 3]> = reader
                    .read_normals()
                    .map(|iter| iter.collect())
                    .unwrap_or_default();
                let indices: Vec<u32> = reader
                    .read_indices()
                    .map(|iter| iter.into_u32().collect())
                    .unwrap_or_else(|| (0..positions.len() as u32).collect());
                let material = primitive
                    .material()
                    .index()
                    .and_then(|idx| materials.get(idx))
                    .cloned()
                    .unwrap_or_default();
                used_materials.push(material);
                meshes.push(Mesh {
                    name: mesh.name().unwrap_or("unknown_mesh").to_string(),
                    positions,
                    normals,
                    indices,
                    material: used_materials.len() - 1,
                });
            }
            let model = model::Model {
                meshes,
                materials: used_materials,
            };
            Box::new(ModelNode::from_model(&name, model))
        }
        None => Box::new(ContainerNode::new(&name)),
    };
    let (translation, rotation, scale) = node.transform().decomposed();
    scene_node.set_local_transform(Instance {
        position: translation.into(),
        // glTF stores quaternions as [x, y, z, w]
        rotation: cgmath::Quaternion::new(rotation[3], rotation[0], rotation[1], rotation[2]),
        scale: scale.into(),
    });
    for child in node.children() {
        scene_node.add_child(to_scene_node(child, buffers, materials));
    }
    scene_node
}
