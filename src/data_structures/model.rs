//! Mesh data read from model files.
//!
//! Only CPU-side data is kept; uploading to the GPU is the renderer's job.

use crate::data_structures::geometry::Material;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// Index into the owning model's materials.
    pub material: usize,
}

impl Mesh {
    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(mut min, mut max), p| {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
            (min, max)
        }))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}

impl Model {
    /// Material for `mesh`, falling back to the default when the index is dangling.
    pub fn material_for(&self, mesh: &Mesh) -> Material {
        self.materials
            .get(mesh.material)
            .cloned()
            .unwrap_or_default()
    }
}
