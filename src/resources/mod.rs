use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, anyhow};
use futures::executor::block_on;
use thiserror::Error;

use crate::data_structures::{
    geometry::{Color, Material},
    scene_graph::{ContainerNode, SceneNode, to_scene_node},
};

/**
 * This module contains all logic for loading model files from the resource bundle.
 */
pub mod mesh;

/// Why a bundled model could not be handed out.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("resource not found: {name}.{extension}")]
    ResourceNotFound { name: String, extension: String },
    /// The file exists but could not be read or parsed.
    #[error("load error: {0}")]
    AssetLoadFailure(String),
}

/// Loads a model by resource name and extension, returning the root of its
/// node graph.
pub trait AssetLoader {
    fn load(&self, name: &str, extension: &str) -> Result<Box<dyn SceneNode>, AssetError>;
}

/// Reads models from a directory of bundled resources.
#[derive(Clone, Debug)]
pub struct BundleLoader {
    root: PathBuf,
}

impl BundleLoader {
    /// Overrides the bundle directory for [`BundleLoader::from_env`].
    pub const ENV_VAR: &'static str = "AR_SCENES_ASSETS";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The `assets/` directory copied next to the build output.
    pub fn bundled() -> Self {
        Self::new(env!("AR_SCENES_BUNDLE_DIR"))
    }

    /// Uses `AR_SCENES_ASSETS` when set, the bundled copy otherwise.
    pub fn from_env() -> Self {
        std::env::var_os(Self::ENV_VAR)
            .map(Self::new)
            .unwrap_or_else(Self::bundled)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resource_path(&self, name: &str, extension: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, extension))
    }
}

impl Default for BundleLoader {
    fn default() -> Self {
        Self::new(Path::new("./").join("assets"))
    }
}

impl AssetLoader for BundleLoader {
    fn load(&self, name: &str, extension: &str) -> Result<Box<dyn SceneNode>, AssetError> {
        let path = self.resource_path(name, extension);
        if !path.is_file() {
            return Err(AssetError::ResourceNotFound {
                name: name.to_string(),
                extension: extension.to_string(),
            });
        }
        log::debug!("Loading {}", path.display());
        let loaded = match extension.to_ascii_lowercase().as_str() {
            "obj" => block_on(load_model_obj(&path)),
            "gltf" | "glb" => block_on(load_model_gltf(&path)),
            other => Err(anyhow!("unsupported model format .{}", other)),
        };
        loaded.map_err(|e| AssetError::AssetLoadFailure(format!("{:#}", e)))
    }
}

pub async fn load_string(path: &Path) -> anyhow::Result<String> {
    let txt = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    Ok(txt)
}

pub async fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data =
        std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    Ok(data)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}

fn to_material(m: &tobj::Material) -> Material {
    let diffuse = m
        .diffuse
        .map(Color::from)
        .unwrap_or(Color::WHITE)
        .with_alpha(m.dissolve.unwrap_or(1.0));
    Material::new(&m.name, diffuse)
}

/// Reads an OBJ file (and the MTL libraries it references from the same
/// directory). The returned root has one child per object in the file.
pub async fn load_model_obj(path: &Path) -> anyhow::Result<Box<dyn SceneNode>> {
    let obj_text = load_string(path).await?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = base.join(&p);
            async move {
                match load_string(&mtl_path).await {
                    Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                    Err(_) => Err(tobj::LoadError::OpenFileFailed),
                }
            }
        },
    )
    .await?;

    // A missing material library still leaves usable geometry.
    let materials: Vec<Material> = match obj_materials {
        Ok(materials) => materials.iter().map(to_material).collect(),
        Err(e) => {
            log::warn!(
                "Materials for {} could not be loaded ({}), using defaults.",
                path.display(),
                e
            );
            Vec::new()
        }
    };

    let mut root = ContainerNode::new(&file_stem(path));
    for node in mesh::load_mesh_nodes(&models, &materials) {
        root.add_child(node);
    }
    log::debug!(
        "Loaded {} object(s) from {}",
        root.get_children().len(),
        path.display()
    );
    Ok(Box::new(root))
}

/// Reads a glTF document. Binary chunks and external buffers next to the file
/// are supported, embedded data URIs are not.
pub async fn load_model_gltf(path: &Path) -> anyhow::Result<Box<dyn SceneNode>> {
    let gltf_data = load_binary(path).await?;
    let gltf = gltf::Gltf::from_slice(&gltf_data)?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();

    // Load buffers
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| {
                        anyhow!("buffer {} refers to a missing binary chunk", buffer.index())
                    })?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                return Err(anyhow!("buffer {} uses an embedded data URI", buffer.index()));
            }
            gltf::buffer::Source::Uri(uri) => {
                let bin = load_binary(&base.join(uri)).await?;
                buffer_data.push(bin);
            }
        }
    }

    // Load materials
    let materials: Vec<Material> = gltf
        .materials()
        .map(|material| {
            let [r, g, b, a] = material.pbr_metallic_roughness().base_color_factor();
            Material::new(
                material.name().unwrap_or("gltf-material"),
                Color { r, g, b, a },
            )
        })
        .collect();

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| anyhow!("{} contains no scene", path.display()))?;
    let mut root = ContainerNode::new(&file_stem(path));
    for node in scene.nodes() {
        root.add_child(to_scene_node(node, &buffer_data, &materials));
    }
    Ok(Box::new(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let loader = BundleLoader::new("/definitely/not/a/bundle");
        match loader.load("ExternalObject", "obj") {
            Err(AssetError::ResourceNotFound { name, extension }) => {
                assert_eq!(name, "ExternalObject");
                assert_eq!(extension, "obj");
            }
            other => panic!(
                "expected ResourceNotFound, got {:?}",
                other.map(|n| n.name().to_string())
            ),
        }
    }

    #[test]
    fn default_root_is_the_working_directory_bundle() {
        assert_eq!(BundleLoader::default().root(), Path::new("./assets"));
    }

    #[test]
    fn resource_path_joins_name_and_extension() {
        let loader = BundleLoader::new("bundle");
        assert_eq!(
            loader.resource_path("ExternalObject", "obj"),
            Path::new("bundle").join("ExternalObject.obj")
        );
    }
}
