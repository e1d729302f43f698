//! Frame composition for an external renderer.
//!
//! Nothing here touches a GPU. The scene graph is flattened into a [`Frame`]:
//! a list of [`Drawable`]s with world transforms, split into opaque and
//! transparent batches, plus the overlays and lighting the host view asked for.
//!
//! # Key types
//!
//! - [`Frame<'a>`] is what a renderer consumes once per tick
//! - [`Drawable<'a>`] is one shape or mesh with its material and world transform
//! - [`Shape<'a>`] distinguishes built-in primitives from loaded meshes

use crate::{
    context::DebugOptions,
    data_structures::{
        geometry::{Color, Geometry, Material},
        instance::Instance,
        model::Mesh,
    },
};

#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    Primitive(&'a Geometry),
    Mesh(&'a Mesh),
}

/// One renderable element, already resolved to world space.
#[derive(Clone, Debug)]
pub struct Drawable<'a> {
    pub node: &'a str,
    pub shape: Shape<'a>,
    pub material: Material,
    pub transform: Instance,
}

impl Drawable<'_> {
    pub fn is_transparent(&self) -> bool {
        !self.material.diffuse.is_opaque()
    }
}

/// Light added by the view when `autoenables_default_lighting` is set and the
/// scene has none of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultLight {
    pub color: Color,
    /// Omni light attached to the camera.
    pub follows_camera: bool,
}

impl Default for DefaultLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            follows_camera: true,
        }
    }
}

/// Debug overlays, already resolved against the tracking state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlays {
    /// Axes gizmo at the session origin.
    pub world_origin: Option<Instance>,
    pub feature_points: Vec<[f32; 3]>,
}

#[derive(Debug, Default)]
pub struct Frame<'a> {
    pub opaque: Vec<Drawable<'a>>,
    pub transparent: Vec<Drawable<'a>>,
    pub overlays: Overlays,
    pub light: Option<DefaultLight>,
}

impl<'a> Frame<'a> {
    pub fn compose(
        drawables: Vec<Drawable<'a>>,
        debug: DebugOptions,
        feature_points: Vec<[f32; 3]>,
        default_lighting: bool,
    ) -> Self {
        let (transparent, opaque) = drawables.into_iter().partition(Drawable::is_transparent);
        let overlays = Overlays {
            world_origin: debug
                .contains(DebugOptions::SHOW_WORLD_ORIGIN)
                .then(Instance::default),
            feature_points: if debug.contains(DebugOptions::SHOW_FEATURE_POINTS) {
                feature_points
            } else {
                Vec::new()
            },
        };
        Self {
            opaque,
            transparent,
            overlays,
            light: default_lighting.then(DefaultLight::default),
        }
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
