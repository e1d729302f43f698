use std::f32::consts::FRAC_PI_2;

use cgmath::Zero;

use crate::{
    context::{AnchorHandler, Context, DebugOptions},
    data_structures::{
        geometry::{Color, Geometry, Material},
        scene_graph::{GeometryNode, SceneNode},
    },
    diagnostics::{Diagnostic, DiagnosticSink, LogSink},
    flow::ArFlow,
    resources::{AssetLoader, BundleLoader},
    tracking::{Anchor, PlaneAnchor, PlaneDetection, TrackingConfiguration},
};

pub const MODEL_SCALE: f32 = 0.1;

/// A bundled resource, addressed by name and extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceId {
    pub name: String,
    pub extension: String,
}

impl ResourceId {
    pub fn new(name: &str, extension: &str) -> Self {
        Self {
            name: name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// The model placed on every detected plane.
    pub fn external_object() -> Self {
        Self::new("ExternalObject", "obj")
    }
}

/// Decorates every new plane anchor with a translucent surface matching the
/// plane's extent and a scaled-down copy of a bundled model.
///
/// Only creation is handled. Extent refinements and anchor removal are not
/// forwarded here, and no per-anchor state is kept, so delivering the same
/// anchor twice decorates it twice.
pub struct PlaneVisualizer {
    loader: Box<dyn AssetLoader>,
    sink: Box<dyn DiagnosticSink>,
    model: ResourceId,
}

impl PlaneVisualizer {
    pub fn new(loader: Box<dyn AssetLoader>, sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            loader,
            sink,
            model: ResourceId::external_object(),
        }
    }

    pub fn surface_for(plane: &PlaneAnchor) -> GeometryNode {
        let mut surface = GeometryNode::new(
            "plane-surface",
            Geometry::plane(plane.extent.width, plane.extent.height),
            Material::from_color(Color::BLUE.with_alpha(0.3)),
        );
        let local = surface.local_transform_mut();
        local.position = cgmath::Vector3::new(plane.center.x, 0.0, plane.center.z);
        // horizontal orientation
        local.set_euler_angles(-FRAC_PI_2, 0.0, 0.0);
        surface
    }

    fn attach_model(&self, node: &mut dyn SceneNode) {
        let mut asset = match self.loader.load(&self.model.name, &self.model.extension) {
            Ok(asset) => asset,
            Err(err) => {
                self.sink.report(Diagnostic::from(&err));
                return;
            }
        };
        let Some(mut model) = asset.take_first_child() else {
            log::debug!(
                "{}.{} has no nodes to place",
                self.model.name,
                self.model.extension
            );
            return;
        };
        let local = model.local_transform_mut();
        local.position = cgmath::Vector3::zero();
        local.set_uniform_scale(MODEL_SCALE);
        node.add_child(model);
    }
}

impl AnchorHandler for PlaneVisualizer {
    fn on_anchor_added(&mut self, node: &mut dyn SceneNode, anchor: &Anchor) {
        let Some(plane) = anchor.as_plane() else {
            return;
        };
        log::debug!(
            "Visualizing plane {} ({} x {})",
            plane.id,
            plane.extent.width,
            plane.extent.height
        );
        node.add_child(Box::new(Self::surface_for(plane)));
        self.attach_model(node);
    }
}

/// Detects horizontal and vertical planes and anchors a model on each one.
pub struct PlaneAnchoredSceneScreen {
    visualizer: Option<PlaneVisualizer>,
}

impl PlaneAnchoredSceneScreen {
    /// Loads from the directory named by `AR_SCENES_ASSETS` (or the bundle
    /// copied at build time) and reports failures through `log`.
    pub fn new() -> Self {
        Self::with_visualizer(PlaneVisualizer::new(
            Box::new(BundleLoader::from_env()),
            Box::new(LogSink),
        ))
    }

    pub fn with_visualizer(visualizer: PlaneVisualizer) -> Self {
        Self {
            visualizer: Some(visualizer),
        }
    }

    pub fn configuration() -> TrackingConfiguration {
        TrackingConfiguration::world_tracking()
            .with_plane_detection(PlaneDetection::HORIZONTAL | PlaneDetection::VERTICAL)
    }
}

impl Default for PlaneAnchoredSceneScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ArFlow for PlaneAnchoredSceneScreen {
    fn on_init(&mut self, ctx: &mut Context) {
        ctx.session.run(Self::configuration());
        ctx.debug_options = DebugOptions::SHOW_WORLD_ORIGIN | DebugOptions::SHOW_FEATURE_POINTS;
        ctx.autoenables_default_lighting = true;
        match self.visualizer.take() {
            Some(visualizer) => ctx.set_anchor_handler(Box::new(visualizer)),
            None => log::warn!("Plane visualizer was already registered"),
        }
    }

    fn name(&self) -> &str {
        "plane anchored scene"
    }
}
