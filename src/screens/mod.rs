//! The two demo screens.
//!
//! - `static_scene` places fixed shapes and never looks at tracking data
//! - `plane_anchored` decorates every detected plane via [`plane_anchored::PlaneVisualizer`]

pub mod plane_anchored;
pub mod static_scene;

pub use plane_anchored::{PlaneAnchoredSceneScreen, PlaneVisualizer, ResourceId};
pub use static_scene::StaticSceneScreen;
