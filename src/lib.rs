//! ar-scenes
//!
//! Scene composition for AR demo screens. Tracking, plane detection and
//! rendering are left to the host platform; this crate models the seams to
//! them and implements what sits in between: a headless scene graph, a view
//! context that turns tracked anchors into scene nodes, a bundle loader for
//! model files, and two screens built on top.
//!
//! High-level modules
//! - `context`: the AR view that owns session, scene, view options and anchor handler
//! - `data_structures`: scene graph, transforms, geometry, materials and meshes
//! - `diagnostics`: injected sinks for developer-facing failure reports
//! - `flow`: screen lifecycle and the host event loop driver
//! - `render`: flattening a scene into a frame for an external renderer
//! - `resources`: loading OBJ and glTF models from a resource bundle
//! - `screens`: the static scene and the plane anchored scene
//! - `tracking`: tracking session, configuration, anchors and the engine seam
//!

pub mod context;
pub mod data_structures;
pub mod diagnostics;
pub mod flow;
pub mod render;
pub mod resources;
pub mod screens;
pub mod tracking;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
