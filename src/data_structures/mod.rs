//! Engine data structures: scene graphs, transforms, geometry and meshes.
//!
//! - `geometry` contains built-in primitive shapes, colours and materials
//! - `instance` holds per-node transformation data
//! - `model` contains mesh data read from model files
//! - `scene_graph` enables hierarchical scene organization

pub mod geometry;
pub mod instance;
pub mod model;
pub mod scene_graph;
