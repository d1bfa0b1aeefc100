//! Scene description loading and sampler table setup for a GPU path
//! tracer.
//!
//! `parse::SceneParser` turns a scene document into `scene::SceneTables`:
//! index-based material, texture, geometry, light and camera tables plus
//! the shared geometry buffers.  `PermutationTable` holds the per-prime
//! digit permutations used to scramble Halton sampling.

pub mod parse;
pub mod scene;
pub mod timer;

pub use halton::PermutationTable;
pub use math3d::{Matrix4x4, Vector, Vector4};

pub use crate::{
    parse::{ParserConfig, SceneError, SceneParser, SceneResult},
    scene::SceneTables,
};
