pub mod basics;
mod error;
mod mesh_cache;
mod scene_desc;

pub use self::{
    error::{SceneError, SceneResult},
    mesh_cache::{resolve_path, MeshCache, MeshLoader, ObjLoader},
    scene_desc::{ParserConfig, SceneParser, DEFAULT_FRAMES_IN_FLIGHT},
};
