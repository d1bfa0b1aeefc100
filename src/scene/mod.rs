//! The scene tables a scene load produces, and the records in them.

mod camera;
mod dirty;
mod geometry;
mod light;
mod material;
mod render_item;
mod tables;
mod texture;

pub use self::{
    camera::{CameraConfig, LOOK_DISTANCE},
    dirty::DirtyCounter,
    geometry::{
        BufferRange, GeometryBuffers, GeometryRecord, MeshData, INDEX_STRIDE, NORMAL_STRIDE,
        TEXCOORD_STRIDE, VERTEX_STRIDE,
    },
    light::{LightRecord, ParallelogramLight},
    material::{Material, MaterialData, TextureRef, DEFAULT_MATERIAL_NAME},
    render_item::{InstanceRecord, RenderItem, TransformSpec},
    tables::SceneTables,
    texture::{TextureRecord, TextureType},
};
