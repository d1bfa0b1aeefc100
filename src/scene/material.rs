use bytemuck::{Pod, Zeroable};

use math3d::{Vector, Vector4};

use super::DirtyCounter;

/// Name of the built-in material used by objects that don't declare one.
/// It isn't a key in the document's material table, so a document
/// material may use the same name.
pub const DEFAULT_MATERIAL_NAME: &str = "__default__";

/// A reference from a material to a texture table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    pub name: String,
    pub texture_idx: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub mat_idx: u32,
    pub shader: String,

    pub albedo: Vector4,
    pub trans_color: Vector4,
    pub emission: Vector,
    pub f0: Vector,
    pub transparent: f32,
    pub smoothness: f32,
    pub metallic: f32,
    pub refractive_index: f32,

    // Principled BSDF terms.
    pub k: Vector,
    pub kd: Vector,
    pub ks: Vector,
    /// Oren-Nayar roughness, in degrees.
    pub sigma: f32,
    pub specular_tint: f32,
    pub anisotropic: f32,
    pub sheen: f32,
    pub sheen_tint: f32,
    pub clearcoat: f32,
    pub clearcoat_gloss: f32,
    pub specular_trans: f32,
    pub diffuse_trans: f32,

    pub diffuse_map: Option<TextureRef>,
    pub normal_map: Option<TextureRef>,

    pub dirty: DirtyCounter,
}

impl Material {
    /// Creates a material with every property at its default value.
    pub fn new(name: &str, mat_idx: u32) -> Material {
        Material {
            name: name.to_string(),
            mat_idx: mat_idx,
            shader: String::new(),
            albedo: Vector4::splat(1.0),
            trans_color: Vector4::splat(1.0),
            emission: Vector::splat(0.0),
            f0: Vector::splat(0.5),
            transparent: 0.0,
            smoothness: 0.5,
            metallic: 0.0,
            refractive_index: 1.5,
            k: Vector::splat(0.0),
            kd: Vector::splat(0.0),
            ks: Vector::splat(0.0),
            sigma: 45.0,
            specular_tint: 0.0,
            anisotropic: 0.0,
            sheen: 0.0,
            sheen_tint: 0.5,
            clearcoat: 0.0,
            clearcoat_gloss: 1.0,
            specular_trans: 0.0,
            diffuse_trans: 1.0,
            diffuse_map: None,
            normal_map: None,
            dirty: DirtyCounter::default(),
        }
    }

    /// Flags the material as changed for the next `pending` uploads.
    pub fn mark_dirty(&mut self, pending: u32) {
        self.dirty.mark(pending);
    }

    /// Consumes one pending upload.  Returns whether the record should be
    /// uploaded this frame.
    pub fn consume_update(&mut self) -> bool {
        self.dirty.consume()
    }

    /// The packed record uploaded to the material buffer.
    pub fn data(&self) -> MaterialData {
        MaterialData {
            albedo: self.albedo.to_array(),
            trans_color: self.trans_color.to_array(),
            emission: self.emission.to_array(),
            transparent: self.transparent,
            f0: self.f0.to_array(),
            smoothness: self.smoothness,
            k: self.k.to_array(),
            metallic: self.metallic,
            kd: self.kd.to_array(),
            refractive_index: self.refractive_index,
            ks: self.ks.to_array(),
            sigma: self.sigma,
            specular_tint: self.specular_tint,
            anisotropic: self.anisotropic,
            sheen: self.sheen,
            sheen_tint: self.sheen_tint,
            clearcoat: self.clearcoat,
            clearcoat_gloss: self.clearcoat_gloss,
            specular_trans: self.specular_trans,
            diffuse_trans: self.diffuse_trans,
            diffuse_map_idx: texture_slot(&self.diffuse_map),
            normal_map_idx: texture_slot(&self.normal_map),
            _pad: [0; 2],
        }
    }
}

fn texture_slot(map: &Option<TextureRef>) -> i32 {
    map.as_ref().map_or(-1, |t| t.texture_idx as i32)
}

/// GPU layout of a material.  Every three-component term shares a
/// 16-byte row with a scalar.  Absent texture maps are stored as -1.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MaterialData {
    pub albedo: [f32; 4],
    pub trans_color: [f32; 4],
    pub emission: [f32; 3],
    pub transparent: f32,
    pub f0: [f32; 3],
    pub smoothness: f32,
    pub k: [f32; 3],
    pub metallic: f32,
    pub kd: [f32; 3],
    pub refractive_index: f32,
    pub ks: [f32; 3],
    pub sigma: f32,
    pub specular_tint: f32,
    pub anisotropic: f32,
    pub sheen: f32,
    pub sheen_tint: f32,
    pub clearcoat: f32,
    pub clearcoat_gloss: f32,
    pub specular_trans: f32,
    pub diffuse_trans: f32,
    pub diffuse_map_idx: i32,
    pub normal_map_idx: i32,
    pub _pad: [u32; 2],
}
