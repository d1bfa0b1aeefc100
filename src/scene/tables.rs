use std::collections::BTreeMap;

use super::{
    CameraConfig, GeometryBuffers, GeometryRecord, InstanceRecord, LightRecord, Material,
    MaterialData, ParallelogramLight, RenderItem, TextureRecord,
};

/// Everything a scene load produces, ready to hand to a renderer.
///
/// Maps are keyed by name.  The `*_ordered()` views and `*_records()`
/// exports list entries by their dense index instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneTables {
    /// Geometry records keyed by mesh path, as written in the document.
    pub geometries: BTreeMap<String, GeometryRecord>,
    pub render_items: BTreeMap<String, RenderItem>,
    /// Materials declared in the document, keyed by name.
    pub materials: BTreeMap<String, Material>,
    /// The material used by objects that don't declare one.  Its index
    /// follows every document material's.
    pub default_material: Option<Material>,
    pub textures: BTreeMap<String, TextureRecord>,
    pub buffers: GeometryBuffers,
    pub lights: Vec<ParallelogramLight>,
    pub camera: CameraConfig,
}

impl SceneTables {
    pub fn render_item(&self, name: &str) -> Option<&RenderItem> {
        self.render_items.get(name)
    }

    pub fn render_item_mut(&mut self, name: &str) -> Option<&mut RenderItem> {
        self.render_items.get_mut(name)
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    /// Render items in `obj_idx` order.
    pub fn render_items_ordered(&self) -> Vec<&RenderItem> {
        let mut items: Vec<_> = self.render_items.values().collect();
        items.sort_by_key(|item| item.obj_idx);
        items
    }

    /// Materials in `mat_idx` order, including the default material.
    pub fn materials_ordered(&self) -> Vec<&Material> {
        let mut mats: Vec<_> = self
            .materials
            .values()
            .chain(self.default_material.iter())
            .collect();
        mats.sort_by_key(|mat| mat.mat_idx);
        mats
    }

    /// Textures in `texture_idx` order.
    pub fn textures_ordered(&self) -> Vec<&TextureRecord> {
        let mut texs: Vec<_> = self.textures.values().collect();
        texs.sort_by_key(|tex| tex.texture_idx);
        texs
    }

    /// Per-instance GPU records, indexed by `obj_idx`.
    pub fn instance_records(&self) -> Vec<InstanceRecord> {
        self.render_items_ordered()
            .iter()
            .map(|item| item.instance_record())
            .collect()
    }

    /// Material GPU records, indexed by `mat_idx`.
    pub fn material_records(&self) -> Vec<MaterialData> {
        self.materials_ordered()
            .iter()
            .map(|mat| mat.data())
            .collect()
    }

    pub fn light_records(&self) -> Vec<LightRecord> {
        self.lights.iter().map(|light| light.record()).collect()
    }

    /// Marks every render item and material as changed for the next
    /// `pending` uploads.
    pub fn mark_all_dirty(&mut self, pending: u32) {
        for item in self.render_items.values_mut() {
            item.mark_dirty(pending);
        }
        for mat in self
            .materials
            .values_mut()
            .chain(self.default_material.iter_mut())
        {
            mat.mark_dirty(pending);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.buffers.indices.len() / 3
    }
}
