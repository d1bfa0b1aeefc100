use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use data_tree::DataTree;
use math3d::{Matrix4x4, Vector};

use crate::scene::{
    CameraConfig, GeometryBuffers, Material, ParallelogramLight, RenderItem, SceneTables,
    TextureRecord, TextureRef, TextureType, TransformSpec, DEFAULT_MATERIAL_NAME,
};

use super::{
    basics::{parse_matrix, parse_scalar, parse_vector, parse_vector4},
    mesh_cache::{resolve_path, MeshCache, MeshLoader, ObjLoader},
    SceneError, SceneResult,
};

/// Number of frames the renderer keeps in flight by default.
pub const DEFAULT_FRAMES_IN_FLIGHT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Directory relative mesh and texture paths are resolved against.
    /// When `None`, `parse_file()` uses the document's own directory and
    /// `parse_str()` leaves paths as they are.
    pub base_dir: Option<PathBuf>,

    /// Pending-update count every new render item and material starts
    /// with, so each in-flight frame uploads it once.
    pub frames_in_flight: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            base_dir: None,
            frames_in_flight: DEFAULT_FRAMES_IN_FLIGHT,
        }
    }
}

/// Builds `SceneTables` from a scene document.
///
/// A parser is good for one load: `parse_str()` and `parse_file()` consume
/// it and hand back the finished tables.
pub struct SceneParser<L: MeshLoader = ObjLoader> {
    config: ParserConfig,
    loader: L,

    mesh_cache: MeshCache,
    buffers: GeometryBuffers,
    render_items: BTreeMap<String, RenderItem>,
    materials: BTreeMap<String, Material>,
    textures: BTreeMap<String, TextureRecord>,
    lights: Vec<ParallelogramLight>,
    camera: CameraConfig,
}

impl SceneParser<ObjLoader> {
    pub fn new(config: ParserConfig) -> SceneParser<ObjLoader> {
        SceneParser::with_loader(config, ObjLoader)
    }
}

impl<L: MeshLoader> SceneParser<L> {
    pub fn with_loader(config: ParserConfig, loader: L) -> SceneParser<L> {
        SceneParser {
            config: config,
            loader: loader,
            mesh_cache: MeshCache::new(),
            buffers: GeometryBuffers::new(),
            render_items: BTreeMap::new(),
            materials: BTreeMap::new(),
            textures: BTreeMap::new(),
            lights: Vec::new(),
            camera: CameraConfig::default(),
        }
    }

    /// Reads and parses the scene document at `path`.
    pub fn parse_file<P: AsRef<Path>>(mut self, path: P) -> SceneResult<SceneTables> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SceneError::Io(path.to_path_buf(), e))?;

        if self.config.base_dir.is_none() {
            self.config.base_dir = path.parent().map(|p| p.to_path_buf());
        }

        self.parse_str(&text)
    }

    /// Parses a scene document held in memory.
    pub fn parse_str(mut self, document: &str) -> SceneResult<SceneTables> {
        let tree = DataTree::from_str(document)?;
        let scene = tree
            .first_child_with_tag("scene")
            .ok_or(SceneError::MissingRoot)?;

        for node in scene.iter_elements() {
            match node.tag() {
                "object" => self.parse_object(node)?,
                "light" => self.parse_light(node)?,
                "camera" => self.parse_camera(node)?,
                tag => debug!(
                    "Skipping unknown element '{}' at byte {}.",
                    tag,
                    node.byte_offset()
                ),
            }
        }

        Ok(self.finish())
    }

    fn finish(mut self) -> SceneTables {
        // The default material comes after every document material, and
        // only exists if some object needs it.
        let mut default_material = None;
        if self.render_items.values().any(|item| item.material_name.is_none()) {
            let mut mat = Material::new(DEFAULT_MATERIAL_NAME, self.materials.len() as u32);
            mat.mark_dirty(self.config.frames_in_flight);
            for item in self.render_items.values_mut() {
                if item.material_name.is_none() {
                    item.mat_idx = mat.mat_idx;
                }
            }
            default_material = Some(mat);
        }

        info!(
            "Scene loaded: {} objects, {} materials, {} textures, {} meshes, {} lights.",
            self.render_items.len(),
            self.materials.len(),
            self.textures.len(),
            self.mesh_cache.len(),
            self.lights.len()
        );

        SceneTables {
            geometries: self.mesh_cache.into_records(),
            render_items: self.render_items,
            materials: self.materials,
            default_material: default_material,
            textures: self.textures,
            buffers: self.buffers,
            lights: self.lights,
            camera: self.camera,
        }
    }

    fn parse_object(&mut self, node: &DataTree) -> SceneResult<()> {
        let name = required_attribute(node, "name")?;
        if self.render_items.contains_key(&name) {
            return Err(SceneError::DuplicateObject(node.byte_offset(), name));
        }

        // Objects without a material get their index in `finish()`, once
        // every document material has one.
        let (material_name, mat_idx) = match node.first_child_with_tag("Material") {
            Some(mat_node) => {
                let (n, idx) = self.resolve_material(mat_node)?;
                (Some(n), idx)
            }
            None => (None, 0),
        };

        let mut geometry = None;
        let mut transform = TransformSpec::default();
        if let Some(mesh_node) = node.first_child_with_tag("Mesh") {
            if let Some(geo_node) = mesh_node.first_child_with_tag("geometry") {
                let key = geo_node.text().into_owned();
                let path = resolve_path(self.config.base_dir.as_deref(), &key);
                let rec = self.mesh_cache.resolve(
                    &key,
                    &path,
                    &mut self.loader,
                    &mut self.buffers,
                )?;
                geometry = Some((key, rec));
            }
            if let Some(xform_node) = mesh_node.first_child_with_tag("transform") {
                transform = parse_transform(xform_node)?;
            }
        }

        if geometry.is_none() {
            warn!("Object '{}' has no geometry.", name);
        }

        let obj_idx = self.render_items.len() as u32;
        let mut item = RenderItem::new(
            &name,
            obj_idx,
            material_name.as_deref(),
            mat_idx,
            geometry,
            transform,
        );
        item.mark_dirty(self.config.frames_in_flight);
        self.render_items.insert(name, item);

        Ok(())
    }

    /// Returns the name and index of the material described by `node`,
    /// registering it first if the name is new.  A repeated name keeps the
    /// first definition.
    fn resolve_material(&mut self, node: &DataTree) -> SceneResult<(String, u32)> {
        let name = required_attribute(node, "name")?;
        if let Some(mat) = self.materials.get(&name) {
            debug!("Material '{}' already defined, reusing it.", name);
            return Ok((name, mat.mat_idx));
        }

        let mut mat = Material::new(&name, self.materials.len() as u32);
        if let Some(n) = field(node, "transparent", parse_scalar)? {
            mat.transparent = n;
        }
        if let Some(n) = field(node, "smoothness", parse_scalar)? {
            mat.smoothness = n;
        }
        if let Some(n) = field(node, "metallic", parse_scalar)? {
            mat.metallic = n;
        }
        if let Some(n) = field(node, "refractiveIndex", parse_scalar)? {
            mat.refractive_index = n;
        }
        if let Some(v) = field(node, "albedo", parse_vector4)? {
            mat.albedo = v;
        }
        if let Some(v) = field(node, "transColor", parse_vector4)? {
            mat.trans_color = v;
        }
        if let Some(v) = field(node, "F0", parse_vector)? {
            mat.f0 = v;
        }
        if let Some(v) = field(node, "emission", parse_vector)? {
            mat.emission = v;
        }
        if let Some(v) = field(node, "k", parse_vector)? {
            mat.k = v;
        }
        if let Some(v) = field(node, "kd", parse_vector)? {
            mat.kd = v;
        }
        if let Some(v) = field(node, "ks", parse_vector)? {
            mat.ks = v;
        }
        let scalars: [(&str, &mut f32); 9] = [
            ("Sigma", &mut mat.sigma),
            ("specularTint", &mut mat.specular_tint),
            ("anisotropic", &mut mat.anisotropic),
            ("sheen", &mut mat.sheen),
            ("sheenTint", &mut mat.sheen_tint),
            ("clearcoat", &mut mat.clearcoat),
            ("clearcoatGloss", &mut mat.clearcoat_gloss),
            ("specularTrans", &mut mat.specular_trans),
            ("diffuseTrans", &mut mat.diffuse_trans),
        ];
        for (tag, value) in scalars {
            if let Some(n) = field(node, tag, parse_scalar)? {
                *value = n;
            }
        }
        if let Some(shader_node) = node.first_child_with_tag("Shader") {
            mat.shader = shader_node.text().into_owned();
        }
        if let Some(map_node) = node.first_child_with_tag("diffuseMap") {
            mat.diffuse_map = Some(self.resolve_texture(map_node, TextureType::Diffuse)?);
        }
        if let Some(map_node) = node.first_child_with_tag("normalMap") {
            mat.normal_map = Some(self.resolve_texture(map_node, TextureType::Normal)?);
        }

        mat.mark_dirty(self.config.frames_in_flight);
        let mat_idx = mat.mat_idx;
        self.materials.insert(name.clone(), mat);

        Ok((name, mat_idx))
    }

    fn resolve_texture(
        &mut self,
        node: &DataTree,
        texture_type: TextureType,
    ) -> SceneResult<TextureRef> {
        let name = required_attribute(node, "name")?;
        if let Some(tex) = self.textures.get(&name) {
            debug!("Texture '{}' already defined, reusing it.", name);
            return Ok(TextureRef {
                name: name,
                texture_idx: tex.texture_idx,
            });
        }

        let path = node.text().into_owned();
        let texture_idx = self.textures.len() as u32;
        let record = TextureRecord {
            name: name.clone(),
            texture_idx: texture_idx,
            texture_type: texture_type,
            resolved_path: resolve_path(self.config.base_dir.as_deref(), &path),
            path: path,
        };
        self.textures.insert(name.clone(), record);

        Ok(TextureRef {
            name: name,
            texture_idx: texture_idx,
        })
    }

    fn parse_light(&mut self, node: &DataTree) -> SceneResult<()> {
        let corner = field(node, "corner", parse_vector)?.unwrap_or(Vector::ZERO);
        let v1 = field(node, "v1", parse_vector)?.unwrap_or(Vector::ZERO);
        let v2 = field(node, "v2", parse_vector)?.unwrap_or(Vector::ZERO);
        let emission = field(node, "emission", parse_vector)?.unwrap_or(Vector::ZERO);

        self.lights
            .push(ParallelogramLight::new(corner, v1, v2, emission));

        Ok(())
    }

    /// Later `camera` elements override fields set by earlier ones.
    fn parse_camera(&mut self, node: &DataTree) -> SceneResult<()> {
        if let Some(position) = field(node, "position", parse_vector)? {
            self.camera.position = position;
        }
        if let Some(direction) = field(node, "direction", parse_vector)? {
            self.camera.direction = direction;
        }

        Ok(())
    }
}

/// An explicit `transformMatrix` wins over translation, rotation and scale.
fn parse_transform(node: &DataTree) -> SceneResult<TransformSpec> {
    if let Some(m) = field::<Matrix4x4>(node, "transformMatrix", parse_matrix)? {
        return Ok(TransformSpec::Explicit(m));
    }

    Ok(TransformSpec::Composed {
        translation: field(node, "translation", parse_vector)?.unwrap_or(Vector::ZERO),
        rotation_degrees: field(node, "rotation", parse_vector)?.unwrap_or(Vector::ZERO),
        scale: field(node, "scale", parse_vector)?.unwrap_or_else(|| Vector::splat(1.0)),
    })
}

fn required_attribute(node: &DataTree, attribute: &'static str) -> SceneResult<String> {
    node.attribute(attribute)
        .map(|a| a.into_owned())
        .ok_or_else(|| {
            SceneError::MissingAttribute(node.byte_offset(), node.tag().to_string(), attribute)
        })
}

/// Parses the text of the first child tagged `tag`, if there is one.
fn field<T>(
    node: &DataTree,
    tag: &str,
    parse: fn(&str) -> Result<T, ()>,
) -> SceneResult<Option<T>> {
    match node.first_child_with_tag(tag) {
        Some(child) => {
            let text = child.text();
            parse(&text).map(Some).map_err(|_| {
                SceneError::MalformedNumber(child.byte_offset(), tag.to_string(), text.into_owned())
            })
        }
        None => Ok(None),
    }
}
