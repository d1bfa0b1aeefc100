use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::debug;

use crate::scene::{GeometryBuffers, GeometryRecord, MeshData};

use super::{SceneError, SceneResult};

/// Something that can turn a mesh file into triangle data.
pub trait MeshLoader {
    fn load(&mut self, path: &Path) -> SceneResult<MeshData>;
}

impl<'a, T: MeshLoader + ?Sized> MeshLoader for &'a mut T {
    fn load(&mut self, path: &Path) -> SceneResult<MeshData> {
        (**self).load(path)
    }
}

/// Loads Wavefront OBJ files.
///
/// Faces are triangulated, and positions, normals and texture coordinates
/// keep their own index streams rather than being merged into one
/// interleaved vertex.  All shapes in a file become a single mesh.
#[derive(Debug, Copy, Clone, Default)]
pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn load(&mut self, path: &Path) -> SceneResult<MeshData> {
        let options = tobj::LoadOptions {
            single_index: false,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };

        let (models, materials) = tobj::load_obj(path, &options)
            .map_err(|e| SceneError::Mesh(path.to_path_buf(), e.to_string()))?;

        // The material library isn't used, but one that is referenced and
        // can't be loaded still means a broken mesh.
        if let Err(e) = materials {
            return Err(SceneError::Mesh(
                path.to_path_buf(),
                format!("material library: {}", e),
            ));
        }

        Ok(merge_models(&models))
    }
}

/// Concatenates the shapes of an OBJ file, rebasing each shape's indices
/// past the data of the shapes before it.
fn merge_models(models: &[tobj::Model]) -> MeshData {
    let mut mesh = MeshData::default();

    for model in models {
        let m = &model.mesh;
        let vertex_base = (mesh.positions.len() / 3) as u32;
        let normal_base = (mesh.normals.len() / 3) as i32;
        let texcoord_base = (mesh.texcoords.len() / 2) as i32;

        mesh.positions.extend_from_slice(&m.positions);
        mesh.normals.extend_from_slice(&m.normals);
        mesh.texcoords.extend_from_slice(&m.texcoords);
        mesh.indices
            .extend(m.indices.iter().map(|&i| i + vertex_base));
        push_attribute_indices(
            &mut mesh.normal_indices,
            &m.normal_indices,
            m.indices.len(),
            normal_base,
        );
        push_attribute_indices(
            &mut mesh.texcoord_indices,
            &m.texcoord_indices,
            m.indices.len(),
            texcoord_base,
        );
    }

    mesh
}

fn push_attribute_indices(dst: &mut Vec<i32>, src: &[u32], corners: usize, base: i32) {
    if src.len() == corners {
        dst.extend(src.iter().map(|&i| i as i32 + base));
    } else {
        dst.extend(std::iter::repeat(-1).take(corners));
    }
}

/// Loads each mesh file once, and remembers where it went in the shared
/// buffers.
///
/// Meshes are keyed by their path as written in the scene document.
#[derive(Debug, Clone, Default)]
pub struct MeshCache {
    records: BTreeMap<String, GeometryRecord>,
}

impl MeshCache {
    pub fn new() -> MeshCache {
        MeshCache::default()
    }

    /// Returns the geometry record for `key`, loading the mesh from `path`
    /// and appending it to `buffers` only if `key` hasn't been seen before.
    pub fn resolve<L: MeshLoader + ?Sized>(
        &mut self,
        key: &str,
        path: &Path,
        loader: &mut L,
        buffers: &mut GeometryBuffers,
    ) -> SceneResult<GeometryRecord> {
        if let Some(rec) = self.records.get(key) {
            debug!("Reusing cached mesh '{}'.", key);
            return Ok(*rec);
        }

        let mesh = loader.load(path)?;
        let rec = buffers.append(&mesh);
        debug!(
            "Loaded mesh '{}': {} vertices, {} triangles.",
            key,
            mesh.vertex_count(),
            mesh.indices.len() / 3
        );
        self.records.insert(key.to_string(), rec);

        Ok(rec)
    }

    pub fn get(&self, key: &str) -> Option<&GeometryRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> BTreeMap<String, GeometryRecord> {
        self.records
    }
}

/// Resolves a path from the scene document against a base directory.
/// Absolute paths are left alone.
pub fn resolve_path(base_dir: Option<&Path>, path: &str) -> PathBuf {
    let p = Path::new(path);
    match base_dir {
        Some(dir) if p.is_relative() => dir.join(p),
        _ => p.to_path_buf(),
    }
}
