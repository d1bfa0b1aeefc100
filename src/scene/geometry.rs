//! Shared geometry buffers, and the records describing where each mesh
//! lives inside them.

use std::mem::size_of;

/// Byte size of one vertex position (three f32s).
pub const VERTEX_STRIDE: usize = 3 * size_of::<f32>();
/// Byte size of one vertex normal (three f32s).
pub const NORMAL_STRIDE: usize = 3 * size_of::<f32>();
/// Byte size of one texture coordinate (two f32s).
pub const TEXCOORD_STRIDE: usize = 2 * size_of::<f32>();
/// Byte size of one index.
pub const INDEX_STRIDE: usize = size_of::<u32>();

/// A region of one of the shared buffers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferRange {
    /// Offset of the first element, in bytes.
    pub offset_bytes: u64,
    /// Number of elements.
    pub count: u32,
}

impl BufferRange {
    /// Offset of the first element, in elements of the given byte size.
    #[inline]
    pub fn element_offset(&self, stride: usize) -> u32 {
        (self.offset_bytes / stride as u64) as u32
    }
}

/// Where a loaded mesh lives in the shared buffers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GeometryRecord {
    pub vertices: BufferRange,
    pub normals: Option<BufferRange>,
    pub texcoords: Option<BufferRange>,
    pub indices: BufferRange,
}

impl GeometryRecord {
    #[inline]
    pub fn vertex_offset(&self) -> u32 {
        self.vertices.element_offset(VERTEX_STRIDE)
    }

    #[inline]
    pub fn index_offset(&self) -> u32 {
        self.indices.element_offset(INDEX_STRIDE)
    }

    /// Offset of the first normal in elements, or -1 if the mesh has none.
    #[inline]
    pub fn normal_offset(&self) -> i32 {
        self.normals
            .map_or(-1, |r| r.element_offset(NORMAL_STRIDE) as i32)
    }

    /// Offset of the first texture coordinate in elements, or -1 if the
    /// mesh has none.
    #[inline]
    pub fn texcoord_offset(&self) -> i32 {
        self.texcoords
            .map_or(-1, |r| r.element_offset(TEXCOORD_STRIDE) as i32)
    }

    #[inline]
    pub fn triangle_count(&self) -> u32 {
        self.indices.count / 3
    }
}

/// Triangle mesh data as produced by a mesh loader.
///
/// Indices into `positions`, `normals` and `texcoords` are local to the
/// mesh.  `normal_indices` and `texcoord_indices` are parallel to
/// `indices`, with -1 marking a corner that has no normal or texture
/// coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub indices: Vec<u32>,
    pub normal_indices: Vec<i32>,
    pub texcoord_indices: Vec<i32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// The scene-wide buffers every mesh is appended to.
///
/// The three index streams always have the same length, so corner `i` of
/// the scene is described by `indices[i]`, `normal_indices[i]` and
/// `texcoord_indices[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffers {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub indices: Vec<u32>,
    pub normal_indices: Vec<i32>,
    pub texcoord_indices: Vec<i32>,
}

impl GeometryBuffers {
    pub fn new() -> GeometryBuffers {
        GeometryBuffers::default()
    }

    /// Appends a mesh to the end of the buffers and returns where it went.
    pub fn append(&mut self, mesh: &MeshData) -> GeometryRecord {
        let vertices = BufferRange {
            offset_bytes: byte_len(&self.vertices),
            count: mesh.vertex_count() as u32,
        };
        self.vertices.extend_from_slice(&mesh.positions);

        let normals = if mesh.normals.is_empty() {
            None
        } else {
            let range = BufferRange {
                offset_bytes: byte_len(&self.normals),
                count: (mesh.normals.len() / 3) as u32,
            };
            self.normals.extend_from_slice(&mesh.normals);
            Some(range)
        };

        let texcoords = if mesh.texcoords.is_empty() {
            None
        } else {
            let range = BufferRange {
                offset_bytes: byte_len(&self.texcoords),
                count: (mesh.texcoords.len() / 2) as u32,
            };
            self.texcoords.extend_from_slice(&mesh.texcoords);
            Some(range)
        };

        let indices = BufferRange {
            offset_bytes: byte_len(&self.indices),
            count: mesh.indices.len() as u32,
        };
        self.indices.extend_from_slice(&mesh.indices);
        extend_aligned(
            &mut self.normal_indices,
            &mesh.normal_indices,
            mesh.indices.len(),
        );
        extend_aligned(
            &mut self.texcoord_indices,
            &mesh.texcoord_indices,
            mesh.indices.len(),
        );

        GeometryRecord {
            vertices: vertices,
            normals: normals,
            texcoords: texcoords,
            indices: indices,
        }
    }

    /// Total size of all buffers, in bytes.
    pub fn byte_size(&self) -> u64 {
        byte_len(&self.vertices)
            + byte_len(&self.normals)
            + byte_len(&self.texcoords)
            + byte_len(&self.indices)
            + byte_len(&self.normal_indices)
            + byte_len(&self.texcoord_indices)
    }
}

#[inline]
fn byte_len<T>(v: &[T]) -> u64 {
    (v.len() * size_of::<T>()) as u64
}

/// Appends exactly `len` entries from `src`, padding with -1.
fn extend_aligned(dst: &mut Vec<i32>, src: &[i32], len: usize) {
    let n = src.len().min(len);
    dst.extend_from_slice(&src[..n]);
    dst.extend(std::iter::repeat(-1).take(len - n));
}
