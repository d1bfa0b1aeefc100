use bytemuck::{Pod, Zeroable};

use math3d::{Matrix4x4, Vector};

use super::{DirtyCounter, GeometryRecord};

/// How an object's transform was specified in the scene document.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransformSpec {
    Explicit(Matrix4x4),
    Composed {
        translation: Vector,
        rotation_degrees: Vector,
        scale: Vector,
    },
}

impl TransformSpec {
    /// Builds the object-to-world matrix.
    pub fn resolve(&self) -> Matrix4x4 {
        match *self {
            TransformSpec::Explicit(m) => m,
            TransformSpec::Composed {
                translation,
                rotation_degrees,
                scale,
            } => Matrix4x4::from_translation_rotation_scale(translation, rotation_degrees, scale),
        }
    }
}

impl Default for TransformSpec {
    fn default() -> Self {
        TransformSpec::Composed {
            translation: Vector::splat(0.0),
            rotation_degrees: Vector::splat(0.0),
            scale: Vector::splat(1.0),
        }
    }
}

/// One instanced object of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub name: String,
    pub obj_idx: u32,

    /// `None` for objects that use the built-in default material.
    pub material_name: Option<String>,
    pub mat_idx: u32,

    pub geometry_name: Option<String>,
    pub geometry: Option<GeometryRecord>,

    transform_spec: TransformSpec,
    transform: Matrix4x4,

    pub dirty: DirtyCounter,
}

impl RenderItem {
    pub fn new(
        name: &str,
        obj_idx: u32,
        material_name: Option<&str>,
        mat_idx: u32,
        geometry: Option<(String, GeometryRecord)>,
        transform_spec: TransformSpec,
    ) -> RenderItem {
        let (geometry_name, geometry) = match geometry {
            Some((n, g)) => (Some(n), Some(g)),
            None => (None, None),
        };

        RenderItem {
            name: name.to_string(),
            obj_idx: obj_idx,
            material_name: material_name.map(|n| n.to_string()),
            mat_idx: mat_idx,
            geometry_name: geometry_name,
            geometry: geometry,
            transform_spec: transform_spec,
            transform: transform_spec.resolve(),
            dirty: DirtyCounter::default(),
        }
    }

    /// The resolved object-to-world matrix.
    #[inline]
    pub fn transform(&self) -> Matrix4x4 {
        self.transform
    }

    #[inline]
    pub fn transform_spec(&self) -> &TransformSpec {
        &self.transform_spec
    }

    /// Replaces the transform specification and re-resolves the matrix.
    pub fn set_transform_spec(&mut self, spec: TransformSpec, pending: u32) {
        self.transform_spec = spec;
        self.transform = spec.resolve();
        self.dirty.mark(pending);
    }

    /// Sets the translation of a composed transform.  Returns false, and
    /// leaves the item untouched, if the transform is an explicit matrix.
    pub fn set_translation(&mut self, t: Vector, pending: u32) -> bool {
        self.edit_composed(pending, |translation, _, _| *translation = t)
    }

    /// Sets the Euler rotation, in degrees, of a composed transform.
    pub fn set_rotation(&mut self, r: Vector, pending: u32) -> bool {
        self.edit_composed(pending, |_, rotation, _| *rotation = r)
    }

    /// Sets the scale of a composed transform.
    pub fn set_scale(&mut self, s: Vector, pending: u32) -> bool {
        self.edit_composed(pending, |_, _, scale| *scale = s)
    }

    fn edit_composed<F>(&mut self, pending: u32, f: F) -> bool
    where
        F: FnOnce(&mut Vector, &mut Vector, &mut Vector),
    {
        let mut spec = self.transform_spec;
        match spec {
            TransformSpec::Composed {
                ref mut translation,
                ref mut rotation_degrees,
                ref mut scale,
            } => f(translation, rotation_degrees, scale),
            TransformSpec::Explicit(_) => return false,
        }
        self.set_transform_spec(spec, pending);
        true
    }

    pub fn mark_dirty(&mut self, pending: u32) {
        self.dirty.mark(pending);
    }

    pub fn consume_update(&mut self) -> bool {
        self.dirty.consume()
    }

    /// The packed per-instance record uploaded to the instance buffer.
    ///
    /// Objects without geometry get zero vertex and index offsets and no
    /// normals or texture coordinates.
    pub fn instance_record(&self) -> InstanceRecord {
        let (vertex_offset, index_offset, normal_offset, texcoord_offset) = match self.geometry {
            Some(ref g) => (
                g.vertex_offset(),
                g.index_offset(),
                g.normal_offset(),
                g.texcoord_offset(),
            ),
            None => (0, 0, -1, -1),
        };

        InstanceRecord {
            object_to_world: self.transform.0.to_cols_array_2d(),
            inv_transpose: self.transform.inverse().transposed().0.to_cols_array_2d(),
            mat_idx: self.mat_idx,
            vertex_offset: vertex_offset,
            index_offset: index_offset,
            normal_offset: normal_offset,
            texcoord_offset: texcoord_offset,
            _pad: [0; 3],
        }
    }
}

/// GPU layout of a render item.  Matrices are stored column by column.
/// Offsets are in elements, not bytes, with -1 for absent normals or
/// texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    pub object_to_world: [[f32; 4]; 4],
    pub inv_transpose: [[f32; 4]; 4],
    pub mat_idx: u32,
    pub vertex_offset: u32,
    pub index_offset: u32,
    pub normal_offset: i32,
    pub texcoord_offset: i32,
    pub _pad: [u32; 3],
}
