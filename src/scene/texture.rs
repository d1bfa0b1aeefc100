use std::{fmt, path::PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureType {
    Diffuse,
    Normal,
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TextureType::Diffuse => write!(f, "diffuse"),
            TextureType::Normal => write!(f, "normal"),
        }
    }
}

/// A texture file referenced by one or more materials.
///
/// `path` is the file path as written in the scene document, and
/// `resolved_path` is where it is actually loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    pub name: String,
    pub texture_idx: u32,
    pub texture_type: TextureType,
    pub path: String,
    pub resolved_path: PathBuf,
}
