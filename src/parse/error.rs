use std::{error, fmt, io, path::PathBuf};

use data_tree::ParseError;

pub type SceneResult<T> = Result<T, SceneError>;

/// Everything that can go wrong while loading a scene.
///
/// Variants that point into the scene document carry the byte offset of
/// the element at fault.
#[derive(Debug)]
pub enum SceneError {
    /// The document isn't well-formed markup.
    Document(ParseError),

    /// The document has no `scene` root element.
    MissingRoot,

    /// (byte_offset, element tag, attribute name)
    MissingAttribute(usize, String, &'static str),

    /// (byte_offset, element tag, offending text)
    MalformedNumber(usize, String, String),

    /// (byte_offset, object name)
    DuplicateObject(usize, String),

    Io(PathBuf, io::Error),

    /// (mesh file, loader message)
    Mesh(PathBuf, String),
}

impl SceneError {
    /// Byte offset into the document of the element at fault, if any.
    pub fn byte_offset(&self) -> Option<usize> {
        match *self {
            SceneError::Document(ref e) => Some(e.byte_offset()),
            SceneError::MissingAttribute(offset, ..)
            | SceneError::MalformedNumber(offset, ..)
            | SceneError::DuplicateObject(offset, ..) => Some(offset),
            SceneError::MissingRoot | SceneError::Io(..) | SceneError::Mesh(..) => None,
        }
    }
}

impl error::Error for SceneError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            SceneError::Document(ref e) => Some(e),
            SceneError::Io(_, ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SceneError::Document(ref e) => write!(f, "Malformed scene document: {}", e),
            SceneError::MissingRoot => write!(f, "Document has no 'scene' root element."),
            SceneError::MissingAttribute(offset, ref tag, attribute) => write!(
                f,
                "Byte {}: '{}' element is missing its '{}' attribute.",
                offset, tag, attribute
            ),
            SceneError::MalformedNumber(offset, ref tag, ref text) => write!(
                f,
                "Byte {}: '{}' has malformed numeric contents \"{}\".",
                offset, tag, text
            ),
            SceneError::DuplicateObject(offset, ref name) => write!(
                f,
                "Byte {}: an object named '{}' already exists.",
                offset, name
            ),
            SceneError::Io(ref path, ref e) => {
                write!(f, "Could not read '{}': {}", path.display(), e)
            }
            SceneError::Mesh(ref path, ref message) => {
                write!(f, "Could not load mesh '{}': {}", path.display(), message)
            }
        }
    }
}

impl From<ParseError> for SceneError {
    fn from(e: ParseError) -> Self {
        SceneError::Document(e)
    }
}
