//! Error types for scene persistence, mesh loading and editor commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be opened, read or written.
    #[error("can't access scene file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A matrix line is short or contains a non-numeric token.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// The file ends after a mesh name without its matrix line.
    #[error("line {line}: mesh '{name}' has no matrix")]
    MissingMatrix { line: usize, name: String },

    /// The file is empty, so there is no camera record.
    #[error("scene file has no camera matrix")]
    Empty,
}

/// Errors raised by a [`MeshLoader`](crate::gfx::scene::loader::MeshLoader).
#[derive(Error, Debug)]
pub enum MeshError {
    /// The OBJ parser rejected the geometry file.
    #[error("can't read {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// The geometry file has no vertices or no triangles.
    #[error("{0} contains no geometry")]
    NoGeometry(PathBuf),

    /// A triangle references a point that does not exist.
    #[error("triangle {triangle} references point {index}, but only {count} points exist")]
    InvalidIndex {
        triangle: usize,
        index: u32,
        count: usize,
    },

    /// Generic I/O failure from a loader.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`MeshCollection`](crate::gfx::scene::collection::MeshCollection).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("mesh index {index} out of range (collection holds {len} meshes)")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors surfaced by [`Editor`](crate::editor::Editor) commands.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// Text typed into the delete field is not a non-negative integer.
    #[error("'{0}' is not a mesh number")]
    InvalidIndexInput(String),

    /// The add field was confirmed with an empty name.
    #[error("mesh name is empty")]
    EmptyName,
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
