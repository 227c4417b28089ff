//! # Scene Management Module
//!
//! The meshes of a MultiMesh scene and their persistence.
//!
//! ## Key Components
//!
//! - [`Mesh`] - Geometry, optional texture and object-to-world transform
//! - [`MeshCollection`] - Ordered, owning list of meshes with stable [`MeshId`]s
//! - [`MeshLoader`] - Trait seam for reading geometry by name ([`ObjLoader`], [`PrimitiveLoader`])
//! - [`SceneFile`] - Plain-text scene format: camera matrix plus named mesh transforms
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::SquareMatrix;
//! use multimesh::gfx::scene::{MeshCollection, ObjLoader, SceneFile};
//!
//! let loader = ObjLoader::new("./");
//! let mut meshes = MeshCollection::new();
//! meshes.add("Rose", None, &loader).unwrap();
//!
//! let scene = SceneFile::capture(cgmath::Matrix4::identity(), &meshes);
//! scene.save("Test.scene").unwrap();
//! ```

pub mod collection;
pub mod loader;
pub mod mesh;
pub mod store;

// Re-export main types
pub use collection::MeshCollection;
pub use loader::{LoadedMesh, MeshLoader, ObjLoader, PrimitiveLoader};
pub use mesh::{Mesh, MeshGeometry, MeshId};
pub use store::{SceneFile, SceneRecord};
