//! # Procedural Geometry Generation
//!
//! Functions that build common primitives directly as [`MeshGeometry`], so
//! meshes can exist without model files on disk.
//!
//! ## Usage
//!
//! ```rust
//! use multimesh::gfx::geometry::{generate_cube, generate_sphere};
//!
//! let cube = generate_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let sphere = generate_sphere(32, 16);
//! assert!(sphere.vertex_count() > 0);
//! ```
//!
//! [`MeshGeometry`]: crate::gfx::scene::mesh::MeshGeometry

pub mod primitives;

pub use primitives::*;
