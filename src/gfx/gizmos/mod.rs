//! # Gizmo System
//!
//! Interactive handles that turn mouse drags into edits of scene values.
//!
//! ## Key Components
//!
//! - [`Manipulator`] - Down/drag/up/wheel contract shared by all handles
//! - [`Mover`] - Drags a free point (a light) parallel to the image plane
//! - [`Framer`] - Translates, rotates and scales a mesh transform about its origin
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::{Matrix4, Point2, SquareMatrix};
//! use multimesh::gfx::camera::Camera;
//! use multimesh::gfx::gizmos::{Framer, Manipulator};
//!
//! let camera = Camera::default();
//! let view = camera.view_context();
//! let mut transform = Matrix4::identity();
//! let mut framer = Framer::default();
//! framer.down(&mut transform, Point2::new(300.0, 300.0), &view);
//! framer.drag(&mut transform, Point2::new(340.0, 300.0), false, &view);
//! framer.up(&mut transform);
//! ```

pub mod framer;
pub mod mover;
pub mod traits;

// Re-export main types
pub use framer::{Framer, FramerHandle};
pub use mover::Mover;
pub use traits::Manipulator;
