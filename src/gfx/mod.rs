//! # Graphics Module
//!
//! Everything that lives in the 3D scene and the window that shows it.
//!
//! ## Architecture Overview
//!
//! - **Scene** ([`scene`]) - Meshes, the mesh collection, loaders and scene files
//! - **Camera** ([`camera`]) - Modelview camera and its drag/wheel controller
//! - **Picking** ([`picking`]) - Projection helpers and the pick controller
//! - **Gizmos** ([`gizmos`]) - Framer and Mover manipulators
//! - **Geometry** ([`geometry`]) - Procedural primitives
//! - **Rendering** ([`render_engine`]) - wgpu surface that hosts the UI overlay

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod light;
pub mod picking;
pub mod render_engine;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use light::Light;
pub use render_engine::RenderEngine;
