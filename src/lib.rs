// src/lib.rs
//! MultiMesh
//!
//! An interactive viewer for a collection of OBJ meshes: load and save scenes,
//! pick lights, mesh gizmos or the camera with the mouse and drag them around.
//! Built on wgpu, winit and Dear ImGui.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod gfx;
pub mod ui;

// Re-export main types for convenience
pub use app::MultiMeshApp;
pub use config::AppConfig;
pub use editor::{Command, Editor};
