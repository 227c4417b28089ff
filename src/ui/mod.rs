//! # User Interface Module
//!
//! Dear ImGui integration for the viewer.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui context, winit platform and wgpu renderer
//! - [`panel`] - Command panel replacing console prompts for load/save/list/delete/add
//! - [`overlay`] - Screen-space disks and rings for lights and mesh gizmos
//!
//! ## Input Handling
//!
//! Events reach ImGui first. When the cursor is over the panel, or a text
//! field has keyboard focus, the event is not passed on to picking or the key
//! bindings.

pub mod manager;
pub mod overlay;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{command_panel, PanelState};
