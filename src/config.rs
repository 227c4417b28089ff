//! Application configuration
//!
//! All tunables of the viewer live in [`AppConfig`]. The defaults reproduce the
//! classic MultiMesh setup: a `Test.scene` file next to the executable, four
//! default meshes, a 600x600 window and a camera five units back from the origin.

use cgmath::{Matrix4, Point3, Vector3};
use std::path::PathBuf;

/// Step sizes applied per wheel notch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSteps {
    /// Step without shift held
    pub normal: f32,
    /// Step with shift held
    pub shifted: f32,
}

impl WheelSteps {
    pub fn new(normal: f32, shifted: f32) -> Self {
        Self { normal, shifted }
    }

    pub fn select(&self, shift: bool) -> f32 {
        if shift {
            self.shifted
        } else {
            self.normal
        }
    }
}

/// Initial state and display settings for one light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub position: Point3<f32>,
    pub color: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Scene file read with `R` and written with `S`
    pub scene_file: PathBuf,
    /// Directory that mesh names are resolved against
    pub mesh_directory: PathBuf,
    /// Meshes loaded when the scene file can't be read at startup
    pub default_meshes: Vec<String>,
    pub window_size: (u32, u32),
    pub window_title: String,
    /// Screen distance in pixels within which a handle counts as hit
    pub pick_radius: f32,
    /// Radius in pixels of the framer's rotation ring
    pub framer_ring_radius: f32,
    /// How long handles stay visible after the cursor last moved
    pub handle_display_secs: f32,
    /// Radians of orbit per pixel of drag
    pub rotate_speed: f32,
    /// Eye-space units of pan per pixel of drag
    pub pan_speed: f32,
    /// Eye-space dolly per wheel notch
    pub camera_wheel: WheelSteps,
    /// Relative scale change per wheel notch on a gizmo
    pub gizmo_wheel: WheelSteps,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// World-to-eye matrix used until a scene file replaces it
    pub initial_modelview: Matrix4<f32>,
    pub lights: Vec<LightConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene_file: PathBuf::from("Test.scene"),
            mesh_directory: PathBuf::from("./"),
            default_meshes: ["HousePlant", "Rose", "Cat", "Cerberus"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            window_size: (600, 600),
            window_title: "MultiMesh".to_string(),
            pick_radius: 12.0,
            framer_ring_radius: 100.0,
            handle_display_secs: 1.0,
            rotate_speed: 0.01,
            pan_speed: 0.005,
            camera_wheel: WheelSteps::new(0.1, 0.5),
            gizmo_wheel: WheelSteps::new(0.05, 0.01),
            fov_degrees: 30.0,
            znear: 0.001,
            zfar: 500.0,
            initial_modelview: Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0)),
            lights: vec![
                LightConfig {
                    position: Point3::new(-0.2, 0.4, 0.3),
                    color: [1.0, 1.0, 0.0],
                },
                LightConfig {
                    position: Point3::new(-0.3, 0.3, 0.1),
                    color: [0.0, 1.0, 0.0],
                },
            ],
        }
    }
}

impl AppConfig {
    pub fn with_scene_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.scene_file = path.into();
        self
    }

    pub fn with_default_meshes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_meshes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_lights(mut self, lights: Vec<LightConfig>) -> Self {
        self.lights = lights;
        self
    }
}
