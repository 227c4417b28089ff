use cgmath::Point2;

use super::view_camera::Camera;
use crate::config::{AppConfig, WheelSteps};
use crate::gfx::gizmos::Manipulator;
use crate::gfx::picking::ViewContext;

/// Turns background drags into camera motion.
///
/// Plain drag orbits about the camera's rotation center, shift-drag pans, and
/// the wheel dollies along the viewing axis (shift for the coarser step).
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Radians of orbit per pixel
    pub rotate_speed: f32,
    /// Eye units of pan per pixel
    pub pan_speed: f32,
    pub wheel_steps: WheelSteps,
    last_cursor: Option<Point2<f32>>,
    is_shift_held: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, pan_speed: f32, wheel_steps: WheelSteps) -> Self {
        Self {
            rotate_speed,
            pan_speed,
            wheel_steps,
            last_cursor: None,
            is_shift_held: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.rotate_speed, config.pan_speed, config.camera_wheel)
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.last_cursor.is_some() && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.last_cursor.is_some() && !self.is_shift_held
    }

    pub fn cancel(&mut self) {
        self.last_cursor = None;
        self.is_shift_held = false;
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl Manipulator for CameraController {
    type Target = Camera;

    fn down(&mut self, _camera: &mut Camera, cursor: Point2<f32>, _view: &ViewContext) {
        self.last_cursor = Some(cursor);
    }

    fn drag(&mut self, camera: &mut Camera, cursor: Point2<f32>, shift: bool, _view: &ViewContext) {
        let Some(last) = self.last_cursor.replace(cursor) else {
            return;
        };
        let delta = cursor - last;
        self.is_shift_held = shift;

        if shift {
            // SHIFT + DRAG = PAN, screen y points down
            camera.pan(delta.x * self.pan_speed, -delta.y * self.pan_speed);
        } else {
            camera.orbit(delta.x * self.rotate_speed, delta.y * self.rotate_speed);
        }
    }

    fn up(&mut self, _camera: &mut Camera) {
        self.cancel();
    }

    fn wheel(&mut self, camera: &mut Camera, direction: f32, shift: bool, _view: &ViewContext) {
        camera.dolly(direction * self.wheel_steps.select(shift));
    }
}
