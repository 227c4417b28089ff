use cgmath::{Deg, Matrix4, Point3, Rad, Transform, Vector3};

use crate::config::AppConfig;
use crate::gfx::picking::ViewContext;

/// Perspective camera driven directly by its world-to-eye ("modelview") matrix.
///
/// Drags edit the modelview in eye space, so orbit, pan and dolly always act
/// relative to what is currently on screen. The modelview is what scene files
/// store as their first record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub modelview: Matrix4<f32>,
    /// World point the camera orbits about
    pub rotation_center: Point3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    /// Window size in physical pixels
    pub viewport: (u32, u32),
}

impl Camera {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            modelview: config.initial_modelview,
            rotation_center: Point3::new(0.0, 0.0, 0.0),
            fovy: Deg(config.fov_degrees),
            znear: config.znear,
            zfar: config.zfar,
            viewport: config.window_size,
        }
    }

    pub fn aspect(&self) -> f32 {
        let (width, height) = self.viewport;
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    pub fn projection(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect(), self.znear, self.zfar)
    }

    /// World-to-clip transform
    pub fn full_view(&self) -> Matrix4<f32> {
        self.projection() * self.modelview
    }

    pub fn view_context(&self) -> ViewContext {
        ViewContext::new(
            self.modelview,
            self.projection(),
            (self.viewport.0 as f32, self.viewport.1 as f32),
        )
    }

    /// Replaces the modelview wholesale, as a scene load does
    pub fn set_modelview(&mut self, modelview: Matrix4<f32>) {
        self.modelview = modelview;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
        }
    }

    /// Rotates the scene about the rotation center: `yaw` about the eye's
    /// vertical axis, then `pitch` about its horizontal axis (radians).
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let pivot = self.modelview.transform_point(self.rotation_center);
        let pivot = Vector3::new(pivot.x, pivot.y, pivot.z);
        let rotation = Matrix4::from_angle_x(Rad(pitch)) * Matrix4::from_angle_y(Rad(yaw));
        self.modelview = Matrix4::from_translation(pivot)
            * rotation
            * Matrix4::from_translation(-pivot)
            * self.modelview;
    }

    /// Translates the scene in the image plane (eye units)
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.modelview = Matrix4::from_translation(Vector3::new(dx, dy, 0.0)) * self.modelview;
    }

    /// Moves the scene along the viewing axis; positive brings it closer
    pub fn dolly(&mut self, amount: f32) {
        self.modelview = Matrix4::from_translation(Vector3::new(0.0, 0.0, amount)) * self.modelview;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace};

    fn eye_space(camera: &Camera, point: Point3<f32>) -> Point3<f32> {
        camera.modelview.transform_point(point)
    }

    #[test]
    fn test_default_camera_looks_at_origin_from_five_units() {
        let camera = Camera::default();
        assert_eq!(eye_space(&camera, Point3::origin()), Point3::new(0.0, 0.0, -5.0));
        assert_eq!(camera.aspect(), 1.0);
    }

    #[test]
    fn test_orbit_keeps_rotation_center_fixed() {
        let mut camera = Camera::default();
        camera.orbit(0.4, -0.3);
        let center = eye_space(&camera, Point3::origin());
        assert!((center - Point3::new(0.0, 0.0, -5.0)).magnitude() < 1e-5);

        // Yaw turns the front of the scene towards the right
        let mut camera = Camera::default();
        camera.orbit(0.3, 0.0);
        assert!(eye_space(&camera, Point3::new(0.0, 0.0, 1.0)).x > 0.0);
    }

    #[test]
    fn test_pan_and_dolly_translate_in_eye_space() {
        let mut camera = Camera::default();
        camera.pan(0.5, -0.25);
        camera.dolly(1.0);
        let center = eye_space(&camera, Point3::origin());
        assert!((center - Point3::new(0.5, -0.25, -4.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_resize_ignores_zero_sizes() {
        let mut camera = Camera::default();
        camera.resize(0, 300);
        assert_eq!(camera.viewport, (600, 600));
        camera.resize(800, 400);
        assert_eq!(camera.aspect(), 2.0);
    }
}
