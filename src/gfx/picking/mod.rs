//! # Screen-Space Picking
//!
//! Handles are picked by projecting their world position to the screen and
//! comparing it with the cursor, rather than by ray-casting geometry. Dragging
//! goes the other way: the cursor is turned into a world-space ray and
//! intersected with a plane parallel to the image plane.
//!
//! ## Coordinate conventions
//!
//! - Screen points are in pixels with the origin at the top-left corner and y
//!   pointing down, the same convention winit reports cursor positions in.
//! - Clip space follows cgmath's OpenGL-style [`cgmath::perspective`]: NDC depth
//!   runs from -1 (near) to 1 (far).
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Matrix4, Point2, Point3, Vector3};
//! use multimesh::gfx::picking::ViewContext;
//!
//! let view = ViewContext::new(
//!     Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0)),
//!     cgmath::perspective(cgmath::Deg(30.0), 1.0, 0.001, 500.0),
//!     (600.0, 600.0),
//! );
//! let center = view.project(Point3::new(0.0, 0.0, 0.0)).unwrap();
//! assert!((center.x - 300.0).abs() < 1e-3);
//! assert!(view.mouse_over(Point2::new(305.0, 296.0), Point3::new(0.0, 0.0, 0.0), 12.0));
//! ```

pub mod controller;

pub use controller::{PickController, PickTarget};

use cgmath::{
    InnerSpace, Matrix4, MetricSpace, Point2, Point3, SquareMatrix, Transform, Vector3, Vector4,
};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Point3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Intersection with the plane through `point` with normal `normal`.
    ///
    /// Returns `None` when the ray runs parallel to the plane.
    pub fn intersect_plane(&self, point: Point3<f32>, normal: Vector3<f32>) -> Option<Point3<f32>> {
        let denom = self.direction.dot(normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        Some(self.point_at(t))
    }
}

/// Everything needed to map between world space and the window: the
/// world-to-eye modelview, the projection and the viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewContext {
    pub modelview: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub viewport: (f32, f32),
}

impl ViewContext {
    pub fn new(modelview: Matrix4<f32>, projection: Matrix4<f32>, viewport: (f32, f32)) -> Self {
        Self {
            modelview,
            projection,
            viewport,
        }
    }

    /// Combined world-to-clip transform
    pub fn full_view(&self) -> Matrix4<f32> {
        self.projection * self.modelview
    }

    /// Projects a world point to window pixels.
    ///
    /// Points at or behind the eye have no screen position.
    pub fn project(&self, point: Point3<f32>) -> Option<Point2<f32>> {
        let clip = self.full_view() * point.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        let (width, height) = self.viewport;
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(Point2::new(
            (ndc_x + 1.0) * 0.5 * width,
            (1.0 - ndc_y) * 0.5 * height,
        ))
    }

    /// True when `point` projects within `radius` pixels of `cursor`
    pub fn mouse_over(&self, cursor: Point2<f32>, point: Point3<f32>, radius: f32) -> bool {
        self.project(point)
            .is_some_and(|screen| screen.distance(cursor) <= radius)
    }

    /// Convert a window position to a world-space ray from the near plane
    /// towards the far plane.
    pub fn screen_to_ray(&self, cursor: Point2<f32>) -> Option<Ray> {
        let (width, height) = self.viewport;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = 2.0 * cursor.x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * cursor.y / height; // Flip Y axis

        let inverse = self.full_view().invert()?;
        let near = inverse * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = inverse * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }

        let near = Point3::from_homogeneous(near);
        let far = Point3::from_homogeneous(far);
        Some(Ray::new(near, far - near))
    }

    /// World-space direction from the scene towards the eye, the normal of
    /// planes parallel to the image plane.
    pub fn view_axis(&self) -> Vector3<f32> {
        self.modelview
            .invert()
            .map(|eye_to_world| eye_to_world.transform_vector(Vector3::unit_z()).normalize())
            .unwrap_or_else(Vector3::unit_z)
    }

    /// Cursor position on the plane through `point` parallel to the image plane
    pub fn drag_point(&self, cursor: Point2<f32>, point: Point3<f32>) -> Option<Point3<f32>> {
        self.screen_to_ray(cursor)?
            .intersect_plane(point, self.view_axis())
    }
}

/// Angle in radians of `cursor` around `center`, measured on screen
pub fn screen_angle(center: Point2<f32>, cursor: Point2<f32>) -> f32 {
    let offset = cursor - center;
    offset.y.atan2(offset.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, EuclideanSpace};

    fn default_view() -> ViewContext {
        ViewContext::new(
            Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0)),
            cgmath::perspective(Deg(30.0), 1.0, 0.001, 500.0),
            (600.0, 600.0),
        )
    }

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let screen = default_view().project(Point3::origin()).unwrap();
        assert!((screen.x - 300.0).abs() < 1e-3);
        assert!((screen.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_y_points_down() {
        let view = default_view();
        let above = view.project(Point3::new(0.0, 0.5, 0.0)).unwrap();
        let right = view.project(Point3::new(0.5, 0.0, 0.0)).unwrap();
        assert!(above.y < 300.0);
        assert!(right.x > 300.0);
    }

    #[test]
    fn test_point_behind_eye_has_no_projection() {
        assert!(default_view().project(Point3::new(0.0, 0.0, 10.0)).is_none());
    }

    #[test]
    fn test_mouse_over_radius() {
        let view = default_view();
        assert!(view.mouse_over(Point2::new(310.0, 300.0), Point3::origin(), 12.0));
        assert!(!view.mouse_over(Point2::new(320.0, 300.0), Point3::origin(), 12.0));
    }

    #[test]
    fn test_ray_through_projected_point_hits_it() {
        let view = default_view();
        let target = Point3::new(0.3, -0.2, 0.1);
        let screen = view.project(target).unwrap();
        let hit = view.drag_point(screen, target).unwrap();
        assert!(hit.distance(target) < 5e-3);
    }

    #[test]
    fn test_view_axis_for_translated_camera() {
        let axis = default_view().view_axis();
        assert!((axis - Vector3::unit_z()).magnitude() < 1e-6);
    }

    #[test]
    fn test_parallel_ray_misses_plane() {
        let ray = Ray::new(Point3::origin(), Vector3::unit_x());
        assert!(ray
            .intersect_plane(Point3::new(0.0, 0.0, 1.0), Vector3::unit_z())
            .is_none());
    }

    #[test]
    fn test_screen_angle() {
        let center = Point2::new(100.0, 100.0);
        assert!((screen_angle(center, Point2::new(200.0, 100.0))).abs() < 1e-6);
        assert!(
            (screen_angle(center, Point2::new(100.0, 200.0)) - std::f32::consts::FRAC_PI_2).abs()
                < 1e-6
        );
    }
}
