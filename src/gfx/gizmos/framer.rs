use cgmath::{EuclideanSpace, InnerSpace, Matrix4, MetricSpace, Point2, Point3, Rad, Vector3};
use std::f32::consts::PI;

use super::traits::Manipulator;
use crate::config::WheelSteps;
use crate::gfx::picking::{screen_angle, ViewContext};
use crate::gfx::scene::mesh::transform_origin;

/// Part of the framer under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerHandle {
    /// The disk at the frame origin; dragging translates
    Origin,
    /// The screen-space ring around the origin; dragging rotates about the view axis
    Ring,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FramerMode {
    Translate { offset: Vector3<f32> },
    Rotate { last_angle: f32 },
}

/// Transform gizmo for a mesh.
///
/// The frame is the mesh's object-to-world matrix. Its origin (the
/// translation column) is drawn as a disk, surrounded by a rotation ring of
/// fixed screen radius. All edits pivot on the origin, so the mesh never
/// drifts while rotating or scaling.
#[derive(Debug, Clone)]
pub struct Framer {
    pick_radius: f32,
    ring_radius: f32,
    wheel_steps: WheelSteps,
    mode: Option<FramerMode>,
}

impl Framer {
    pub fn new(pick_radius: f32, ring_radius: f32, wheel_steps: WheelSteps) -> Self {
        Self {
            pick_radius,
            ring_radius,
            wheel_steps,
            mode: None,
        }
    }

    pub fn ring_radius(&self) -> f32 {
        self.ring_radius
    }

    pub fn is_dragging(&self) -> bool {
        self.mode.is_some()
    }

    /// Abandons a drag whose target went away
    pub fn cancel(&mut self) {
        self.mode = None;
    }

    /// Which handle of the frame `target` lies under `cursor`, if any.
    /// The origin takes precedence over the ring.
    pub fn hit(
        &self,
        target: &Matrix4<f32>,
        cursor: Point2<f32>,
        view: &ViewContext,
    ) -> Option<FramerHandle> {
        let center = view.project(transform_origin(target))?;
        let distance = center.distance(cursor);
        if distance <= self.pick_radius {
            Some(FramerHandle::Origin)
        } else if (distance - self.ring_radius).abs() <= self.pick_radius {
            Some(FramerHandle::Ring)
        } else {
            None
        }
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(12.0, 100.0, WheelSteps::new(0.05, 0.01))
    }
}

/// Conjugates `transform` by a translation to `pivot`, applying it about that point
fn about_point(pivot: Point3<f32>, transform: Matrix4<f32>) -> Matrix4<f32> {
    let to_pivot = pivot.to_vec();
    Matrix4::from_translation(to_pivot) * transform * Matrix4::from_translation(-to_pivot)
}

fn wrap_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

impl Manipulator for Framer {
    type Target = Matrix4<f32>;

    fn down(&mut self, target: &mut Matrix4<f32>, cursor: Point2<f32>, view: &ViewContext) {
        let origin = transform_origin(target);
        self.mode = match self.hit(target, cursor, view) {
            Some(FramerHandle::Origin) => view.drag_point(cursor, origin).map(|grabbed| {
                FramerMode::Translate {
                    offset: origin - grabbed,
                }
            }),
            Some(FramerHandle::Ring) => view.project(origin).map(|center| FramerMode::Rotate {
                last_angle: screen_angle(center, cursor),
            }),
            None => None,
        };
    }

    fn drag(
        &mut self,
        target: &mut Matrix4<f32>,
        cursor: Point2<f32>,
        _shift: bool,
        view: &ViewContext,
    ) {
        let origin = transform_origin(target);
        match self.mode {
            Some(FramerMode::Translate { offset }) => {
                if let Some(grabbed) = view.drag_point(cursor, origin) {
                    let moved = (grabbed + offset) - origin;
                    *target = Matrix4::from_translation(moved) * *target;
                }
            }
            Some(FramerMode::Rotate { last_angle }) => {
                let Some(center) = view.project(origin) else {
                    return;
                };
                let angle = screen_angle(center, cursor);
                // Screen y points down, so a clockwise screen angle is a
                // negative rotation about the axis towards the viewer
                let delta = -wrap_angle(angle - last_angle);
                let rotation = Matrix4::from_axis_angle(view.view_axis().normalize(), Rad(delta));
                *target = about_point(origin, rotation) * *target;
                self.mode = Some(FramerMode::Rotate { last_angle: angle });
            }
            None => {}
        }
    }

    fn up(&mut self, _target: &mut Matrix4<f32>) {
        self.mode = None;
    }

    /// Uniform scale about the origin. Shift selects the finer step.
    fn wheel(
        &mut self,
        target: &mut Matrix4<f32>,
        direction: f32,
        shift: bool,
        _view: &ViewContext,
    ) {
        let factor = (1.0 + direction * self.wheel_steps.select(shift)).max(0.01);
        let origin = transform_origin(target);
        *target = about_point(origin, Matrix4::from_scale(factor)) * *target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, SquareMatrix, Transform};

    fn view() -> ViewContext {
        ViewContext::new(
            Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0)),
            cgmath::perspective(Deg(30.0), 1.0, 0.1, 100.0),
            (600.0, 600.0),
        )
    }

    fn framer() -> Framer {
        Framer::new(12.0, 100.0, WheelSteps::new(0.05, 0.01))
    }

    #[test]
    fn test_hit_origin_and_ring() {
        let view = view();
        let framer = framer();
        let transform = Matrix4::identity();

        assert_eq!(
            framer.hit(&transform, Point2::new(303.0, 300.0), &view),
            Some(FramerHandle::Origin)
        );
        assert_eq!(
            framer.hit(&transform, Point2::new(300.0, 395.0), &view),
            Some(FramerHandle::Ring)
        );
        assert_eq!(framer.hit(&transform, Point2::new(350.0, 300.0), &view), None);
    }

    #[test]
    fn test_origin_drag_translates_only() {
        let view = view();
        let mut framer = framer();
        let mut transform = Matrix4::from_scale(0.5);

        framer.down(&mut transform, Point2::new(300.0, 300.0), &view);
        assert!(framer.is_dragging());
        framer.drag(&mut transform, Point2::new(360.0, 300.0), false, &view);

        let origin = transform_origin(&transform);
        assert!(origin.x > 0.0);
        assert!(origin.y.abs() < 1e-3);
        assert!(origin.z.abs() < 1e-3);
        // Linear part untouched
        assert!((transform.x.x - 0.5).abs() < 1e-6);
        assert!((transform.y.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ring_drag_rotates_about_view_axis() {
        let view = view();
        let mut framer = framer();
        let offset = Vector3::new(0.2, 0.0, 0.0);
        let mut transform = Matrix4::from_translation(offset);
        let center = view.project(Point3::new(0.2, 0.0, 0.0)).unwrap();

        // Grab the ring to the right of the origin and drag a quarter turn up
        framer.down(&mut transform, Point2::new(center.x + 100.0, center.y), &view);
        framer.drag(&mut transform, Point2::new(center.x, center.y - 100.0), false, &view);
        framer.up(&mut transform);
        assert!(!framer.is_dragging());

        // Origin stays put
        let origin = transform_origin(&transform);
        assert!((origin - Point3::new(0.2, 0.0, 0.0)).magnitude() < 1e-5);

        // Counter-clockwise on screen: +x maps to +y
        let x_axis = transform.transform_vector(Vector3::unit_x());
        assert!((x_axis - Vector3::unit_y()).magnitude() < 1e-4);
    }

    #[test]
    fn test_wheel_scales_about_origin() {
        let view = view();
        let mut framer = framer();
        let mut transform = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));

        framer.wheel(&mut transform, 1.0, false, &view);
        assert!((transform.x.x - 1.05).abs() < 1e-6);
        let origin = transform_origin(&transform);
        assert!((origin - Point3::new(1.0, 2.0, 3.0)).magnitude() < 1e-5);

        framer.wheel(&mut transform, -1.0, true, &view);
        assert!((transform.x.x - 1.05 * 0.99).abs() < 1e-6);
    }
}
