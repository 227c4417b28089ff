use cgmath::{Point2, Point3, Vector3, Zero};

use super::traits::Manipulator;
use crate::gfx::picking::ViewContext;

/// Drags a free 3D point (a light) in the plane through it that faces the
/// camera. The offset between the point and where it was grabbed is kept, so
/// the point does not jump under the cursor.
#[derive(Debug, Clone, Default)]
pub struct Mover {
    grab_offset: Option<Vector3<f32>>,
}

impl Mover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }
}

impl Manipulator for Mover {
    type Target = Point3<f32>;

    fn down(&mut self, target: &mut Point3<f32>, cursor: Point2<f32>, view: &ViewContext) {
        self.grab_offset = Some(
            view.drag_point(cursor, *target)
                .map(|grabbed| *target - grabbed)
                .unwrap_or_else(Vector3::zero),
        );
    }

    fn drag(
        &mut self,
        target: &mut Point3<f32>,
        cursor: Point2<f32>,
        _shift: bool,
        view: &ViewContext,
    ) {
        let Some(offset) = self.grab_offset else {
            return;
        };
        if let Some(grabbed) = view.drag_point(cursor, *target) {
            *target = grabbed + offset;
        }
    }

    fn up(&mut self, _target: &mut Point3<f32>) {
        self.grab_offset = None;
    }

    /// Lights have no wheel behaviour
    fn wheel(&mut self, _target: &mut Point3<f32>, _direction: f32, _shift: bool, _view: &ViewContext) {}
}
