//! # Manipulator Traits
//!
//! This module defines the contract shared by everything the pick controller
//! can route mouse input to: the light [`Mover`](super::Mover), the mesh
//! [`Framer`](super::Framer) and the camera controller.

use cgmath::Point2;

use crate::gfx::picking::ViewContext;

/// Press/drag/release/wheel contract for interactive handles.
///
/// A manipulator holds only the transient state of one drag (grab offsets,
/// the previous cursor position, the active mode). The value being edited is
/// passed in on every call as the associated [`Target`](Manipulator::Target),
/// so the same manipulator can be re-bound to a different mesh or light
/// between drags.
///
/// ## Lifecycle
///
/// 1. **down** - The cursor was pressed over the target; capture grab state
/// 2. **drag** - The cursor moved with the button held; mutate the target
/// 3. **up** - The button was released; forget the grab state
///
/// **wheel** may arrive at any time while the target is selected.
///
/// ## Examples
///
/// ```no_run
/// use cgmath::{Point2, Point3};
/// use multimesh::gfx::gizmos::{Manipulator, Mover};
/// use multimesh::gfx::picking::ViewContext;
///
/// fn drag_light(view: &ViewContext, light: &mut Point3<f32>) {
///     let mut mover = Mover::new();
///     mover.down(light, Point2::new(300.0, 300.0), view);
///     mover.drag(light, Point2::new(320.0, 300.0), false, view);
///     mover.up(light);
/// }
/// ```
pub trait Manipulator {
    /// The value this manipulator edits
    type Target;

    /// Begin a drag at `cursor`.
    fn down(&mut self, target: &mut Self::Target, cursor: Point2<f32>, view: &ViewContext);

    /// Continue the drag at `cursor`.
    ///
    /// # Arguments
    ///
    /// * `shift` - Whether a shift key is held; manipulators with an alternate
    ///   drag mode switch to it
    fn drag(
        &mut self,
        target: &mut Self::Target,
        cursor: Point2<f32>,
        shift: bool,
        view: &ViewContext,
    );

    /// End the drag.
    fn up(&mut self, _target: &mut Self::Target) {}

    /// Apply one wheel notch. `direction` is positive for scrolling away from
    /// the user.
    fn wheel(
        &mut self,
        target: &mut Self::Target,
        direction: f32,
        shift: bool,
        view: &ViewContext,
    );
}
