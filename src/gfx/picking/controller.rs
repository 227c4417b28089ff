use cgmath::Point2;

use crate::config::AppConfig;
use crate::gfx::{
    camera::{Camera, CameraController},
    gizmos::{Framer, Manipulator, Mover},
    light::Light,
    scene::{MeshCollection, MeshId},
};

/// What mouse input is currently routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickTarget {
    /// The camera, the fallback when a press hits no handle
    #[default]
    Camera,
    /// The light at this index
    Light(usize),
    /// The framer bound to the mesh with this id
    Gizmo(MeshId),
}

/// Resolves presses to a light, a mesh gizmo or the camera and forwards the
/// rest of the drag to whichever was picked.
///
/// The target survives the release, so the wheel keeps acting on the last
/// picked gizmo and the framer ring can be grabbed again without first hitting
/// the origin disk. Only a new press changes it.
#[derive(Debug, Clone)]
pub struct PickController {
    target: PickTarget,
    dragging: bool,
    pick_radius: f32,
    mover: Mover,
    framer: Framer,
    camera_controller: CameraController,
}

impl PickController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            target: PickTarget::Camera,
            dragging: false,
            pick_radius: config.pick_radius,
            mover: Mover::new(),
            framer: Framer::new(
                config.pick_radius,
                config.framer_ring_radius,
                config.gizmo_wheel,
            ),
            camera_controller: CameraController::from_config(config),
        }
    }

    pub fn target(&self) -> PickTarget {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn framer(&self) -> &Framer {
        &self.framer
    }

    pub fn pick_radius(&self) -> f32 {
        self.pick_radius
    }

    fn select(&mut self, target: PickTarget) {
        if self.target != target {
            log::debug!("pick target {:?} -> {:?}", self.target, target);
        }
        self.target = target;
        self.dragging = true;
    }

    /// Mouse button pressed at `cursor`.
    ///
    /// Lights are tested first, then mesh gizmo origins in collection order,
    /// then the rotation ring of the gizmo that is already selected. Anything
    /// else grabs the camera.
    pub fn press(
        &mut self,
        cursor: Point2<f32>,
        camera: &mut Camera,
        lights: &mut [Light],
        meshes: &mut MeshCollection,
    ) -> PickTarget {
        let view = camera.view_context();

        if let Some((index, light)) = lights
            .iter_mut()
            .enumerate()
            .find(|(_, light)| view.mouse_over(cursor, light.position, self.pick_radius))
        {
            self.mover.down(&mut light.position, cursor, &view);
            self.select(PickTarget::Light(index));
            return self.target;
        }

        let radius = self.pick_radius;
        if let Some(mesh) = meshes
            .iter_mut()
            .find(|mesh| view.mouse_over(cursor, mesh.origin(), radius))
        {
            self.framer.down(&mut mesh.transform, cursor, &view);
            self.select(PickTarget::Gizmo(mesh.id));
            return self.target;
        }

        if let PickTarget::Gizmo(id) = self.target {
            if let Some(mesh) = meshes.find_mut(id) {
                if self.framer.hit(&mesh.transform, cursor, &view).is_some() {
                    self.framer.down(&mut mesh.transform, cursor, &view);
                    self.select(PickTarget::Gizmo(id));
                    return self.target;
                }
            }
        }

        self.camera_controller.down(camera, cursor, &view);
        self.select(PickTarget::Camera);
        self.target
    }

    /// Cursor moved with the button held. Ignored when no drag is active.
    pub fn drag(
        &mut self,
        cursor: Point2<f32>,
        shift: bool,
        camera: &mut Camera,
        lights: &mut [Light],
        meshes: &mut MeshCollection,
    ) {
        if !self.dragging {
            return;
        }
        let view = camera.view_context();

        match self.target {
            PickTarget::Light(index) => {
                if let Some(light) = lights.get_mut(index) {
                    self.mover.drag(&mut light.position, cursor, shift, &view);
                }
            }
            PickTarget::Gizmo(id) => {
                if let Some(mesh) = meshes.find_mut(id) {
                    self.framer.drag(&mut mesh.transform, cursor, shift, &view);
                }
            }
            PickTarget::Camera => self.camera_controller.drag(camera, cursor, shift, &view),
        }
    }

    /// Mouse button released: ends the drag but keeps the target selected.
    pub fn release(&mut self, camera: &mut Camera, lights: &mut [Light], meshes: &mut MeshCollection) {
        if !self.dragging {
            return;
        }
        self.dragging = false;

        match self.target {
            PickTarget::Light(index) => {
                if let Some(light) = lights.get_mut(index) {
                    self.mover.up(&mut light.position);
                }
            }
            PickTarget::Gizmo(id) => {
                if let Some(mesh) = meshes.find_mut(id) {
                    self.framer.up(&mut mesh.transform);
                }
            }
            PickTarget::Camera => self.camera_controller.up(camera),
        }
    }

    /// One wheel notch: scales the selected gizmo's mesh or dollies the camera.
    pub fn wheel(
        &mut self,
        direction: f32,
        shift: bool,
        camera: &mut Camera,
        meshes: &mut MeshCollection,
    ) {
        let view = camera.view_context();

        match self.target {
            PickTarget::Gizmo(id) => {
                if let Some(mesh) = meshes.find_mut(id) {
                    self.framer.wheel(&mut mesh.transform, direction, shift, &view);
                }
            }
            PickTarget::Camera => self.camera_controller.wheel(camera, direction, shift, &view),
            PickTarget::Light(_) => {}
        }
    }

    /// Drops the selection if it refers to the mesh `id`
    pub fn forget(&mut self, id: MeshId) {
        if self.target == PickTarget::Gizmo(id) {
            self.reset();
        }
    }

    /// Back to the initial state: camera selected, no drag in progress
    pub fn reset(&mut self) {
        self.target = PickTarget::Camera;
        self.dragging = false;
        self.mover = Mover::new();
        self.framer.cancel();
        self.camera_controller.cancel();
    }
}
