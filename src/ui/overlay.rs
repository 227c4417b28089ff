//! Handle overlay
//!
//! Light handles, mesh gizmo origins and the ring of the selected framer are
//! drawn as 2D shapes on the ImGui background draw list, at the screen
//! positions the pick controller tests against.

use std::time::Instant;

use crate::editor::Editor;
use crate::gfx::picking::PickTarget;

const DISK_RADIUS: f32 = 6.0;
const GIZMO_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
const ACTIVE_GIZMO_COLOR: [f32; 4] = [1.0, 0.55, 0.1, 1.0];

/// One 2D shape of the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleShape {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
    pub filled: bool,
}

/// Shapes to draw this frame; empty once the cursor has been still for the
/// configured display time.
pub fn handle_shapes(editor: &Editor, now: Instant) -> Vec<HandleShape> {
    if !editor.handles_visible(now) {
        return Vec::new();
    }

    let view = editor.camera.view_context();
    let active = match editor.picker().target() {
        PickTarget::Gizmo(id) => Some(id),
        _ => None,
    };
    let mut shapes = Vec::new();

    for mesh in editor.meshes() {
        let Some(center) = view.project(mesh.origin()) else {
            continue;
        };
        let is_active = active == Some(mesh.id);
        let color = if is_active {
            ACTIVE_GIZMO_COLOR
        } else {
            GIZMO_COLOR
        };
        shapes.push(HandleShape {
            center: [center.x, center.y],
            radius: DISK_RADIUS,
            color,
            filled: true,
        });
        if is_active {
            shapes.push(HandleShape {
                center: [center.x, center.y],
                radius: editor.picker().framer().ring_radius(),
                color,
                filled: false,
            });
        }
    }

    // Lights last so they sit on top, matching pick precedence
    for light in &editor.lights {
        if let Some(center) = view.project(light.position) {
            let [r, g, b] = light.color;
            shapes.push(HandleShape {
                center: [center.x, center.y],
                radius: DISK_RADIUS,
                color: [r, g, b, 1.0],
                filled: true,
            });
        }
    }

    shapes
}

/// Draws the overlay on the background draw list
pub fn draw_handles(ui: &imgui::Ui, editor: &Editor, now: Instant) {
    let shapes = handle_shapes(editor, now);
    if shapes.is_empty() {
        return;
    }

    let draw_list = ui.get_background_draw_list();
    for shape in shapes {
        draw_list
            .add_circle(shape.center, shape.radius, shape.color)
            .filled(shape.filled)
            .thickness(2.0)
            .build();
    }
}
