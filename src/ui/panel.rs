// src/ui/panel.rs
//! Command panel
//!
//! Non-blocking replacement for console prompts: the panel lists the meshes,
//! offers buttons for load/save/list and text fields for deleting and adding
//! meshes. Confirmed actions come back as [`Command`] values for the app to
//! apply through the editor.

use crate::editor::{parse_delete_input, Command, Editor};
use crate::gfx::picking::PickTarget;

/// Text fields and status line of the command panel
#[derive(Debug, Default)]
pub struct PanelState {
    pub delete_input: String,
    pub add_input: String,
    focus_delete: bool,
    focus_add: bool,
    status: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves keyboard focus to the delete field on the next frame (`D` key)
    pub fn request_delete(&mut self) {
        self.focus_delete = true;
    }

    /// Moves keyboard focus to the add field on the next frame (`A` key)
    pub fn request_add(&mut self) {
        self.focus_add = true;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Turns the delete field into a command; invalid text is reported and
    /// yields nothing.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        let parsed = parse_delete_input(&self.delete_input);
        self.delete_input.clear();
        match parsed {
            Ok(position) => Some(Command::DeleteMesh(position)),
            Err(err) => {
                log::warn!("{}", err);
                self.set_status(err.to_string());
                None
            }
        }
    }

    pub fn confirm_add(&mut self) -> Option<Command> {
        let name = self.add_input.trim().to_string();
        self.add_input.clear();
        if name.is_empty() {
            None
        } else {
            Some(Command::AddMesh(name))
        }
    }
}

/// Draws the command panel and returns the command the user confirmed this
/// frame, if any.
pub fn command_panel(ui: &imgui::Ui, editor: &Editor, state: &mut PanelState) -> Option<Command> {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return None;
    }

    let mut command = None;
    ui.window("Scene")
        .size([260.0, 320.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .build(|| {
            ui.text(format!("File: {}", editor.scene_path().display()));
            if ui.button("Load (R)") {
                command = Some(Command::LoadScene);
            }
            ui.same_line();
            if ui.button("Save (S)") {
                command = Some(Command::SaveScene);
            }
            ui.same_line();
            if ui.button("List (L)") {
                command = Some(Command::ListMeshes);
            }

            ui.separator();
            render_mesh_list(ui, editor);
            ui.separator();

            if let Some(confirmed) = render_edit_fields(ui, state) {
                command = Some(confirmed);
            }

            if let Some(status) = state.status() {
                ui.separator();
                ui.text_wrapped(status);
            }
        });

    command
}

fn render_mesh_list(ui: &imgui::Ui, editor: &Editor) {
    let selected = match editor.picker().target() {
        PickTarget::Gizmo(id) => editor.meshes().position(id),
        _ => None,
    };

    if editor.meshes().is_empty() {
        ui.text_disabled("No meshes loaded");
        return;
    }

    ui.child_window("mesh_list")
        .size([0.0, 120.0])
        .border(true)
        .build(|| {
            for (position, name) in editor.meshes().list() {
                ui.selectable_config(format!("{}: {}", position, name))
                    .selected(selected == Some(position))
                    .build();
            }
        });
}

fn render_edit_fields(ui: &imgui::Ui, state: &mut PanelState) -> Option<Command> {
    let mut command = None;

    if std::mem::take(&mut state.focus_delete) {
        ui.set_keyboard_focus_here();
    }
    let delete_entered = ui
        .input_text("##delete_input", &mut state.delete_input)
        .hint("mesh number")
        .enter_returns_true(true)
        .build();
    ui.same_line();
    if delete_entered | ui.button("Delete (D)") {
        command = state.confirm_delete();
    }

    if std::mem::take(&mut state.focus_add) {
        ui.set_keyboard_focus_here();
    }
    let add_entered = ui
        .input_text("##add_input", &mut state.add_input)
        .hint("mesh name")
        .enter_returns_true(true)
        .build();
    ui.same_line();
    if add_entered | ui.button("Add (A)") {
        if let Some(add) = state.confirm_add() {
            command = Some(add);
        }
    }

    command
}
