//! # Editor State
//!
//! [`Editor`] owns everything the viewer edits: the camera, the lights, the
//! mesh collection and the pick controller that routes mouse input between
//! them. Keyboard shortcuts and the command panel produce [`Command`] values
//! which are applied through [`Editor::execute`]; each confirmed command
//! mutates the scene exactly once.

use cgmath::Point2;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::{
    config::AppConfig,
    error::{EditorError, EditorResult, SceneError},
    gfx::{
        camera::Camera,
        light::Light,
        picking::{PickController, PickTarget},
        scene::{MeshCollection, MeshId, MeshLoader, ObjLoader, SceneFile},
    },
};

/// A user request, produced by a key press or the command panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the scene with the contents of the scene file
    LoadScene,
    /// Write the camera and all meshes to the scene file
    SaveScene,
    /// Report every mesh with its position
    ListMeshes,
    /// Remove the mesh at this position
    DeleteMesh(usize),
    /// Load a mesh by name and append it
    AddMesh(String),
}

/// Parses text typed into the delete field as a mesh position
pub fn parse_delete_input(text: &str) -> EditorResult<usize> {
    let trimmed = text.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| EditorError::InvalidIndexInput(trimmed.to_string()))
}

pub struct Editor {
    config: AppConfig,
    loader: Box<dyn MeshLoader>,
    pub camera: Camera,
    pub lights: Vec<Light>,
    meshes: MeshCollection,
    picker: PickController,
    cursor: Point2<f32>,
    shift: bool,
    last_motion: Option<Instant>,
}

impl Editor {
    pub fn new(config: AppConfig, loader: Box<dyn MeshLoader>) -> Self {
        Self {
            camera: Camera::from_config(&config),
            lights: config.lights.iter().map(Light::from).collect(),
            meshes: MeshCollection::new(),
            picker: PickController::new(&config),
            cursor: Point2::new(0.0, 0.0),
            shift: false,
            last_motion: None,
            loader,
            config,
        }
    }

    /// Editor reading `.obj`/`.tga` files from the configured mesh directory
    pub fn with_obj_loader(config: AppConfig) -> Self {
        let loader = ObjLoader::new(config.mesh_directory.clone());
        Self::new(config, Box::new(loader))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn meshes(&self) -> &MeshCollection {
        &self.meshes
    }

    pub fn picker(&self) -> &PickController {
        &self.picker
    }

    pub fn scene_path(&self) -> &Path {
        &self.config.scene_file
    }

    /// Startup: load the scene file, or the default meshes if it can't be read
    pub fn startup(&mut self) {
        let path = self.config.scene_file.clone();
        match self.load_scene_from(&path) {
            Ok(count) => log::info!("loaded {} meshes from {}", count, path.display()),
            Err(err) => {
                log::warn!("{}; loading default meshes", err);
                let count = self.load_defaults();
                log::info!("loaded {} default meshes", count);
            }
        }
    }

    /// Adds every default mesh that loads, skipping the rest. Returns how many
    /// were added.
    pub fn load_defaults(&mut self) -> usize {
        let names = self.config.default_meshes.clone();
        names
            .iter()
            .filter(|name| match self.meshes.add(name, None, self.loader.as_ref()) {
                Ok(_) => true,
                Err(err) => {
                    log::warn!("skipping default mesh '{}': {}", name, err);
                    false
                }
            })
            .count()
    }

    /// Applies a command. Failures leave the scene as it was.
    pub fn execute(&mut self, command: Command) -> EditorResult<()> {
        match command {
            Command::LoadScene => {
                let path = self.config.scene_file.clone();
                let count = self.load_scene_from(&path)?;
                log::info!("loaded {} meshes from {}", count, path.display());
            }
            Command::SaveScene => {
                let path = self.config.scene_file.clone();
                self.save_scene_to(&path)?;
                log::info!("saved {} meshes to {}", self.meshes.len(), path.display());
            }
            Command::ListMeshes => {
                for (position, name) in self.meshes.list() {
                    log::info!("{}: {}", position, name);
                }
            }
            Command::DeleteMesh(position) => {
                let id = self.delete(position)?;
                log::info!("deleted mesh {} at position {}", id, position);
            }
            Command::AddMesh(name) => {
                let id = self.add(&name)?;
                log::info!("added mesh '{}' as {}", name.trim(), id);
            }
        }
        Ok(())
    }

    /// Reads `path` completely, then replaces the camera and all meshes.
    ///
    /// Format errors abort before anything changes. Entries whose geometry
    /// can't be loaded are skipped. Returns the number of meshes now loaded.
    pub fn load_scene_from(&mut self, path: &Path) -> Result<usize, SceneError> {
        let scene = SceneFile::load(path)?;

        let mut loaded = MeshCollection::new();
        for record in &scene.meshes {
            if let Err(err) = loaded.add(&record.name, Some(record.transform), self.loader.as_ref()) {
                log::warn!("skipping mesh '{}': {}", record.name, err);
            }
        }

        self.meshes.replace(loaded);
        self.camera.set_modelview(scene.camera);
        self.picker.reset();
        Ok(self.meshes.len())
    }

    pub fn save_scene_to(&self, path: &Path) -> Result<(), SceneError> {
        SceneFile::capture(self.camera.modelview, &self.meshes).save(path)
    }

    /// Removes the mesh at `position`, dropping the selection if it was that mesh
    pub fn delete(&mut self, position: usize) -> EditorResult<MeshId> {
        let removed = self.meshes.remove(position)?;
        self.picker.forget(removed.id);
        Ok(removed.id)
    }

    pub fn add(&mut self, name: &str) -> EditorResult<MeshId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        Ok(self.meshes.add(name, None, self.loader.as_ref())?)
    }

    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    pub fn cursor(&self) -> Point2<f32> {
        self.cursor
    }

    pub fn mouse_moved(&mut self, cursor: Point2<f32>, now: Instant) {
        self.cursor = cursor;
        self.last_motion = Some(now);
        self.picker.drag(
            cursor,
            self.shift,
            &mut self.camera,
            &mut self.lights,
            &mut self.meshes,
        );
    }

    pub fn mouse_pressed(&mut self) -> PickTarget {
        self.picker.press(
            self.cursor,
            &mut self.camera,
            &mut self.lights,
            &mut self.meshes,
        )
    }

    pub fn mouse_released(&mut self) {
        self.picker
            .release(&mut self.camera, &mut self.lights, &mut self.meshes);
    }

    /// One wheel notch, positive away from the user
    pub fn wheel(&mut self, direction: f32) {
        self.picker
            .wheel(direction, self.shift, &mut self.camera, &mut self.meshes);
    }

    /// Handles are shown while the cursor has moved recently
    pub fn handles_visible(&self, now: Instant) -> bool {
        let display = Duration::from_secs_f32(self.config.handle_display_secs.max(0.0));
        self.last_motion
            .is_some_and(|moved| now.saturating_duration_since(moved) < display)
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("scene_file", &self.config.scene_file)
            .field("meshes", &self.meshes.list())
            .field("target", &self.picker.target())
            .finish()
    }
}

/// Scene path for the application, the first command-line argument when given
pub fn scene_path_from_args<I>(mut args: I, default: PathBuf) -> PathBuf
where
    I: Iterator<Item = String>,
{
    args.next().map(PathBuf::from).unwrap_or(default)
}
