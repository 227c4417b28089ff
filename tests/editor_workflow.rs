use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use cgmath::{InnerSpace, Matrix4, Point2, Point3, SquareMatrix, Vector3};
use multimesh::config::LightConfig;
use multimesh::error::{EditorError, MeshError, SceneError};
use multimesh::gfx::picking::PickTarget;
use multimesh::gfx::scene::{LoadedMesh, MeshGeometry, MeshLoader, SceneFile, SceneRecord};
use multimesh::{AppConfig, Command, Editor};

/// Serves a single triangle for every registered name
struct MemoryLoader {
    meshes: HashMap<String, LoadedMesh>,
}

impl MemoryLoader {
    fn new(names: &[&str]) -> Self {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let meshes = names
            .iter()
            .map(|name| {
                let geometry = MeshGeometry::from_flat(&positions, &[], &[], &[0, 1, 2])
                    .expect("triangle is valid");
                (
                    name.to_string(),
                    LoadedMesh {
                        geometry,
                        texture: None,
                    },
                )
            })
            .collect();
        Self { meshes }
    }
}

impl MeshLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<LoadedMesh, MeshError> {
        self.meshes
            .get(name)
            .cloned()
            .ok_or_else(|| MeshError::NoGeometry(PathBuf::from(name)))
    }
}

fn scene_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "multimesh_workflow_{}_{}.scene",
        name,
        std::process::id()
    ))
}

fn editor_with(config: AppConfig) -> Editor {
    Editor::new(config, Box::new(MemoryLoader::new(&["Rose", "Cat", "HousePlant"])))
}

fn editor() -> Editor {
    editor_with(AppConfig::default())
}

#[test]
fn test_save_and_load_rose_and_cat() {
    let path = scene_path("rose_cat");
    let camera = Matrix4::from_translation(Vector3::new(0.0, -0.25, -6.0));
    let cat = Matrix4::from_translation(Vector3::new(0.5, 0.0, 0.0)) * Matrix4::from_scale(0.5);
    SceneFile::new(
        camera,
        vec![
            SceneRecord::new("Rose", Matrix4::identity()),
            SceneRecord::new("Cat", cat),
        ],
    )
    .save(&path)
    .unwrap();

    let mut editor = editor_with(AppConfig::default().with_scene_file(&path));
    editor.execute(Command::LoadScene).unwrap();
    assert_eq!(
        editor.meshes().list(),
        vec![(0, "Rose".to_string()), (1, "Cat".to_string())]
    );
    assert_eq!(editor.camera.modelview, camera);
    assert_eq!(editor.meshes().get(1).unwrap().transform, cat);

    // Saving and reloading through the editor reproduces the same file
    editor.execute(Command::SaveScene).unwrap();
    let reloaded = SceneFile::load(&path).unwrap();
    assert_eq!(reloaded.camera, camera);
    assert_eq!(reloaded.meshes.len(), 2);
    assert_eq!(reloaded.meshes[0].transform, Matrix4::identity());
    assert_eq!(reloaded.meshes[1].name, "Cat");

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_short_camera_line_keeps_current_scene() {
    let path = scene_path("short_camera");
    std::fs::write(&path, "1 0 0 0 0 1 0 0\nRose\n1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1\n").unwrap();

    let mut editor = editor_with(AppConfig::default().with_scene_file(&path));
    editor.add("Cat").unwrap();
    let camera = editor.camera.modelview;

    let result = editor.execute(Command::LoadScene);
    assert!(matches!(
        result,
        Err(EditorError::Scene(SceneError::Format { line: 1, .. }))
    ));
    assert_eq!(editor.meshes().list(), vec![(0, "Cat".to_string())]);
    assert_eq!(editor.camera.modelview, camera);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_delete_shifts_positions_and_rejects_bad_index() {
    let mut editor = editor();
    for name in ["Rose", "Cat", "HousePlant"] {
        editor.execute(Command::AddMesh(name.to_string())).unwrap();
    }

    editor.execute(Command::DeleteMesh(0)).unwrap();
    assert_eq!(
        editor.meshes().list(),
        vec![(0, "Cat".to_string()), (1, "HousePlant".to_string())]
    );

    assert!(editor.execute(Command::DeleteMesh(2)).is_err());
    assert!(matches!(
        multimesh::editor::parse_delete_input("-1"),
        Err(EditorError::InvalidIndexInput(_))
    ));
    assert_eq!(editor.meshes().len(), 2);
}

#[test]
fn test_add_unknown_mesh_leaves_collection_unchanged() {
    let mut editor = editor();
    editor.add("Rose").unwrap();
    assert!(matches!(
        editor.execute(Command::AddMesh("Teapot".to_string())),
        Err(EditorError::Mesh(MeshError::NoGeometry(_)))
    ));
    assert_eq!(editor.meshes().list(), vec![(0, "Rose".to_string())]);
}

#[test]
fn test_light_beats_overlapping_gizmo() {
    let light = LightConfig {
        position: Point3::new(0.0, 0.0, 0.0),
        color: [1.0, 1.0, 0.0],
    };
    let mut editor = editor_with(AppConfig::default().with_lights(vec![light]));
    editor.add("Rose").unwrap();
    let now = Instant::now();

    editor.mouse_moved(Point2::new(300.0, 300.0), now);
    assert_eq!(editor.mouse_pressed(), PickTarget::Light(0));
    editor.mouse_moved(Point2::new(330.0, 300.0), now);
    editor.mouse_released();

    assert!(editor.lights[0].position.x > 0.0);
    assert_eq!(editor.meshes().get(0).unwrap().transform, Matrix4::identity());

    // The wheel does nothing while a light is selected
    let camera = editor.camera.modelview;
    editor.wheel(1.0);
    assert_eq!(editor.camera.modelview, camera);
}

#[test]
fn test_gizmo_drag_and_wheel_edit_first_mesh_only() {
    let mut editor = editor();
    editor.add("Rose").unwrap();
    editor.add("Cat").unwrap();
    let rose = editor.meshes().get(0).unwrap().id;
    let now = Instant::now();

    // Both origins overlap at the window center; the first mesh wins
    editor.mouse_moved(Point2::new(300.0, 300.0), now);
    assert_eq!(editor.mouse_pressed(), PickTarget::Gizmo(rose));
    editor.mouse_moved(Point2::new(360.0, 300.0), now);
    editor.mouse_released();

    let moved = editor.meshes().get(0).unwrap().origin();
    assert!(moved.x > 0.0);
    assert!(moved.y.abs() < 1e-4);
    assert_eq!(editor.meshes().get(1).unwrap().transform, Matrix4::identity());

    editor.wheel(1.0);
    let transform = editor.meshes().get(0).unwrap().transform;
    assert!((transform.x.truncate().magnitude() - 1.05).abs() < 1e-5);
    let origin = editor.meshes().get(0).unwrap().origin();
    assert!((origin.x - moved.x).abs() < 1e-5);
}

#[test]
fn test_press_on_nothing_selects_camera() {
    let mut editor = editor();
    editor.add("Rose").unwrap();
    let now = Instant::now();

    editor.mouse_moved(Point2::new(40.0, 40.0), now);
    assert_eq!(editor.mouse_pressed(), PickTarget::Camera);
    editor.mouse_released();

    let camera = editor.camera.modelview;
    editor.wheel(1.0);
    assert_ne!(editor.camera.modelview, camera);
    assert_eq!(editor.meshes().get(0).unwrap().transform, Matrix4::identity());
}

#[test]
fn test_list_twice_is_identical() {
    let mut editor = editor();
    editor.add("Rose").unwrap();
    editor.add("Cat").unwrap();
    let first = editor.meshes().list();
    editor.execute(Command::ListMeshes).unwrap();
    assert_eq!(editor.meshes().list(), first);
}
