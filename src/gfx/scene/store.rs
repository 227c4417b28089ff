//! # Scene Files
//!
//! Plain-text persistence of the camera transform and the ordered list of
//! mesh names with their transforms:
//!
//! ```text
//! <16 floats: camera matrix>
//! <mesh name>
//! <16 floats: mesh transform>
//! ...
//! ```
//!
//! Matrices are written row by row (`[row][col]`, row varying slower) with six
//! decimals, the layout existing scene files use. cgmath stores matrices by
//! column, so the element at row `r`, column `c` is `m[c][r]`.

use cgmath::Matrix4;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::collection::MeshCollection;
use crate::error::SceneError;

/// One named mesh entry of a scene file
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRecord {
    pub name: String,
    pub transform: Matrix4<f32>,
}

impl SceneRecord {
    pub fn new(name: impl Into<String>, transform: Matrix4<f32>) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }
}

/// Fully parsed contents of a scene file
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFile {
    pub camera: Matrix4<f32>,
    pub meshes: Vec<SceneRecord>,
}

impl SceneFile {
    pub fn new(camera: Matrix4<f32>, meshes: Vec<SceneRecord>) -> Self {
        Self { camera, meshes }
    }

    /// Snapshot of the camera and every mesh in collection order
    pub fn capture(camera: Matrix4<f32>, meshes: &MeshCollection) -> Self {
        Self {
            camera,
            meshes: meshes
                .iter()
                .map(|mesh| SceneRecord::new(mesh.name.clone(), mesh.transform))
                .collect(),
        }
    }

    /// Reads and parses a scene file. Nothing is returned unless the whole
    /// file is well formed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Writes the scene to `path`, replacing any existing file.
    ///
    /// The scene goes to `<path>.tmp` first and is renamed over `path` once it
    /// is fully on disk. If anything fails, `path` is left as it was.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let temp_path = temp_path_for(path);

        let result = self.write_file(&temp_path).and_then(|()| fs::rename(&temp_path, path));
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result.map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path) -> io::Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        self.write(&mut writer)?;
        let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.sync_all()
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", format_matrix(&self.camera))?;
        for record in &self.meshes {
            writeln!(writer, "{}", record.name)?;
            writeln!(writer, "{}", format_matrix(&record.transform))?;
        }
        Ok(())
    }

    pub fn parse(text: &str) -> Result<Self, SceneError> {
        // `lines` strips both "\n" and "\r\n"
        let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

        let (line_no, camera_line) = lines.next().ok_or(SceneError::Empty)?;
        let camera = parse_matrix(camera_line, line_no)?;

        let mut meshes = Vec::new();
        while let Some((name_line_no, name)) = lines.next() {
            if name.trim().is_empty() {
                continue;
            }
            let (line_no, matrix_line) = lines.next().ok_or_else(|| SceneError::MissingMatrix {
                line: name_line_no,
                name: name.to_string(),
            })?;
            let transform = parse_matrix(matrix_line, line_no)?;
            meshes.push(SceneRecord::new(name, transform));
        }

        Ok(Self { camera, meshes })
    }
}

/// Sibling file a save is staged in, `<path>.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Formats a matrix as 16 space-separated `%f` values, row by row
pub fn format_matrix(m: &Matrix4<f32>) -> String {
    let mut values = Vec::with_capacity(16);
    for row in 0..4 {
        for col in 0..4 {
            values.push(format!("{:.6}", m[col][row]));
        }
    }
    values.join(" ")
}

/// Parses the first 16 numbers of a line, row by row. Tokens after the
/// sixteenth are ignored.
pub fn parse_matrix(line: &str, line_no: usize) -> Result<Matrix4<f32>, SceneError> {
    let mut values = [0.0f32; 16];
    let mut count = 0;

    for token in line.split_whitespace().take(16) {
        values[count] = token.parse().map_err(|_| SceneError::Format {
            line: line_no,
            message: format!("'{}' is not a number", token),
        })?;
        count += 1;
    }

    if count < 16 {
        return Err(SceneError::Format {
            line: line_no,
            message: format!("expected 16 numbers, found {}", count),
        });
    }

    let mut m = Matrix4::from([[0.0; 4]; 4]);
    for row in 0..4 {
        for col in 0..4 {
            m[col][row] = values[row * 4 + col];
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, SquareMatrix, Vector3};
    use rand::Rng;

    fn assert_close(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        for col in 0..4 {
            for row in 0..4 {
                let (x, y) = (a[col][row], b[col][row]);
                assert!(
                    (x - y).abs() <= 1e-5 * x.abs().max(1.0),
                    "element [{}][{}]: {} != {}",
                    row,
                    col,
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_matrix_is_written_row_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            format_matrix(&m),
            "1.000000 0.000000 0.000000 1.000000 \
             0.000000 1.000000 0.000000 2.000000 \
             0.000000 0.000000 1.000000 3.000000 \
             0.000000 0.000000 0.000000 1.000000"
        );
    }

    #[test]
    fn test_parse_places_translation_in_last_column() {
        let m = parse_matrix("1 0 0 5  0 1 0 6  0 0 1 7  0 0 0 1", 1).unwrap();
        assert_eq!(m.w.x, 5.0);
        assert_eq!(m.w.y, 6.0);
        assert_eq!(m.w.z, 7.0);
    }

    #[test]
    fn test_short_matrix_line_fails() {
        let err = parse_matrix("1 0 0 0 0 1 0 0 0 0 1 0 0 0 0", 3).unwrap_err();
        match err {
            SceneError::Format { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_token_fails() {
        assert!(parse_matrix("1 0 0 0 0 1 0 0 x 0 1 0 0 0 0 1", 1).is_err());
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        let m = parse_matrix("1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1 junk", 1).unwrap();
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_example_round_trip() {
        let camera = Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0))
            * Matrix4::from_angle_y(Deg(30.0));
        let cat = Matrix4::from_translation(Vector3::new(0.5, -0.25, 0.0))
            * Matrix4::from_scale(0.5);
        let scene = SceneFile::new(
            camera,
            vec![
                SceneRecord::new("Rose", Matrix4::identity()),
                SceneRecord::new("Cat", cat),
            ],
        );

        let mut text = Vec::new();
        scene.write(&mut text).unwrap();
        let parsed = SceneFile::parse(std::str::from_utf8(&text).unwrap()).unwrap();

        assert_close(&parsed.camera, &camera);
        assert_eq!(parsed.meshes.len(), 2);
        assert_eq!(parsed.meshes[0].name, "Rose");
        assert_eq!(parsed.meshes[0].transform, Matrix4::identity());
        assert_eq!(parsed.meshes[1].name, "Cat");
        assert_close(&parsed.meshes[1].transform, &cat);
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = rand::rng();
        for mesh_count in 0..6 {
            let mut random_matrix = || {
                let mut values = [[0.0f32; 4]; 4];
                for column in values.iter_mut() {
                    for value in column.iter_mut() {
                        *value = rng.random_range(-100.0..100.0);
                    }
                }
                Matrix4::from(values)
            };

            let camera = random_matrix();
            let meshes = (0..mesh_count)
                .map(|i| SceneRecord::new(format!("mesh{}", i), random_matrix()))
                .collect();
            let scene = SceneFile::new(camera, meshes);

            let mut text = Vec::new();
            scene.write(&mut text).unwrap();
            let parsed = SceneFile::parse(std::str::from_utf8(&text).unwrap()).unwrap();

            assert_close(&parsed.camera, &scene.camera);
            assert_eq!(parsed.meshes.len(), mesh_count);
            for (read, written) in parsed.meshes.iter().zip(&scene.meshes) {
                assert_eq!(read.name, written.name);
                assert_close(&read.transform, &written.transform);
            }
        }
    }

    #[test]
    fn test_crlf_names_are_stripped() {
        let identity = format_matrix(&Matrix4::identity());
        let text = format!("{identity}\r\nRose\r\n{identity}\r\n");
        let scene = SceneFile::parse(&text).unwrap();
        assert_eq!(scene.meshes[0].name, "Rose");
    }

    #[test]
    fn test_name_without_matrix_fails() {
        let identity = format_matrix(&Matrix4::identity());
        let text = format!("{identity}\nRose\n{identity}\nCat\n");
        match SceneFile::parse(&text) {
            Err(SceneError::MissingMatrix { line, name }) => {
                assert_eq!(line, 4);
                assert_eq!(name, "Cat");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_short_camera_line_fails_whole_parse() {
        let identity = format_matrix(&Matrix4::identity());
        let text = format!("1 0 0 0 0 1\nRose\n{identity}\n");
        assert!(matches!(
            SceneFile::parse(&text),
            Err(SceneError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_file_fails() {
        assert!(matches!(SceneFile::parse(""), Err(SceneError::Empty)));
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let scene = SceneFile::new(Matrix4::identity(), Vec::new());
        let path = std::env::temp_dir()
            .join("multimesh-no-such-dir")
            .join("nested")
            .join("Test.scene");
        assert!(matches!(scene.save(&path), Err(SceneError::Io { .. })));
    }

    #[test]
    fn test_failed_save_keeps_existing_file() {
        let path = std::env::temp_dir().join(format!(
            "multimesh_keep_{}.scene",
            std::process::id()
        ));
        let original = SceneFile::new(
            Matrix4::identity(),
            vec![SceneRecord::new("Rose", Matrix4::identity())],
        );
        original.save(&path).unwrap();
        let before = std::fs::read(&path).unwrap();

        // A directory in the way of the staging file makes the save fail
        let blocker = temp_path_for(&path);
        std::fs::create_dir_all(&blocker).unwrap();
        let bigger = SceneFile::new(
            Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0)),
            (0..400)
                .map(|i| SceneRecord::new(format!("mesh{}", i), Matrix4::identity()))
                .collect(),
        );
        assert!(matches!(bigger.save(&path), Err(SceneError::Io { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert!(blocker.is_dir());

        std::fs::remove_dir(&blocker).ok();
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_replaces_file_and_removes_staging_file() {
        let path = std::env::temp_dir().join(format!(
            "multimesh_replace_{}.scene",
            std::process::id()
        ));
        SceneFile::new(Matrix4::identity(), vec![SceneRecord::new("Rose", Matrix4::identity())])
            .save(&path)
            .unwrap();
        let camera = Matrix4::from_translation(Vector3::new(0.0, 0.0, -3.0));
        SceneFile::new(camera, Vec::new()).save(&path).unwrap();

        let loaded = SceneFile::load(&path).unwrap();
        assert_eq!(loaded.camera, camera);
        assert!(loaded.meshes.is_empty());
        assert!(!temp_path_for(&path).exists());

        std::fs::remove_file(&path).ok();
    }
}
