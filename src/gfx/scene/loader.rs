//! # Mesh Loading
//!
//! Geometry and texture loading sits behind the [`MeshLoader`] trait so the
//! collection and the editor never touch the file system directly.
//!
//! - [`ObjLoader`] resolves a mesh name to `<directory>/<name>.obj` for the
//!   geometry and `<directory>/<name>.tga` for the texture.
//! - [`PrimitiveLoader`] builds procedural shapes by name (`cube`, `sphere`).

use image::RgbaImage;
use std::path::{Path, PathBuf};

use super::mesh::MeshGeometry;
use crate::error::MeshError;
use crate::gfx::geometry::{generate_cube, generate_sphere};

/// Largest half-extent of loaded geometry after normalization
pub const NORMALIZED_EXTENT: f32 = 0.8;

/// Geometry and optional texture produced by a loader
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub geometry: MeshGeometry,
    pub texture: Option<RgbaImage>,
}

/// Source of mesh data for a mesh name
pub trait MeshLoader {
    /// Loads the mesh called `name`.
    ///
    /// A missing texture is not an error; a missing or unreadable geometry is.
    fn load(&self, name: &str) -> Result<LoadedMesh, MeshError>;
}

/// Loads `<name>.obj` with tobj and `<name>.tga` with image
#[derive(Debug, Clone)]
pub struct ObjLoader {
    directory: PathBuf,
}

impl ObjLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn geometry_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.obj", name))
    }

    pub fn texture_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.tga", name))
    }

    fn load_geometry(&self, path: &Path) -> Result<MeshGeometry, MeshError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| MeshError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        // Merge all models of the file into one geometry
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();
        let mut indices = Vec::new();
        let mut normals_complete = true;
        let mut uvs_complete = true;

        for model in &models {
            let mesh = &model.mesh;
            let base = (positions.len() / 3) as u32;

            normals_complete &= mesh.normals.len() == mesh.positions.len();
            uvs_complete &= mesh.texcoords.len() / 2 == mesh.positions.len() / 3;

            positions.extend_from_slice(&mesh.positions);
            normals.extend_from_slice(&mesh.normals);
            tex_coords.extend_from_slice(&mesh.texcoords);
            indices.extend(mesh.indices.iter().map(|i| i + base));
        }

        if positions.is_empty() || indices.is_empty() {
            return Err(MeshError::NoGeometry(path.to_path_buf()));
        }
        if !normals_complete {
            normals.clear();
        }
        if !uvs_complete {
            tex_coords.clear();
        }

        let mut geometry = MeshGeometry::from_flat(&positions, &normals, &tex_coords, &indices)?;
        geometry.normalize(NORMALIZED_EXTENT);
        Ok(geometry)
    }

    fn load_texture(&self, path: &Path) -> Option<RgbaImage> {
        match image::open(path) {
            Ok(texture) => Some(texture.to_rgba8()),
            Err(err) => {
                log::warn!("can't read texture {}: {}", path.display(), err);
                None
            }
        }
    }
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self::new("./")
    }
}

impl MeshLoader for ObjLoader {
    fn load(&self, name: &str) -> Result<LoadedMesh, MeshError> {
        let geometry = self.load_geometry(&self.geometry_path(name))?;
        let texture = self.load_texture(&self.texture_path(name));
        Ok(LoadedMesh { geometry, texture })
    }
}

/// Builds procedural primitives by name; any other name fails to load
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveLoader;

impl MeshLoader for PrimitiveLoader {
    fn load(&self, name: &str) -> Result<LoadedMesh, MeshError> {
        let mut geometry = match name {
            "cube" => generate_cube(),
            "sphere" => generate_sphere(24, 12),
            _ => return Err(MeshError::NoGeometry(PathBuf::from(name))),
        };
        geometry.normalize(NORMALIZED_EXTENT);
        Ok(LoadedMesh {
            geometry,
            texture: None,
        })
    }
}
