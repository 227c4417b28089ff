use cgmath::Matrix4;

use super::{
    loader::MeshLoader,
    mesh::{Mesh, MeshId},
};
use crate::error::{CollectionError, MeshError};

/// Ordered, owning list of meshes.
///
/// Insertion order is display and save order. Every mesh also carries a
/// [`MeshId`] that survives deletions of earlier entries; positions do not.
#[derive(Debug, Default)]
pub struct MeshCollection {
    meshes: Vec<Mesh>,
    next_id: u32,
}

impl MeshCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `name` through `loader` and appends it.
    ///
    /// On failure the collection is left untouched. Without an initial
    /// transform the mesh starts at the identity.
    pub fn add(
        &mut self,
        name: &str,
        transform: Option<Matrix4<f32>>,
        loader: &dyn MeshLoader,
    ) -> Result<MeshId, MeshError> {
        let loaded = loader.load(name)?;

        let id = MeshId(self.next_id);
        self.next_id += 1;

        let mut mesh = Mesh::new(id, name, loaded.geometry).with_texture(loaded.texture);
        if let Some(transform) = transform {
            mesh.transform = transform;
        }

        log::debug!(
            "added mesh {} '{}' ({} points, {} triangles)",
            id,
            name,
            mesh.geometry.vertex_count(),
            mesh.geometry.triangle_count()
        );
        self.meshes.push(mesh);
        Ok(id)
    }

    /// Removes the mesh at `index`, shifting later meshes down by one.
    pub fn remove(&mut self, index: usize) -> Result<Mesh, CollectionError> {
        if index >= self.meshes.len() {
            return Err(CollectionError::IndexOutOfBounds {
                index,
                len: self.meshes.len(),
            });
        }
        Ok(self.meshes.remove(index))
    }

    /// Position and name of every mesh, in insertion order
    pub fn list(&self) -> Vec<(usize, String)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| (i, mesh.name.clone()))
            .collect()
    }

    /// Releases all meshes. Ids keep counting up.
    pub fn clear(&mut self) {
        self.meshes.clear();
    }

    /// Takes over the meshes of `other`, renumbering them after the ids
    /// already handed out so ids stay unique for the process lifetime.
    pub fn replace(&mut self, other: MeshCollection) {
        self.clear();
        for mut mesh in other.meshes {
            mesh.id = MeshId(self.next_id);
            self.next_id += 1;
            self.meshes.push(mesh);
        }
    }

    pub fn get(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.meshes.get_mut(index)
    }

    /// Current position of the mesh with `id`
    pub fn position(&self, id: MeshId) -> Option<usize> {
        self.meshes.iter().position(|mesh| mesh.id == id)
    }

    pub fn find(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.iter().find(|mesh| mesh.id == id)
    }

    pub fn find_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|mesh| mesh.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mesh> {
        self.meshes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Mesh> {
        self.meshes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl<'a> IntoIterator for &'a MeshCollection {
    type Item = &'a Mesh;
    type IntoIter = std::slice::Iter<'a, Mesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.meshes.iter()
    }
}
