use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Vector2, Vector3, Zero};
use image::RgbaImage;

use crate::error::MeshError;

/// Stable identity of a mesh.
///
/// Ids are handed out in load order and never reused, so an id stays valid
/// (or becomes dangling) across deletions while positions shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

impl std::fmt::Display for MeshId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Triangle geometry of a mesh, in object space
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    pub points: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
    pub triangles: Vec<[u32; 3]>,
}

impl MeshGeometry {
    /// Builds geometry from the flat arrays produced by OBJ loaders.
    ///
    /// Missing normals are computed from the faces and missing uvs default to zero.
    pub fn from_flat(
        positions: &[f32],
        normals: &[f32],
        tex_coords: &[f32],
        indices: &[u32],
    ) -> Result<Self, MeshError> {
        let points: Vec<Vector3<f32>> = positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();
        let triangles: Vec<[u32; 3]> = indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        let mut geometry = Self {
            normals: Vec::new(),
            uvs: Vec::new(),
            points,
            triangles,
        };
        geometry.validate()?;

        geometry.normals = if !normals.is_empty() && normals.len() == positions.len() {
            normals
                .chunks_exact(3)
                .map(|n| Vector3::new(n[0], n[1], n[2]))
                .collect()
        } else {
            geometry.calculate_face_normals()
        };

        geometry.uvs = if tex_coords.len() / 2 == geometry.points.len() {
            tex_coords
                .chunks_exact(2)
                .map(|uv| Vector2::new(uv[0], uv[1]))
                .collect()
        } else {
            vec![Vector2::zero(); geometry.points.len()]
        };

        Ok(geometry)
    }

    /// Checks that every triangle index refers to an existing point.
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.points.len();
        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= count) {
                return Err(MeshError::InvalidIndex {
                    triangle,
                    index,
                    count,
                });
            }
        }
        Ok(())
    }

    /// Averages the normals of the faces around each point
    pub fn calculate_face_normals(&self) -> Vec<Vector3<f32>> {
        let mut normals = vec![Vector3::zero(); self.points.len()];

        for &[i0, i1, i2] in &self.triangles {
            let v0 = self.points[i0 as usize];
            let v1 = self.points[i1 as usize];
            let v2 = self.points[i2 as usize];
            let face_normal = (v1 - v0).cross(v2 - v0);

            for index in [i0, i1, i2] {
                normals[index as usize] += face_normal;
            }
        }

        for normal in &mut normals {
            if normal.magnitude2() > 0.0 {
                *normal = normal.normalize();
            }
        }

        normals
    }

    /// Centers the points on the origin and scales them so the largest
    /// half-extent equals `scale`.
    pub fn normalize(&mut self, scale: f32) {
        let Some((min, max)) = self.bounds() else {
            return;
        };

        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;
        let largest = half.x.max(half.y).max(half.z);
        let factor = if largest > 0.0 { scale / largest } else { 1.0 };

        for point in &mut self.points {
            *point = (*point - center) * factor;
        }
    }

    /// Axis-aligned bounds of the points, `None` when empty
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first = *self.points.first()?;
        Some(self.points.iter().skip(1).fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }
}

/// A loaded mesh: geometry and texture plus its object-to-world transform.
///
/// Normals, uvs and the texture are kept for a mesh renderer; the editor
/// itself only reads the name and the transform.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: MeshId,
    /// Source name; the stem of `<name>.obj` and `<name>.tga`
    pub name: String,
    pub geometry: MeshGeometry,
    pub texture: Option<RgbaImage>,
    pub transform: Matrix4<f32>,
}

impl Mesh {
    /// Create a new mesh with identity transformation
    pub fn new(id: MeshId, name: impl Into<String>, geometry: MeshGeometry) -> Self {
        Self {
            id,
            name: name.into(),
            geometry,
            texture: None,
            transform: Matrix4::identity(),
        }
    }

    pub fn with_texture(mut self, texture: Option<RgbaImage>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    /// World-space position of the gizmo, the translation column of the transform
    pub fn origin(&self) -> Point3<f32> {
        transform_origin(&self.transform)
    }
}

/// Translation column of an affine transform as a point
pub fn transform_origin(transform: &Matrix4<f32>) -> Point3<f32> {
    Point3::new(transform.w.x, transform.w.y, transform.w.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshGeometry {
        MeshGeometry::from_flat(
            &[0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 4.0, 0.0, 0.0, 4.0, 0.0],
            &[],
            &[],
            &[0, 1, 2, 2, 3, 0],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_normals_are_computed() {
        let geometry = quad();
        assert_eq!(geometry.normals.len(), 4);
        for normal in &geometry.normals {
            assert!((*normal - Vector3::unit_z()).magnitude() < 1e-6);
        }
        assert_eq!(geometry.uvs, vec![Vector2::zero(); 4]);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let result = MeshGeometry::from_flat(&[0.0; 9], &[], &[], &[0, 1, 3]);
        match result {
            Err(MeshError::InvalidIndex {
                triangle,
                index,
                count,
            }) => {
                assert_eq!(triangle, 0);
                assert_eq!(index, 3);
                assert_eq!(count, 3);
            }
            other => panic!("expected InvalidIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_fits_largest_extent() {
        let mut geometry = quad();
        geometry.normalize(0.8);

        let (min, max) = geometry.bounds().unwrap();
        assert!((max.y - 0.8).abs() < 1e-6);
        assert!((min.y + 0.8).abs() < 1e-6);
        assert!((max.x - 0.4).abs() < 1e-6);
        assert!((min.x + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_origin_is_translation_column() {
        let mesh = Mesh::new(MeshId(0), "Rose", quad())
            .with_transform(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(mesh.origin(), Point3::new(1.0, 2.0, 3.0));
    }
}
