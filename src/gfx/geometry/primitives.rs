//! # Primitive Shape Generation
//!
//! All shapes are generated with outward normals and texture coordinates.

use cgmath::{Vector2, Vector3};
use std::f32::consts::PI;

use crate::gfx::scene::mesh::MeshGeometry;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has its own four vertices so normals stay flat.
pub fn generate_cube() -> MeshGeometry {
    #[rustfmt::skip]
    let positions: [[f32; 3]; 24] = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    #[rustfmt::skip]
    let tex_coords: [[f32; 2]; 24] = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals = [
        Vector3::unit_z(),
        -Vector3::unit_z(),
        -Vector3::unit_x(),
        Vector3::unit_x(),
        Vector3::unit_y(),
        -Vector3::unit_y(),
    ];

    let mut geometry = MeshGeometry::default();
    for (face, normal) in face_normals.iter().enumerate() {
        let base = (face * 4) as u32;
        for corner in 0..4 {
            let p = positions[face * 4 + corner];
            let uv = tex_coords[face * 4 + corner];
            geometry.points.push(Vector3::new(p[0], p[1], p[2]));
            geometry.normals.push(*normal);
            geometry.uvs.push(Vector2::new(uv[0], uv[1]));
        }
        // Two counter-clockwise triangles per face
        geometry.triangles.push([base, base + 1, base + 2]);
        geometry.triangles.push([base + 2, base + 3, base]);
    }

    geometry
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> MeshGeometry {
    let mut geometry = MeshGeometry::default();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let point = Vector3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            geometry.points.push(point);
            // Normal equals position on a unit sphere
            geometry.normals.push(point);
            geometry.uvs.push(Vector2::new(
                long as f32 / long_segs as f32,
                lat as f32 / lat_segs as f32,
            ));
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            geometry.triangles.push([first, second, first + 1]);
            geometry.triangles.push([second, second + 1, first + 1]);
        }
    }

    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 4);
        assert_eq!(sphere.vertex_count(), 9 * 5);
        assert_eq!(sphere.triangle_count(), 8 * 4 * 2);
        assert!(sphere.validate().is_ok());
        for point in &sphere.points {
            assert!((point.magnitude() - 1.0).abs() < 1e-5);
        }
    }
}
