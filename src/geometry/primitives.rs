//! # Primitive Mesh Generation
//!
//! Explicit meshes for surfaces that behaviors animate, plus smooth normal
//! computation for those meshes after their points move.

use super::SurfaceMesh;

/// Generate a plane in the local XY plane with its normal along +Z
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Returns a plane centered at the origin. A node rotated -90° about X lays
/// it flat on the ground with local Z pointing up.
pub fn generate_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> SurfaceMesh {
    let mut data = SurfaceMesh::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let v = y as f32 / h_segs as f32;
        let pos_y = (v - 0.5) * height;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([u, v]);
        }
    }

    // Counter-clockwise when viewed from +Z
    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.push(i);
            data.indices.push(i + 1);
            data.indices.push(next_row);

            data.indices.push(next_row);
            data.indices.push(i + 1);
            data.indices.push(next_row + 1);
        }
    }

    data
}

/// Smooth per-vertex normals for an indexed triangle list
///
/// Face normals are accumulated unnormalized, so larger triangles weigh more,
/// then each vertex normal is normalized. Vertices not referenced by any
/// triangle keep a zero normal.
pub fn compute_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        let v0 = positions[i0];
        let v1 = positions[i1];
        let v2 = positions[i2];

        let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

        let face_normal = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];

        for &vertex_idx in &[i0, i1, i2] {
            normals[vertex_idx][0] += face_normal[0];
            normals[vertex_idx][1] += face_normal[1];
            normals[vertex_idx][2] += face_normal[2];
        }
    }

    for normal in &mut normals {
        let length = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
        if length > 0.0 {
            normal[0] /= length;
            normal[1] /= length;
            normal[2] /= length;
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_eq!(plane.triangle_count(), 8);
        assert_eq!(plane.vertices[0], [-1.0, -1.0, 0.0]);
        assert_eq!(plane.vertices[8], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_plane_clamps_segments() {
        let plane = generate_plane(1.0, 1.0, 0, 0);
        assert_eq!(plane.vertex_count(), 4);
    }

    #[test]
    fn test_flat_plane_normals_point_up() {
        let plane = generate_plane(4.0, 4.0, 3, 3);
        let normals = compute_vertex_normals(&plane.vertices, &plane.indices);
        for n in normals {
            assert!((n[2] - 1.0).abs() < 1e-6, "normal {n:?}");
        }
    }

    #[test]
    fn test_tilted_normals_are_unit_length() {
        let mut plane = generate_plane(4.0, 4.0, 4, 4);
        for v in &mut plane.vertices {
            v[2] = v[0] * 0.5;
        }
        plane.recompute_normals();
        assert_eq!(plane.normals_revision, 1);
        for n in &plane.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
            assert!(n[0] < 0.0);
        }
    }
}
