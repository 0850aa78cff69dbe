//! # Geometry
//!
//! Two kinds of geometry live on scene nodes:
//!
//! - [`Primitive`]: a declarative shape (box, cylinder, cone, ...) that the host
//!   tessellates itself. Builders such as the stair flight only emit these.
//! - [`SurfaceMesh`]: an explicit point buffer that behaviors read and write
//!   every frame, e.g. the animated water plane.
//!
//! ## Usage
//!
//! ```rust
//! use isle_fx::geometry::generate_plane;
//!
//! // A 10x10 plane with 4 subdivisions, lying in the local XY plane
//! let plane = generate_plane(10.0, 10.0, 4, 4);
//! assert_eq!(plane.vertex_count(), 25);
//! ```

pub mod primitives;

pub use primitives::*;

/// Declarative shape resolved by the host renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        segments_radial: u32,
    },
    Cone {
        radius_bottom: f32,
        radius_top: f32,
        height: f32,
        segments_radial: u32,
    },
    Plane {
        width: f32,
        height: f32,
        segments_width: u32,
        segments_height: u32,
    },
    Dodecahedron {
        radius: f32,
    },
}

/// Mesh point data shared with the host
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    /// Vertex positions (x, y, z) in the mesh's local frame
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    /// Set when `vertices` changed and must be re-uploaded
    pub positions_dirty: bool,
    /// Incremented every time normals are recomputed
    pub normals_revision: u64,
}

impl SurfaceMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute smooth vertex normals from the current positions
    pub fn recompute_normals(&mut self) {
        self.normals = compute_vertex_normals(&self.vertices, &self.indices);
        self.normals_revision += 1;
    }
}
