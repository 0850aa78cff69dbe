//! Axis-aligned bounding boxes for model fitting and overlay placement

use cgmath::{ElementWise, Vector3};

/// Axis-aligned bounding box
///
/// An empty box has `min > max` on every axis, so expanding it by any point
/// yields that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// The empty box
    pub fn empty() -> Self {
        Self::new(
            Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            Vector3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        )
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let mut aabb = Self::empty();
        for vertex in vertices {
            aabb.expand_by_point(Vector3::new(vertex[0], vertex[1], vertex[2]));
        }
        aabb
    }

    /// True when the box encloses nothing
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand_by_point(&mut self, p: Vector3<f32>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Grow to enclose `other`; empty boxes are ignored
    pub fn union(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.expand_by_point(other.min);
        self.expand_by_point(other.max);
    }

    /// Edge lengths, zero for an empty box
    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::new(0.0, 0.0, 0.0);
        }
        self.max - self.min
    }

    /// Center point, origin for an empty box
    pub fn center(&self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::new(0.0, 0.0, 0.0);
        }
        (self.min + self.max) * 0.5
    }

    /// Box after applying `scale` then `translation`
    ///
    /// Negative scale components swap the corners so the result stays valid.
    pub fn scaled_and_translated(&self, scale: Vector3<f32>, translation: Vector3<f32>) -> Self {
        if self.is_empty() {
            return *self;
        }
        let a = self.min.mul_element_wise(scale) + translation;
        let b = self.max.mul_element_wise(scale) + translation;
        Self::new(
            Vector3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            Vector3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = Aabb::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.size(), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(aabb.center(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_box() {
        let aabb = Aabb::from_vertices(&[]);
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), Vector3::new(0.0, 0.0, 0.0));

        let mut grown = Aabb::empty();
        grown.union(&aabb);
        assert!(grown.is_empty());
    }

    #[test]
    fn test_union() {
        let mut a = Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vector3::new(2.0, -1.0, 0.5), Vector3::new(3.0, 0.0, 0.7));
        a.union(&b);
        assert_eq!(a.min, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(a.max, Vector3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn test_scaled_and_translated() {
        let aabb = Aabb::new(Vector3::new(-1.0, 0.0, -2.0), Vector3::new(1.0, 4.0, 2.0));
        let moved = aabb.scaled_and_translated(Vector3::new(2.0, 0.5, -1.0), Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(moved.min, Vector3::new(-1.0, 1.0, -2.0));
        assert_eq!(moved.max, Vector3::new(3.0, 3.0, 2.0));
    }
}
