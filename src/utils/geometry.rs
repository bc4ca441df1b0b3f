// src/utils/geometry.rs
// Geometry helpers shared by the input records and the emitters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// A plane in `normal . p = dist` form, exactly as the level file stores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Point3D,
    pub dist: f32,
}

impl Plane {
    pub fn new(normal: Point3D, dist: f32) -> Self {
        Plane { normal, dist }
    }
}

/// Axis-aligned bounds. A freshly created box is inverted (mins above maxs)
/// so that the first `expand_point` snaps it onto that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub mins: Point3D,
    pub maxs: Point3D,
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::new_empty()
    }
}

impl BoundingBox {
    pub fn new_empty() -> Self {
        BoundingBox {
            mins: Point3D::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            maxs: Point3D::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn new(mins: Point3D, maxs: Point3D) -> Self {
        BoundingBox { mins, maxs }
    }

    pub fn expand_point(&mut self, p: Point3D) {
        self.mins.x = self.mins.x.min(p.x);
        self.mins.y = self.mins.y.min(p.y);
        self.mins.z = self.mins.z.min(p.z);
        self.maxs.x = self.maxs.x.max(p.x);
        self.maxs.y = self.maxs.y.max(p.y);
        self.maxs.z = self.maxs.z.max(p.z);
    }

    pub fn combine(&mut self, other: &BoundingBox) {
        if !other.is_valid() {
            return;
        }
        self.expand_point(other.mins);
        self.expand_point(other.maxs);
    }

    /// True once at least one point has been added.
    pub fn is_valid(&self) -> bool {
        self.mins.x <= self.maxs.x && self.mins.y <= self.maxs.y && self.mins.z <= self.maxs.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_empty_box_is_invalid() {
        let bounds = BoundingBox::new_empty();
        assert!(!bounds.is_valid());
    }

    #[test]
    fn test_expand_point() {
        let mut bounds = BoundingBox::new_empty();
        bounds.expand_point(Point3D::new(1.0, -2.0, 3.0));
        assert!(bounds.is_valid());
        bounds.expand_point(Point3D::new(-4.0, 5.0, 0.5));
        assert_approx_eq!(bounds.mins.x, -4.0);
        assert_approx_eq!(bounds.mins.y, -2.0);
        assert_approx_eq!(bounds.mins.z, 0.5);
        assert_approx_eq!(bounds.maxs.x, 1.0);
        assert_approx_eq!(bounds.maxs.y, 5.0);
        assert_approx_eq!(bounds.maxs.z, 3.0);
    }

    #[test]
    fn test_combine_ignores_empty() {
        let mut bounds = BoundingBox::new(Point3D::new(0.0, 0.0, 0.0), Point3D::new(8.0, 8.0, 8.0));
        bounds.combine(&BoundingBox::new_empty());
        assert_eq!(bounds.maxs, Point3D::new(8.0, 8.0, 8.0));
        assert_eq!(bounds.mins, Point3D::new(0.0, 0.0, 0.0));
    }
}
