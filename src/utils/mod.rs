// src/utils/mod.rs
pub mod geometry;
pub mod util;

pub use geometry::{BoundingBox, Plane, Point3D};
