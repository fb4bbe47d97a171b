//! Resource data layer: geometry, materials, meshes and post-process
//! settings. Everything here is pure CPU data; render backends consume it
//! through read-only references.

pub mod bloom;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;

pub use bloom::BloomSettings;
pub use geometry::{BoundingBox, Geometry};
pub use material::PhysicalMaterial;
pub use mesh::Mesh;
