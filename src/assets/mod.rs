//! Asset storage and loading.
//!
//! [`AssetServer`] owns the geometry/material pools referenced by mesh
//! components. Model decoding ([`gltf`]) runs out-of-band on a load thread
//! ([`load_task`]) and resolves into a scene-independent [`ModelPrefab`]
//! that the caller instantiates into a [`Scene`](crate::scene::Scene).

pub mod gltf;
pub mod load_task;

pub use self::gltf::{ModelPrefab, decode_prefab};
pub use load_task::{LoadState, LoadTask};

use slotmap::{SlotMap, new_key_type};

use crate::resources::geometry::Geometry;
use crate::resources::material::PhysicalMaterial;

// Strongly-typed handles
new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
}

/// Central storage for shared render resources.
///
/// Mesh components reference entries here by handle; the scene graph never
/// owns geometry or material data directly.
#[derive(Default)]
pub struct AssetServer {
    pub geometries: SlotMap<GeometryHandle, Geometry>,
    pub materials: SlotMap<MaterialHandle, PhysicalMaterial>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        self.geometries.insert(geometry)
    }

    #[must_use]
    pub fn get_geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(handle)
    }

    pub fn add_material(&mut self, material: PhysicalMaterial) -> MaterialHandle {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn get_material(&self, handle: MaterialHandle) -> Option<&PhysicalMaterial> {
        self.materials.get(handle)
    }
}
