use glam::Vec3;
use uuid::Uuid;

/// Physically-based surface description.
///
/// Pure data; a render backend maps these parameters onto its own shading
/// model. Parameter ranges follow the usual metallic-roughness conventions.
#[derive(Debug, Clone)]
pub struct PhysicalMaterial {
    pub uuid: Uuid,
    pub name: String,

    /// Linear-space base color
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    /// Specular reflectivity at normal incidence scale
    pub reflectivity: f32,
    /// Clearcoat layer intensity
    pub clearcoat: f32,
    /// Linear-space emissive color
    pub emissive: Vec3,
}

impl PhysicalMaterial {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            base_color: Vec3::ONE,
            roughness: 1.0,
            metalness: 0.0,
            reflectivity: 0.5,
            clearcoat: 0.0,
            emissive: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn with_base_color(mut self, color: Vec3) -> Self {
        self.base_color = color;
        self
    }

    #[must_use]
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_clearcoat(mut self, clearcoat: f32) -> Self {
        self.clearcoat = clearcoat.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }
}

impl Default for PhysicalMaterial {
    fn default() -> Self {
        Self::new("Material")
    }
}
