use glam::Vec3;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DirectionalLight {}

#[derive(Debug, Clone)]
pub struct PointLight {
    /// Falloff distance; 0.0 means unbounded
    pub range: f32,
}

// High-level abstraction: light component in the scene
#[derive(Debug, Clone)]
pub enum LightKind {
    Directional(DirectionalLight),
    Point(PointLight),
}

#[derive(Debug, Clone)]
pub struct Light {
    pub uuid: Uuid,
    pub id: u64,
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,

    pub cast_shadows: bool,
}

impl Light {
    fn generate_id_from_uuid(uuid: &Uuid) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        uuid.hash(&mut hasher);
        hasher.finish()
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            id: Self::generate_id_from_uuid(&uuid),
            color,
            intensity: intensity.max(0.0),
            kind: LightKind::Directional(DirectionalLight {}),
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, range: f32) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            id: Self::generate_id_from_uuid(&uuid),
            color,
            intensity: intensity.max(0.0),
            kind: LightKind::Point(PointLight { range }),
            cast_shadows: false,
        }
    }

    /// Copies an RGB color onto the light. Any finite triple is accepted.
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }
}
