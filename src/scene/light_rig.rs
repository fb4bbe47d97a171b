//! Stage lighting rig: a primary accent light the user can reposition by
//! picking a surface point, a fixed secondary fill light, and small emissive
//! indicator spheres that track the light positions.

use glam::Vec3;

use crate::assets::AssetServer;
use crate::resources::material::PhysicalMaterial;
use crate::resources::mesh::Mesh;
use crate::resources::primitives::{SphereOptions, create_sphere};
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::{NodeHandle, Scene};

/// Indicator sphere radius in world units.
const INDICATOR_RADIUS: f32 = 0.2;

/// Primary light defaults: white, repositionable.
const PRIMARY_COLOR: Vec3 = Vec3::ONE;
const PRIMARY_INTENSITY: f32 = 5.0;
const PRIMARY_POSITION: Vec3 = Vec3::new(1.0, 1.0, 2.0);

/// Secondary light defaults: golden fill, fixed.
const SECONDARY_COLOR: Vec3 = Vec3::new(1.0, 0.843, 0.0);
const SECONDARY_INTENSITY: f32 = 10.0;
const SECONDARY_POSITION: Vec3 = Vec3::new(0.0, 3.0, 0.0);
const SECONDARY_RANGE: f32 = 10.0;

/// The two point lights of the stage plus their indicator spheres.
///
/// Indicators are separate scene nodes; every operation that moves a light
/// moves its indicator in the same call, so the pair can never drift apart
/// across a frame.
pub struct LightRig {
    primary: NodeHandle,
    primary_indicator: NodeHandle,
    secondary: NodeHandle,
    secondary_indicator: NodeHandle,

    primary_indicator_material: crate::assets::MaterialHandle,
}

impl LightRig {
    /// Creates both lights and their indicators in the scene.
    pub fn setup(scene: &mut Scene, assets: &mut AssetServer) -> Self {
        let sphere = assets.add_geometry(create_sphere(&SphereOptions {
            radius: INDICATOR_RADIUS,
            ..SphereOptions::default()
        }));

        let mut primary_light = Light::new_point(PRIMARY_COLOR, PRIMARY_INTENSITY, 0.0);
        primary_light.cast_shadows = true;
        let primary = Self::spawn_light(scene, "PrimaryLight", primary_light, PRIMARY_POSITION);

        let mut secondary_light =
            Light::new_point(SECONDARY_COLOR, SECONDARY_INTENSITY, SECONDARY_RANGE);
        secondary_light.cast_shadows = true;
        let secondary =
            Self::spawn_light(scene, "SecondaryLight", secondary_light, SECONDARY_POSITION);

        let (primary_indicator, primary_indicator_material) = Self::spawn_indicator(
            scene,
            assets,
            "PrimaryLightIndicator",
            sphere,
            PRIMARY_COLOR,
            PRIMARY_POSITION,
        );
        let (secondary_indicator, _) = Self::spawn_indicator(
            scene,
            assets,
            "SecondaryLightIndicator",
            sphere,
            SECONDARY_COLOR,
            SECONDARY_POSITION,
        );

        Self {
            primary,
            primary_indicator,
            secondary,
            secondary_indicator,
            primary_indicator_material,
        }
    }

    fn spawn_light(scene: &mut Scene, name: &str, light: Light, position: Vec3) -> NodeHandle {
        let mut node = Node::new(name);
        node.transform.position = position;
        let handle = scene.add_node(node);
        scene.set_light(handle, light);
        handle
    }

    fn spawn_indicator(
        scene: &mut Scene,
        assets: &mut AssetServer,
        name: &str,
        sphere: crate::assets::GeometryHandle,
        color: Vec3,
        position: Vec3,
    ) -> (NodeHandle, crate::assets::MaterialHandle) {
        // Emissive-only look so the bloom pass picks the indicator up
        let material = assets.add_material(
            PhysicalMaterial::new(name)
                .with_base_color(color)
                .with_emissive(color),
        );

        let mut node = Node::new(name);
        node.transform.position = position;
        let handle = scene.add_node(node);
        scene.set_mesh(handle, Mesh::new(sphere, material).with_name(name));
        (handle, material)
    }

    #[inline]
    #[must_use]
    pub fn primary(&self) -> NodeHandle {
        self.primary
    }

    #[inline]
    #[must_use]
    pub fn secondary(&self) -> NodeHandle {
        self.secondary
    }

    #[inline]
    #[must_use]
    pub fn primary_indicator(&self) -> NodeHandle {
        self.primary_indicator
    }

    #[inline]
    #[must_use]
    pub fn secondary_indicator(&self) -> NodeHandle {
        self.secondary_indicator
    }

    /// Moves the primary light (and its indicator) to a world-space point.
    pub fn move_primary(&self, scene: &mut Scene, point: Vec3) {
        if let Some(node) = scene.get_node_mut(self.primary) {
            node.transform.position = point;
        }
        if let Some(node) = scene.get_node_mut(self.primary_indicator) {
            node.transform.position = point;
        }
    }

    /// Current primary light position (local == world, lights live at the root).
    #[must_use]
    pub fn primary_position(&self, scene: &Scene) -> Vec3 {
        scene
            .get_node(self.primary)
            .map_or(Vec3::ZERO, |n| n.transform.position)
    }

    /// Changes the primary light color, keeping the indicator emissive in sync.
    pub fn set_primary_color(&self, scene: &mut Scene, assets: &mut AssetServer, color: Vec3) {
        if let Some(light) = scene.get_light_mut(self.primary) {
            light.set_color(color);
        }
        if let Some(material) = assets.materials.get_mut(self.primary_indicator_material) {
            material.base_color = color;
            material.emissive = color;
        }
    }
}
