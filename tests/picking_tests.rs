//! Picking & Light Rig Integration Tests
//!
//! Screen-ray construction against the stage, ground hits below the horizon,
//! and the light/indicator pairing under pick-driven moves.

use glam::{Vec2, Vec3};
use lume::app::input::{ButtonState, MouseButton};
use lume::render::backend::HeadlessBackend;
use lume::scene::raycast::{self, Ray};
use lume::viewer::{Viewer, ViewerConfig};

const DT: f32 = 1.0 / 60.0;
const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

fn headless_viewer() -> Viewer {
    Viewer::new(
        &ViewerConfig::default(),
        Box::new(HeadlessBackend::new()),
    )
}

// ============================================================================
// Ray Picking
// ============================================================================

#[test]
fn ray_below_horizon_hits_the_ground() {
    let viewer = headless_viewer();
    let camera = viewer.scene.main_camera().unwrap();

    // Lower half of the screen: the ray tilts down onto the ground plane
    let ray = Ray::from_screen(
        Vec2::new(WIDTH / 2.0, HEIGHT - 20.0),
        Vec2::new(WIDTH, HEIGHT),
        camera,
    );
    let hit = raycast::pick(&viewer.scene, &viewer.assets, &ray).expect("ground hit");

    assert!((hit.point.y - (-1.0)).abs() < 1e-3);
    assert!(hit.distance > 0.0);
}

#[test]
fn ray_above_horizon_hits_nothing() {
    let viewer = headless_viewer();
    let camera = viewer.scene.main_camera().unwrap();

    let ray = Ray::from_screen(
        Vec2::new(WIDTH / 2.0, 10.0),
        Vec2::new(WIDTH, HEIGHT),
        camera,
    );
    assert!(raycast::pick(&viewer.scene, &viewer.assets, &ray).is_none());
}

#[test]
fn nearest_hit_wins() {
    let viewer = headless_viewer();

    // Straight at the primary light indicator sphere at (1, 1, 2)
    let ray = Ray::new(Vec3::new(1.0, 1.0, 5.0), -Vec3::Z);
    let hit = raycast::pick(&viewer.scene, &viewer.assets, &ray).expect("indicator hit");

    // Front surface of the r=0.2 sphere, not the ground far behind
    assert!((hit.point.z - 2.2).abs() < 0.05);
}

#[test]
fn invisible_meshes_are_not_pickable() {
    let mut viewer = headless_viewer();
    let indicator = viewer.light_rig().primary_indicator();
    viewer.scene.get_node_mut(indicator).unwrap().visible = false;

    let ray = Ray::new(Vec3::new(1.0, 1.0, 5.0), -Vec3::Z);
    let hit = raycast::pick(&viewer.scene, &viewer.assets, &ray);

    // The ray continues past the hidden indicator onto nothing (parallel to
    // the ground), so there is no hit at the sphere surface
    assert!(hit.is_none_or(|h| (h.point.z - 2.2).abs() > 0.05));
}

// ============================================================================
// Pick-Driven Light Placement
// ============================================================================

#[test]
fn right_click_moves_primary_light_to_surface_point() {
    let mut viewer = headless_viewer();
    let before = viewer
        .light_rig()
        .primary_position(&viewer.scene);

    viewer
        .input_mut()
        .inject_cursor_position(WIDTH / 2.0, HEIGHT - 20.0);
    viewer
        .input_mut()
        .inject_mouse_button(MouseButton::Right, ButtonState::Pressed);
    viewer.tick(DT);

    let after = viewer.light_rig().primary_position(&viewer.scene);
    assert_ne!(before, after);
    assert!((after.y - (-1.0)).abs() < 1e-3, "light sits on the ground");
}

#[test]
fn indicator_follows_light_in_the_same_frame() {
    let mut viewer = headless_viewer();

    viewer
        .input_mut()
        .inject_cursor_position(WIDTH / 2.0, HEIGHT - 50.0);
    viewer
        .input_mut()
        .inject_mouse_button(MouseButton::Right, ButtonState::Pressed);
    viewer.tick(DT);

    let rig = viewer.light_rig();
    let light = viewer.scene.get_node(rig.primary()).unwrap().transform.position;
    let indicator = viewer
        .scene
        .get_node(rig.primary_indicator())
        .unwrap()
        .transform
        .position;
    // Exact sync, no interpolation lag
    assert_eq!(light, indicator);
}

#[test]
fn right_click_into_the_sky_leaves_light_in_place() {
    let mut viewer = headless_viewer();
    let before = viewer.light_rig().primary_position(&viewer.scene);

    viewer
        .input_mut()
        .inject_cursor_position(WIDTH / 2.0, 10.0);
    viewer
        .input_mut()
        .inject_mouse_button(MouseButton::Right, ButtonState::Pressed);
    viewer.tick(DT);

    assert_eq!(viewer.light_rig().primary_position(&viewer.scene), before);
}

#[test]
fn primary_color_change_recolors_indicator() {
    let mut viewer = headless_viewer();
    let color = Vec3::new(0.2, 0.4, 1.0);
    viewer.set_primary_light_color(color);

    let rig = viewer.light_rig();
    let light = viewer.scene.get_light(rig.primary()).unwrap();
    assert_eq!(light.color, color);

    let mesh = viewer.scene.get_mesh(rig.primary_indicator()).unwrap();
    let material = viewer.assets.get_material(mesh.material).unwrap();
    assert_eq!(material.emissive, color);
    assert_eq!(material.base_color, color);
}
