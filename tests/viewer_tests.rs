//! Viewer Integration Tests
//!
//! Drives the full viewer headlessly: stage setup, input intent routing,
//! the render frame chain, pass ordering and resize propagation.

use glam::Vec3;
use lume::app::input::{ButtonState, Key, MouseButton};
use lume::app::scheduler::{FrameScheduler, ManualScheduler};
use lume::render::backend::{HeadlessBackend, PassKind, RenderTrace};
use lume::scene::light::LightKind;
use lume::viewer::{Viewer, ViewerConfig};

const DT: f32 = 1.0 / 60.0;

fn headless_viewer() -> (Viewer, RenderTrace) {
    let backend = HeadlessBackend::new();
    let trace = backend.trace();
    let viewer = Viewer::new(&ViewerConfig::default(), Box::new(backend));
    (viewer, trace)
}

// ============================================================================
// Stage Setup
// ============================================================================

#[test]
fn stage_has_camera_ground_and_lights() {
    let (viewer, _) = headless_viewer();

    let camera = viewer.scene.main_camera().expect("active camera");
    assert_eq!(camera.world_position(), Vec3::new(0.0, 0.0, 5.0));
    assert!((camera.fov - 75.0_f32.to_radians()).abs() < 1e-6);

    // One directional sun, two point lights from the rig; all shadow casters
    let mut directional = 0;
    let mut point = 0;
    for (light, _) in viewer.scene.iter_active_lights() {
        match light.kind {
            LightKind::Directional(_) => {
                directional += 1;
                assert!((light.intensity - 5.0).abs() < 1e-6);
            }
            LightKind::Point(_) => point += 1,
        }
        assert!(light.cast_shadows, "every stage light casts shadows");
    }
    assert_eq!(directional, 1);
    assert_eq!(point, 2);

    // Ambient stage light is dark gray
    let ambient = viewer.scene.environment.ambient_color;
    assert!((ambient - Vec3::splat(64.0 / 255.0)).length() < 1e-6);
}

#[test]
fn light_indicators_start_at_light_positions() {
    let (viewer, _) = headless_viewer();
    let rig = viewer.light_rig();

    let light_pos = viewer.scene.get_node(rig.primary()).unwrap().transform.position;
    let indicator_pos = viewer
        .scene
        .get_node(rig.primary_indicator())
        .unwrap()
        .transform
        .position;
    assert_eq!(light_pos, indicator_pos);
    assert_eq!(light_pos, Vec3::new(1.0, 1.0, 2.0));

    let secondary = viewer.scene.get_node(rig.secondary()).unwrap().transform.position;
    assert_eq!(secondary, Vec3::new(0.0, 3.0, 0.0));
}

// ============================================================================
// Input Intent Routing
// ============================================================================

#[test]
fn key_r_toggles_auto_rotate() {
    let (mut viewer, _) = headless_viewer();
    assert!(!viewer.orbit().is_auto_rotating(), "starts in manual orbit");

    viewer.input_mut().inject_key(Key::R, ButtonState::Pressed);
    viewer.tick(DT);
    assert!(viewer.orbit().is_auto_rotating());

    // Held key does not retrigger
    viewer.tick(DT);
    assert!(viewer.orbit().is_auto_rotating());

    viewer.input_mut().inject_key(Key::R, ButtonState::Released);
    viewer.tick(DT);
    viewer.input_mut().inject_key(Key::R, ButtonState::Pressed);
    viewer.tick(DT);
    assert!(!viewer.orbit().is_auto_rotating());
}

#[test]
fn left_press_takes_manual_control() {
    let (mut viewer, _) = headless_viewer();
    viewer.orbit_mut().toggle_auto_rotate();
    assert!(viewer.orbit().is_auto_rotating());

    viewer
        .input_mut()
        .inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    viewer.tick(DT);
    assert!(!viewer.orbit().is_auto_rotating());
}

#[test]
fn wheel_zoom_stays_within_bounds() {
    let (mut viewer, _) = headless_viewer();

    for _ in 0..100 {
        viewer.input_mut().inject_scroll(0.0, 1.0);
        viewer.tick(DT);
    }
    assert!((viewer.orbit().radius() - 2.0).abs() < 1e-4);

    for _ in 0..100 {
        viewer.input_mut().inject_scroll(0.0, -1.0);
        viewer.tick(DT);
    }
    assert!((viewer.orbit().radius() - 20.0).abs() < 1e-4);

    // Camera distance follows the clamped radius
    let camera = viewer.scene.main_camera().unwrap();
    assert!((camera.world_position().length() - 20.0).abs() < 1e-3);
}

// ============================================================================
// Frame Chain & Pass Order
// ============================================================================

#[test]
fn each_rendered_frame_requests_the_next() {
    let (mut viewer, trace) = headless_viewer();
    let mut scheduler = ManualScheduler::new();

    for frame in 1..=5 {
        assert!(frame == 1 || scheduler.take_request());
        viewer.tick(DT);
        viewer.render(&mut scheduler);
        assert_eq!(scheduler.total_requested(), frame);
    }
    assert_eq!(trace.frames_drawn(), 5);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn bloom_runs_after_scene_pass_and_respects_toggle() {
    let (mut viewer, trace) = headless_viewer();
    let mut scheduler = ManualScheduler::new();

    viewer.tick(DT);
    viewer.render(&mut scheduler);
    assert_eq!(trace.last_frame(), vec![PassKind::Scene, PassKind::Bloom]);

    viewer.composer_mut().bloom_mut().enabled = false;
    viewer.tick(DT);
    viewer.render(&mut scheduler);
    assert_eq!(trace.last_frame(), vec![PassKind::Scene]);

    viewer.composer_mut().bloom_mut().enabled = true;
    viewer.tick(DT);
    viewer.render(&mut scheduler);
    assert_eq!(trace.last_frame(), vec![PassKind::Scene, PassKind::Bloom]);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_updates_surface_and_camera_in_lockstep() {
    let (mut viewer, trace) = headless_viewer();

    viewer.resize(1920, 1080);
    assert_eq!(viewer.composer().surface_size(), (1920, 1080));
    assert_eq!(trace.surface_size(), (1920, 1080));

    let camera = viewer.scene.main_camera().unwrap();
    assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    assert_eq!(viewer.input().screen_size, glam::Vec2::new(1920.0, 1080.0));
}

#[test]
fn zero_sized_resize_is_ignored_by_the_surface() {
    let (mut viewer, trace) = headless_viewer();
    let before = viewer.composer().surface_size();

    viewer.resize(0, 0);
    assert_eq!(viewer.composer().surface_size(), before);
    assert_eq!(trace.surface_size(), before);
}

// ============================================================================
// Scheduler
// ============================================================================

#[test]
fn manual_scheduler_counts_requests() {
    let mut scheduler = ManualScheduler::new();
    assert!(!scheduler.take_request());

    scheduler.request_frame();
    scheduler.request_frame();
    assert_eq!(scheduler.pending(), 2);
    assert!(scheduler.take_request());
    assert!(scheduler.take_request());
    assert!(!scheduler.take_request());
    assert_eq!(scheduler.total_requested(), 2);
}
