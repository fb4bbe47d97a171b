use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use crate::app::input::{Input, MouseButton};
use crate::scene::transform::Transform;

/// Default orbit distance and the hard zoom bounds.
pub const DEFAULT_RADIUS: f32 = 5.0;
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 20.0;

/// Spherical-coordinate orbit rig around a fixed target.
///
/// Two modes: auto-rotate slowly spins the camera around the target; any
/// left-button drag switches to manual orbiting until auto-rotate is toggled
/// back on. The rig starts in manual mode. The clamped radius is the single
/// source of truth for camera distance; wheel input only ever moves it
/// inside `[MIN_RADIUS, MAX_RADIUS]`.
pub struct OrbitRig {
    pub rotate_speed: f32,
    /// World units of orbit distance per wheel line
    pub zoom_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    /// Revolutions-per-minute style factor, matching the usual orbit-control
    /// convention of `2π / 60 * speed` radians per second.
    pub auto_rotate_speed: f32,

    pub center: Vec3,
    radius: f32,
    pub theta: f32,
    pub phi: f32,

    auto_rotate: bool,
    rotate_delta: Vec2,
}

impl OrbitRig {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 0.35,
            zoom_speed: 1.0,
            damping_factor: 0.25,
            enable_damping: true,
            min_distance: MIN_RADIUS,
            max_distance: MAX_RADIUS,
            auto_rotate_speed: 2.0,

            center,
            radius: radius.clamp(MIN_RADIUS, MAX_RADIUS),
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,

            auto_rotate: false,
            rotate_delta: Vec2::ZERO,
        }
    }

    /// Current orbit distance (always within the clamp bounds).
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Manual interaction takes over; auto-rotate stays off until toggled.
    pub fn stop_auto_rotate(&mut self) {
        self.auto_rotate = false;
    }

    /// Applies a wheel step. Positive `scroll_y` zooms in.
    ///
    /// Linear clamp: the resulting radius never leaves the zoom bounds, no
    /// matter how large a single delta or a burst of deltas is.
    pub fn handle_wheel(&mut self, scroll_y: f32) {
        if scroll_y == 0.0 {
            return;
        }
        self.radius = (self.radius - scroll_y * self.zoom_speed)
            .clamp(self.min_distance, self.max_distance);
    }

    /// Directly sets the orbit distance, clamped to the zoom bounds.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(self.min_distance, self.max_distance);
    }

    /// Per-frame update: consumes input deltas, advances the spherical
    /// angles (with damping), and writes position + orientation into the
    /// camera node's transform.
    pub fn update(&mut self, transform: &mut Transform, input: &Input, dt: f32) {
        let screen_height = input.screen_size.y.max(1.0);

        if input.is_button_pressed(MouseButton::Left) {
            // Any left drag forces manual mode
            self.auto_rotate = false;

            let rotate_per_pixel = 2.0 * PI / screen_height;
            let cursor_delta = input.cursor_delta();
            self.rotate_delta.x -= cursor_delta.x * rotate_per_pixel * self.rotate_speed;
            self.rotate_delta.y -= cursor_delta.y * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            // Frame-rate independent exponential decay calibrated to 60 fps
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);

            let delta_apply = self.rotate_delta * (1.0 - retention);
            self.theta += delta_apply.x;
            self.phi += delta_apply.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        if self.auto_rotate {
            self.theta += (2.0 * PI / 60.0) * self.auto_rotate_speed * dt;
        }

        const EPS: f32 = 0.0001;
        self.phi = self.phi.clamp(EPS, PI - EPS);

        self.handle_wheel(input.scroll_delta().y);

        let sin_phi = self.phi.sin();
        let cos_phi = self.phi.cos();
        let sin_theta = self.theta.sin();
        let cos_theta = self.theta.cos();

        let offset = Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        );

        transform.position = self.center + offset;
        transform.look_at(self.center, Vec3::Y);
    }
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::new(Vec3::ZERO, DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::ButtonState;

    const DT: f32 = 1.0 / 60.0;

    fn sized_input() -> Input {
        let mut input = Input::new();
        input.inject_resize(800, 600);
        input
    }

    #[test]
    fn wheel_zoom_clamps_to_bounds() {
        let mut rig = OrbitRig::default();

        for _ in 0..200 {
            rig.handle_wheel(1.0);
        }
        assert!((rig.radius() - MIN_RADIUS).abs() < 1e-5);

        for _ in 0..200 {
            rig.handle_wheel(-1.0);
        }
        assert!((rig.radius() - MAX_RADIUS).abs() < 1e-5);

        rig.set_radius(1000.0);
        assert!((rig.radius() - MAX_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn camera_distance_follows_radius() {
        let mut rig = OrbitRig::default();
        rig.stop_auto_rotate();
        let mut transform = Transform::new();
        let input = sized_input();

        rig.update(&mut transform, &input, DT);
        assert!((transform.position.distance(rig.center) - rig.radius()).abs() < 1e-4);

        rig.set_radius(12.0);
        rig.update(&mut transform, &input, DT);
        assert!((transform.position.distance(rig.center) - 12.0).abs() < 1e-4);
    }

    #[test]
    fn auto_rotate_advances_theta() {
        let mut rig = OrbitRig::default();
        assert!(!rig.is_auto_rotating(), "starts in manual mode");
        rig.toggle_auto_rotate();

        let mut transform = Transform::new();
        let input = sized_input();
        let before = rig.theta;
        rig.update(&mut transform, &input, DT);
        assert!(rig.theta > before);
    }

    #[test]
    fn left_drag_forces_manual_mode() {
        let mut rig = OrbitRig::default();
        rig.toggle_auto_rotate();
        assert!(rig.is_auto_rotating());
        let mut transform = Transform::new();

        let mut input = sized_input();
        input.inject_cursor_position(400.0, 300.0);
        input.start_frame();
        input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
        input.inject_cursor_position(420.0, 300.0);

        rig.update(&mut transform, &input, DT);
        assert!(!rig.is_auto_rotating());

        // 放开后保持手动，直到再次切换
        input.start_frame();
        input.inject_mouse_button(MouseButton::Left, ButtonState::Released);
        rig.update(&mut transform, &input, DT);
        assert!(!rig.is_auto_rotating());

        rig.toggle_auto_rotate();
        assert!(rig.is_auto_rotating());
    }

    #[test]
    fn damping_converges_after_release() {
        let mut rig = OrbitRig::default();
        rig.stop_auto_rotate();
        let mut transform = Transform::new();

        let mut input = sized_input();
        input.inject_cursor_position(400.0, 300.0);
        input.start_frame();
        input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
        input.inject_cursor_position(500.0, 300.0);
        rig.update(&mut transform, &input, DT);

        input.start_frame();
        input.inject_mouse_button(MouseButton::Left, ButtonState::Released);

        // 拖拽动量随帧衰减，最终停在一个稳定角度
        let mut last_theta = rig.theta;
        let mut moved_after_release = false;
        for _ in 0..240 {
            input.start_frame();
            rig.update(&mut transform, &input, DT);
            if (rig.theta - last_theta).abs() > 1e-6 {
                moved_after_release = true;
            }
            last_theta = rig.theta;
        }
        assert!(moved_after_release, "damping keeps motion going briefly");

        let settled = rig.theta;
        for _ in 0..10 {
            input.start_frame();
            rig.update(&mut transform, &input, DT);
        }
        assert!((rig.theta - settled).abs() < 1e-4, "motion dies out");
    }
}
