//! Drag-to-spin camera.
//!
//! The eye is fixed; dragging spins the world itself, so the whole field
//! (bacteria included) rotates in front of a stationary viewpoint. Pointer
//! deltas accumulate between frames and are applied then cleared exactly
//! once per frame by `update`.

use glam::{Mat4, Quat, Vec2, Vec3};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};

const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

pub struct CameraController {
    world_rotation: Quat,

    // Mouse state
    is_dragging: bool,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    accumulated_mouse_delta: Vec2,

    /// Radians of world rotation per pixel of drag.
    pub sensitivity: f32,
}

impl CameraController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            world_rotation: Quat::IDENTITY,
            is_dragging: false,
            last_mouse_pos: None,
            accumulated_mouse_delta: Vec2::ZERO,
            sensitivity,
        }
    }

    /// Left button starts and stops dragging.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.is_dragging = state == ElementState::Pressed;
            if !self.is_dragging {
                self.last_mouse_pos = None;
            }
        }
    }

    pub fn handle_mouse_move(&mut self, position: PhysicalPosition<f64>) {
        if self.is_dragging {
            if let Some(last_pos) = self.last_mouse_pos {
                self.accumulated_mouse_delta.x += (position.x - last_pos.x) as f32;
                self.accumulated_mouse_delta.y += (position.y - last_pos.y) as f32;
            }
            self.last_mouse_pos = Some(position);
        }
    }

    /// Apply the accumulated drag delta to the world rotation (call once
    /// per frame). Horizontal drag spins about Y, vertical about X, in
    /// screen space, i.e. the increments premultiply the current rotation.
    pub fn update(&mut self) {
        let delta = self.accumulated_mouse_delta;
        if delta != Vec2::ZERO {
            let pitch = Quat::from_rotation_x(self.sensitivity * delta.y);
            let yaw = Quat::from_rotation_y(self.sensitivity * delta.x);
            self.world_rotation = (yaw * pitch * self.world_rotation).normalize();
            self.accumulated_mouse_delta = Vec2::ZERO;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn world_rotation(&self) -> Quat {
        self.world_rotation
    }

    /// Combined model-view-projection for the current world rotation.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y);
        proj * view * Mat4::from_quat(self.world_rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    #[test]
    fn drag_accumulates_and_update_clears() {
        let mut camera = CameraController::new(0.01);
        camera.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        camera.handle_mouse_move(pos(100.0, 100.0));
        camera.handle_mouse_move(pos(110.0, 104.0));
        camera.handle_mouse_move(pos(115.0, 103.0));

        camera.update();
        let rotated = camera.world_rotation();
        assert!(rotated != Quat::IDENTITY);

        // No new input: a second update leaves the rotation alone.
        camera.update();
        assert_eq!(camera.world_rotation(), rotated);
    }

    #[test]
    fn movement_without_dragging_is_ignored() {
        let mut camera = CameraController::new(0.01);
        camera.handle_mouse_move(pos(10.0, 10.0));
        camera.handle_mouse_move(pos(300.0, 300.0));
        camera.update();
        assert_eq!(camera.world_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn release_forgets_the_anchor_point() {
        let mut camera = CameraController::new(0.01);
        camera.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        camera.handle_mouse_move(pos(0.0, 0.0));
        camera.handle_mouse_button(MouseButton::Left, ElementState::Released);

        // A new drag far away must not register the gap as movement.
        camera.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        camera.handle_mouse_move(pos(500.0, 500.0));
        camera.update();
        assert_eq!(camera.world_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn rotation_preserves_unit_length() {
        let mut camera = CameraController::new(0.01);
        camera.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        camera.handle_mouse_move(pos(0.0, 0.0));
        for i in 1..200 {
            camera.handle_mouse_move(pos(i as f64 * 3.0, i as f64 * 2.0));
            camera.update();
        }
        assert!((camera.world_rotation().length() - 1.0).abs() < 1e-4);
    }
}
