use cgmath::{InnerSpace, Matrix4, Point3, Vector3};

use crate::config::CameraConfig;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;
const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First-person camera driven by yaw/pitch angles in degrees.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
    pub world_up: Vector3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
}

impl FlyCamera {
    pub fn new(position: Point3<f32>, world_up: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: -Vector3::unit_z(),
            up: world_up,
            right: Vector3::unit_x(),
            world_up,
            yaw,
            pitch,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: MAX_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position, config.world_up, config.yaw, config.pitch);
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let offset = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.up,
            CameraMovement::Down => -self.up,
        };
        self.position += offset * velocity;
    }

    /// Offsets are in screen pixels, y positive upwards.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn level_camera() -> FlyCamera {
        FlyCamera::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_y(), -90.0, 0.0)
    }

    #[test]
    fn yaw_minus_ninety_looks_down_negative_z() {
        let camera = level_camera();
        assert!((camera.front - Vector3::new(0.0, 0.0, -1.0)).magnitude() < EPS);
        assert!((camera.right - Vector3::unit_x()).magnitude() < EPS);
        assert!((camera.up - Vector3::unit_y()).magnitude() < EPS);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = level_camera();
        camera.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(camera.pitch, 89.0);
        camera.process_mouse_movement(0.0, -100_000.0);
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn keyboard_moves_by_speed_times_dt() {
        let mut camera = level_camera();
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        assert!((camera.position - Point3::new(0.0, 0.0, -1.25)).magnitude() < EPS);

        camera.process_keyboard(CameraMovement::Right, 1.0);
        camera.process_keyboard(CameraMovement::Up, 1.0);
        assert!((camera.position - Point3::new(2.5, 2.5, -1.25)).magnitude() < EPS);
    }

    #[test]
    fn scroll_zoom_is_bounded() {
        let mut camera = level_camera();
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom, 35.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn default_uses_start_pose() {
        let camera = FlyCamera::default();
        assert_eq!(camera.position, Point3::new(-5.0, 4.0, -0.3));
        assert_eq!(camera.yaw, 10.0);
        assert_eq!(camera.pitch, -30.0);
        assert_eq!(camera.zoom, 45.0);
        // looking down at the scene
        assert!(camera.front.y < 0.0);
    }
}
