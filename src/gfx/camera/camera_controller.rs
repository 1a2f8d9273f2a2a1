use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::fly_camera::FlyCamera;

/// Turns mouse motion and wheel events into fly camera look and zoom.
///
/// Look is driven by raw `MouseMotion` deltas, which keep arriving while the
/// cursor is grabbed. Absolute cursor positions are only a fallback for
/// platforms that never report raw motion; the first sample seeds the last
/// position so the camera does not jump.
pub struct CameraController {
    last_position: PhysicalPosition<f64>,
    first_mouse: bool,
    relative_motion: bool,
}

impl CameraController {
    /// Seeds the last cursor position with the window centre.
    pub fn new(window_size: PhysicalSize<u32>) -> Self {
        Self {
            last_position: PhysicalPosition::new(
                window_size.width as f64 / 2.0,
                window_size.height as f64 / 2.0,
            ),
            first_mouse: true,
            relative_motion: false,
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut FlyCamera) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if !self.relative_motion {
                log::debug!("Using raw mouse motion for camera look");
                self.relative_motion = true;
            }
            let (x_offset, y_offset) = motion_offsets(*delta);
            camera.process_mouse_movement(x_offset, y_offset);
        }
    }

    pub fn uses_relative_motion(&self) -> bool {
        self.relative_motion
    }

    pub fn process_events(&mut self, event: &WindowEvent, camera: &mut FlyCamera) {
        match event {
            WindowEvent::CursorMoved { position, .. } if !self.relative_motion => {
                let (x_offset, y_offset) = self.cursor_offsets(*position);
                camera.process_mouse_movement(x_offset, y_offset);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32,
                };
                camera.process_mouse_scroll(scroll);
            }
            WindowEvent::MouseInput { state, button, .. } => log_mouse_button(*button, *state),
            _ => (),
        }
    }

    /// Offsets since the last cursor sample, with y reversed since window
    /// coordinates grow downwards.
    pub fn cursor_offsets(&mut self, position: PhysicalPosition<f64>) -> (f32, f32) {
        if self.first_mouse {
            self.last_position = position;
            self.first_mouse = false;
        }

        let x_offset = position.x - self.last_position.x;
        let y_offset = self.last_position.y - position.y;
        self.last_position = position;

        (x_offset as f32, y_offset as f32)
    }
}

/// Raw motion delta as look offsets, y reversed since device y grows
/// downwards.
fn motion_offsets(delta: (f64, f64)) -> (f32, f32) {
    (delta.0 as f32, -delta.1 as f32)
}

fn log_mouse_button(button: MouseButton, state: ElementState) {
    let name = match button {
        MouseButton::Left => "Left",
        MouseButton::Middle => "Middle",
        MouseButton::Right => "Right",
        _ => {
            log::info!("Unhandled mouse button event");
            return;
        }
    };
    match state {
        ElementState::Pressed => log::info!("{name} Mouse Button Pressed"),
        ElementState::Released => log::info!("{name} Mouse Button Released"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(PhysicalSize::new(800, 600))
    }

    #[test]
    fn first_sample_produces_no_offset() {
        let mut controller = controller();
        assert_eq!(controller.cursor_offsets(PhysicalPosition::new(10.0, 500.0)), (0.0, 0.0));
    }

    #[test]
    fn offsets_reverse_y() {
        let mut controller = controller();
        controller.cursor_offsets(PhysicalPosition::new(100.0, 100.0));
        assert_eq!(
            controller.cursor_offsets(PhysicalPosition::new(110.0, 90.0)),
            (10.0, 10.0)
        );
        assert_eq!(
            controller.cursor_offsets(PhysicalPosition::new(105.0, 95.0)),
            (-5.0, -5.0)
        );
    }

    #[test]
    fn moving_cursor_turns_camera() {
        let mut controller = controller();
        let mut camera = FlyCamera::default();
        controller.cursor_offsets(PhysicalPosition::new(0.0, 0.0));
        let yaw = camera.yaw;

        let (dx, dy) = controller.cursor_offsets(PhysicalPosition::new(50.0, 0.0));
        camera.process_mouse_movement(dx, dy);
        assert!((camera.yaw - (yaw + 5.0)).abs() < 1e-5);
    }

    fn cursor_at(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            // SAFETY: the id is only compared, never passed to the platform
            device_id: unsafe { winit::event::DeviceId::dummy() },
            position: PhysicalPosition::new(x, y),
        }
    }

    fn motion(dx: f64, dy: f64) -> DeviceEvent {
        DeviceEvent::MouseMotion { delta: (dx, dy) }
    }

    #[test]
    fn raw_motion_keeps_turning_past_window_edge() {
        let mut controller = controller();
        let mut camera = FlyCamera::default();
        let yaw = camera.yaw;

        // a confined cursor would stop at the edge; raw deltas do not
        for _ in 0..100 {
            controller.process_device_event(&motion(50.0, 0.0), &mut camera);
        }
        assert!((camera.yaw - (yaw + 500.0)).abs() < 1e-2);
        assert!(controller.uses_relative_motion());
    }

    #[test]
    fn raw_motion_reverses_y() {
        let mut controller = controller();
        let mut camera = FlyCamera::default();
        let pitch = camera.pitch;
        controller.process_device_event(&motion(0.0, 20.0), &mut camera);
        assert!((camera.pitch - (pitch - 2.0)).abs() < 1e-5);
    }

    #[test]
    fn cursor_positions_ignored_once_raw_motion_arrives() {
        let mut controller = controller();
        let mut camera = FlyCamera::default();
        controller.process_device_event(&motion(0.0, 0.0), &mut camera);
        let yaw = camera.yaw;

        controller.process_events(&cursor_at(0.0, 0.0), &mut camera);
        controller.process_events(&cursor_at(300.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, yaw);
    }

    #[test]
    fn cursor_positions_drive_look_without_raw_motion() {
        let mut controller = controller();
        let mut camera = FlyCamera::default();
        let yaw = camera.yaw;

        controller.process_events(&cursor_at(0.0, 0.0), &mut camera);
        controller.process_events(&cursor_at(30.0, 0.0), &mut camera);
        assert!((camera.yaw - (yaw + 3.0)).abs() < 1e-5);
    }
}
