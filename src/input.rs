//! Held-key input and the per-frame commands it drives.
//!
//! Keys act every frame while held, so light nudges and color ramps scale with
//! frame rate.

use std::collections::HashSet;

use cgmath::Vector3;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::gfx::{
    backend::RenderBackend,
    camera::{CameraMovement, FlyCamera, ProjectionMode},
    scene::Scene,
};

/// Filler light movement per frame while a nudge key is held.
pub const LIGHT_NUDGE: f32 = 0.05;
/// Key light channel increase per frame while a channel key is held.
pub const COLOR_STEP: f32 = 0.001;

const FILLER_LIGHT: usize = 0;
const KEY_LIGHT: usize = 1;

const MOVEMENT_KEYS: [(KeyCode, CameraMovement); 6] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
    (KeyCode::KeyE, CameraMovement::Up),
    (KeyCode::KeyQ, CameraMovement::Down),
];

/// Set of physical keys currently held down.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.press(code),
                ElementState::Released => self.release(code),
            }
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

/// Per-frame render settings toggled by input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    pub projection_mode: ProjectionMode,
    pub wireframe: bool,
    pub close_requested: bool,
    /// Seconds since the previous frame
    pub delta_time: f32,
}

/// Adds `step` to a color channel, wrapping to 0 once it goes past 1.
pub fn wrap_channel(value: f32, step: f32) -> f32 {
    let next = value + step;
    if next > 1.0 {
        0.0
    } else {
        next
    }
}

/// Applies every held key for one frame.
pub fn process_input<B: RenderBackend>(
    input: &InputState,
    delta_time: f32,
    camera: &mut FlyCamera,
    scene: &mut Scene<B>,
    frame: &mut FrameState,
) {
    frame.delta_time = delta_time;

    if input.is_pressed(KeyCode::Escape) {
        frame.close_requested = true;
    }

    if input.is_pressed(KeyCode::ArrowRight) {
        frame.wireframe = true;
    }
    if input.is_pressed(KeyCode::ArrowLeft) {
        frame.wireframe = false;
    }

    for (key, movement) in MOVEMENT_KEYS {
        if input.is_pressed(key) {
            camera.process_keyboard(movement, delta_time);
        }
    }

    if let Some(filler) = scene.get_light_mut(FILLER_LIGHT) {
        let mut position = filler.position();
        let mut nudge = |key: KeyCode, axis: &mut f32, delta: f32| {
            if input.is_pressed(key) {
                *axis += delta;
            }
        };
        nudge(KeyCode::KeyJ, &mut position.x, -LIGHT_NUDGE);
        nudge(KeyCode::KeyL, &mut position.x, LIGHT_NUDGE);
        nudge(KeyCode::KeyI, &mut position.z, -LIGHT_NUDGE);
        nudge(KeyCode::KeyK, &mut position.z, LIGHT_NUDGE);
        nudge(KeyCode::KeyU, &mut position.y, -LIGHT_NUDGE);
        nudge(KeyCode::KeyO, &mut position.y, LIGHT_NUDGE);
        filler.set_position(position);
    }

    if let Some(key_light) = scene.get_light_mut(KEY_LIGHT) {
        if let Some(mut color) = key_light.light_color() {
            if input.is_pressed(KeyCode::Digit1) {
                color.x = wrap_channel(color.x, COLOR_STEP);
            }
            if input.is_pressed(KeyCode::Digit2) {
                color.y = wrap_channel(color.y, COLOR_STEP);
            }
            if input.is_pressed(KeyCode::Digit3) {
                color.z = wrap_channel(color.z, COLOR_STEP);
            }
            if input.is_pressed(KeyCode::BracketLeft) {
                color = Vector3::new(0.0, 0.0, 0.0);
            }
            if input.is_pressed(KeyCode::BracketRight) {
                color = Vector3::new(0.0, 1.0, 0.0);
            }
            key_light.set_light_color(color);
        }
    }

    let previous_mode = frame.projection_mode;
    if input.is_pressed(KeyCode::KeyV) {
        frame.projection_mode = ProjectionMode::Perspective;
    }
    if input.is_pressed(KeyCode::KeyB) {
        frame.projection_mode = ProjectionMode::Orthographic;
    }
    if frame.projection_mode != previous_mode {
        log::debug!("Projection mode: {:?}", frame.projection_mode);
    }
}
