pub mod camera_controller;
pub mod fly_camera;
pub mod projection;

// Re-export main types
pub use camera_controller::CameraController;
pub use fly_camera::{CameraMovement, FlyCamera};
pub use projection::{projection_matrix, ProjectionMode, OPENGL_TO_WGPU_MATRIX};
