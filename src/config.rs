//! Application configuration.
//!
//! Defaults describe the demo scene window and camera. The asset directory can
//! be redirected with the `PHONG_SCENE_ASSET_DIR` environment variable.

use std::path::PathBuf;

use cgmath::{Point3, Vector3};

/// Environment variable overriding [`AppConfig::asset_dir`].
pub const ASSET_DIR_ENV: &str = "PHONG_SCENE_ASSET_DIR";

/// Starting pose and tuning of the fly camera.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    pub world_up: Vector3<f32>,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(-5.0, 4.0, -0.3),
            world_up: Vector3::unit_y(),
            yaw: 10.0,
            pitch: -30.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub clear_color: [f64; 4],
    /// Directory texture file names are resolved against.
    pub asset_dir: PathBuf,
    pub camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Module 6 Assignment: Lighting a 3D Scene".to_string(),
            window_width: 1920,
            window_height: 1080,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            asset_dir: PathBuf::from("textures"),
            camera: CameraConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, with the asset directory taken from the environment if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(ASSET_DIR_ENV) {
            config.asset_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_constants() {
        let config = AppConfig::default();
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 1080);
        assert_eq!(config.asset_dir, PathBuf::from("textures"));
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.camera.position, Point3::new(-5.0, 4.0, -0.3));
        assert_eq!(config.camera.yaw, 10.0);
        assert_eq!(config.camera.pitch, -30.0);
    }

    #[test]
    fn asset_dir_builder_overrides_default() {
        let config = AppConfig::default().with_asset_dir("/tmp/assets");
        assert_eq!(config.asset_dir, PathBuf::from("/tmp/assets"));
    }
}
