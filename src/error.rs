//! Error types for the rendering and asset layers.
//!
//! Startup failures (adapter, device, surface, shader programs) are surfaced as
//! [`RenderError`] and abort the application. Texture problems are surfaced as
//! [`TextureError`] and are logged by the caller, which keeps going without the
//! texture.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the GPU side of the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The window surface could not be created.
    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No adapter compatible with the surface was found.
    #[error("no compatible graphics adapter: {0}")]
    Adapter(String),

    /// The adapter refused to hand out a device.
    #[error("failed to request a device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// A shader module or the pipeline built from it failed validation.
    #[error("shader program '{label}' failed to build: {details}")]
    Shader { label: String, details: String },

    /// A texture upload failed validation, typically because the image
    /// exceeds the device's size limits.
    #[error("failed to upload '{label}': {details}")]
    Upload { label: String, details: String },

    /// The surface ran out of memory while acquiring a frame.
    #[error("surface ran out of memory")]
    OutOfMemory,
}

/// Failures while turning an image file into texture data.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The file is missing or could not be decoded.
    #[error("failed to load texture '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Only RGB and RGBA images can be uploaded.
    #[error("not implemented to handle an image with {channels} channels: '{}'", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_channels_message_names_count_and_path() {
        let err = TextureError::UnsupportedChannels {
            path: PathBuf::from("textures/gray.png"),
            channels: 1,
        };
        let message = err.to_string();
        assert!(message.contains("1 channels"));
        assert!(message.contains("textures/gray.png"));
    }

    #[test]
    fn shader_error_message_names_program() {
        let err = RenderError::Shader {
            label: "Light Shader".to_string(),
            details: "entry point missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "shader program 'Light Shader' failed to build: entry point missing"
        );
    }
}
