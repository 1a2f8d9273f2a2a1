//! Decoding of texture files into CPU-side pixel data.
//!
//! Images are flipped vertically after decoding so that row 0 is the bottom
//! of the picture, matching the cube's texture coordinates where `v = 0` is
//! the bottom edge of every face.

use std::{borrow::Cow, path::Path};

use crate::error::TextureError;

/// Decoded, vertically flipped 8-bit image with 3 or 4 channels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Returns the pixels as tightly packed RGBA8, expanding RGB with an
    /// opaque alpha channel. RGBA images are borrowed as-is.
    pub fn to_rgba8(&self) -> Cow<'_, [u8]> {
        match self.channels {
            4 => Cow::Borrowed(&self.pixels),
            _ => Cow::Owned(
                self.pixels
                    .chunks_exact(3)
                    .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], u8::MAX])
                    .collect(),
            ),
        }
    }
}

/// Loads the image at `path`, rejecting anything that is not RGB or RGBA.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureImage, TextureError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (image.width(), image.height());
    let channels = image.color().channel_count();
    let mut pixels = match channels {
        3 => image.into_rgb8().into_raw(),
        4 => image.into_rgba8().into_raw(),
        _ => {
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            })
        }
    };

    flip_rows_vertically(&mut pixels, width as usize, height as usize, channels as usize);
    log::debug!(
        "Loaded texture {} ({}x{}, {} channels)",
        path.display(),
        width,
        height,
        channels
    );

    Ok(TextureImage {
        width,
        height,
        channels,
        pixels,
    })
}

/// Swaps pixel rows top-to-bottom in place.
pub fn flip_rows_vertically(pixels: &mut [u8], width: usize, height: usize, channels: usize) {
    let row_len = width * channels;
    debug_assert!(pixels.len() >= row_len * height);

    for row in 0..height / 2 {
        let mirrored = height - 1 - row;
        let (upper, lower) = pixels.split_at_mut(mirrored * row_len);
        upper[row * row_len..(row + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
    }
}
