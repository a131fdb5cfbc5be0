// SPDX-License-Identifier: MPL-2.0

//! Per-frame decode, rescale, and color quantization.

use std::path::PathBuf;

use image::{ImageReader, Rgb, RgbImage, imageops::FilterType};

use crate::catalog::FrameAsset;

/// Why a single frame could not be turned into a pixel grid.
///
/// Render failures are per-frame and recoverable; the playback driver logs
/// them and skips the asset for the current pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decode `asset` and stretch it to exactly `width` x `height`.
///
/// The image is resampled at 16 bits per channel and then quantized down to
/// the panel's 8-bit range by integer division: a 16-bit sample V maps to
/// V / 257, so 0 stays 0 and 65535 becomes 255. No aspect ratio preservation,
/// cropping, or letterboxing is applied.
pub fn render(asset: &FrameAsset, width: u32, height: u32) -> Result<RgbImage, RenderError> {
    let reader = ImageReader::open(asset.path()).map_err(|source| RenderError::Open {
        path: asset.path().to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| RenderError::Decode {
        path: asset.path().to_path_buf(),
        source,
    })?;

    let stretched = image::imageops::resize(
        &decoded.into_rgb16(),
        width,
        height,
        FilterType::Lanczos3,
    );

    let mut grid = RgbImage::new(width, height);
    for (dest, src) in grid.pixels_mut().zip(stretched.pixels()) {
        let Rgb([r, g, b]) = *src;
        *dest = Rgb([
            quantize_channel(r),
            quantize_channel(g),
            quantize_channel(b),
        ]);
    }

    Ok(grid)
}

/// Map a 16-bit channel sample onto the 8-bit output range.
fn quantize_channel(sample: u16) -> u8 {
    (sample / 257) as u8
}
