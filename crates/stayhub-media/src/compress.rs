use std::io::Cursor;

use chrono::Utc;
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, GenericImageView};
use tracing::{debug, warn};

use crate::{ImageFile, MediaError};

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSettings {
    pub threshold_bytes: u64,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            threshold_bytes: 9_961_472,
            max_width: 1920,
            max_height: 1920,
            quality: 80,
        }
    }
}

/// Largest size within `max_width` x `max_height` that keeps the aspect ratio.
/// Images already inside the box are left as they are.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let (w, h) = (width as f64, height as f64);
    let width_bound = w / h >= max_width as f64 / max_height as f64;
    if width_bound {
        let scaled = (h * max_width as f64 / w).round() as u32;
        (max_width, scaled.max(1))
    } else {
        let scaled = (w * max_height as f64 / h).round() as u32;
        (scaled.max(1), max_height)
    }
}

/// Returns `file` untouched when it is strictly smaller than the threshold,
/// otherwise a resized JPEG with the same name.
pub fn compress_for_upload(
    file: ImageFile,
    settings: &CompressionSettings,
) -> Result<ImageFile, MediaError> {
    if file.size() < settings.threshold_bytes {
        return Ok(file);
    }
    let decoded = image::load_from_memory(&file.bytes).map_err(|source| MediaError::Decode {
        name: file.name.clone(),
        source,
    })?;
    let (width, height) = decoded.dimensions();
    let (target_w, target_h) = fit_within(width, height, settings.max_width, settings.max_height);
    let resized = if (target_w, target_h) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_w, target_h, FilterType::Lanczos3)
    };

    let rgb = resized.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, settings.quality.clamp(1, 100))
        .encode_image(&rgb)
        .map_err(|source| MediaError::Encode {
            name: file.name.clone(),
            source,
        })?;
    let bytes = out.into_inner();
    if bytes.is_empty() {
        return Err(MediaError::EmptyOutput { name: file.name });
    }
    debug!(
        name = %file.name,
        from = file.bytes.len(),
        to = bytes.len(),
        width = target_w,
        height = target_h,
        "image compressed"
    );
    Ok(ImageFile {
        name: file.name,
        content_type: JPEG_CONTENT_TYPE.to_string(),
        bytes,
        last_modified: Utc::now(),
    })
}

/// Compresses every file on the blocking pool, preserving input order.
pub async fn compress_many(
    files: Vec<ImageFile>,
    settings: CompressionSettings,
) -> Vec<Result<ImageFile, MediaError>> {
    let mut handles = Vec::with_capacity(files.len());
    for file in files {
        let name = file.name.clone();
        let handle = tokio::task::spawn_blocking(move || compress_for_upload(file, &settings));
        handles.push((name, handle));
    }
    let mut results = Vec::with_capacity(handles.len());
    for (name, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(err) => {
                warn!(name = %name, error = %err, "compression task failed");
                Err(MediaError::Interrupted { name })
            }
        };
        results.push(result);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_images_are_width_bound() {
        assert_eq!(fit_within(4000, 3000, 1920, 1920), (1920, 1440));
        assert_eq!(fit_within(3000, 1001, 1920, 1920), (1920, 641));
    }

    #[test]
    fn tall_images_are_height_bound() {
        assert_eq!(fit_within(3000, 4000, 1920, 1920), (1440, 1920));
    }

    #[test]
    fn small_images_are_not_enlarged() {
        assert_eq!(fit_within(800, 600, 1920, 1920), (800, 600));
    }
}
