use std::fs;
use std::path::{Path, PathBuf};

use stayhub_media::{compress_for_upload, ImageFile};

use crate::cli::output;
use crate::{App, AppError};

pub fn compress(app: &App, input: &Path, output_path: Option<&Path>) -> Result<(), AppError> {
    let file = ImageFile::from_path(input)?;
    let original_size = file.size();
    let settings = app.compression_settings();
    let result = compress_for_upload(file, &settings)?;
    let target = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, &result.content_type));
    fs::write(&target, &result.bytes)?;

    if result.size() == original_size && original_size < settings.threshold_bytes {
        output::info(format!(
            "{} is {} bytes, under the {} byte threshold; copied unchanged.",
            result.name, original_size, settings.threshold_bytes
        ));
    } else {
        output::success(format!(
            "Compressed {}: {} -> {} bytes",
            result.name,
            original_size,
            result.size()
        ));
    }
    output::info(format!("Wrote {}", target.display()));
    Ok(())
}

fn default_output(input: &Path, content_type: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");
    let ext = if content_type == "image/jpeg" {
        "jpg".to_string()
    } else {
        input
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("img")
            .to_string()
    };
    input.with_file_name(format!("{stem}-upload.{ext}"))
}
