//! Compress, upload and attach images picked for a wizard slot.

use stayhub_core::{CoreError, MediaGateway, UploadFile, WizardController};
use stayhub_domain::ImageSlot;
use stayhub_media::{compress_many, CompressionSettings, ImageFile};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub name: String,
    pub message: String,
}

/// What happened to each picked file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub attached: Vec<String>,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Files that fail to compress are reported and skipped; the rest are
/// uploaded in one request and their URLs attached to `slot`.
pub async fn upload_to_slot(
    wizard: &mut WizardController,
    slot: ImageSlot,
    files: Vec<ImageFile>,
    settings: CompressionSettings,
    media: &dyn MediaGateway,
) -> Result<UploadReport, CoreError> {
    let mut report = UploadReport::default();
    let mut ready: Vec<UploadFile> = Vec::new();
    for result in compress_many(files, settings).await {
        match result {
            Ok(file) => ready.push(file.into()),
            Err(err) => {
                warn!(name = err.file_name(), error = %err, "skipping image");
                report.failures.push(UploadFailure {
                    name: err.file_name().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }
    if ready.is_empty() {
        return Ok(report);
    }

    let count = ready.len();
    let urls = media.upload_images(ready).await?;
    wizard.attach_images(slot, urls.clone())?;
    info!(?slot, count, "images attached");
    report.attached = urls;
    Ok(report)
}
