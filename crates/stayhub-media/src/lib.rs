//! stayhub-media
//!
//! Pre-upload image compression. Files above the size threshold are decoded,
//! shrunk to fit the bounding box and re-encoded as JPEG.

pub mod compress;
pub mod error;
pub mod file;

pub use compress::{compress_for_upload, compress_many, fit_within, CompressionSettings};
pub use error::MediaError;
pub use file::ImageFile;
