use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::{ImageFormat, Rgb, RgbImage};
use once_cell::sync::Lazy;
use stayhub::App;
use stayhub_core::testing::RecordingGateway;
use stayhub_storage_json::JsonDraftStore;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique StayHub home directory for one test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// An application rooted in a fresh home directory.
#[allow(dead_code)]
pub fn setup_app() -> App {
    App::with_base_dir(temp_home()).expect("create app for temp home")
}

/// A JSON draft store and a recording backend, isolated per test.
#[allow(dead_code)]
pub fn setup_offline() -> (Arc<JsonDraftStore>, Arc<RecordingGateway>) {
    let drafts = JsonDraftStore::new(temp_home().join("drafts")).expect("create json draft store");
    (Arc::new(drafts), Arc::new(RecordingGateway::new()))
}

/// Encodes a gradient PNG of the given size.
#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png fixture");
    bytes
}
