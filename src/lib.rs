#![doc(test(attr(deny(warnings))))]

//! StayHub partner onboarding: wires the wizard core to the JSON draft store,
//! the HTTP backend and the image pipeline, and hosts the `stayhub_cli` tool.

pub mod app;
pub mod cli;
pub mod errors;
pub mod uploads;
pub mod utils;

pub use app::App;
pub use errors::AppError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("StayHub tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
