//! stayhub-core
//!
//! Onboarding wizard logic: step validation, draft persistence, submission
//! reconciliation and the gateway contracts the backend client implements.
//! Depends on stayhub-domain. No terminal I/O, no concrete HTTP or filesystem access.

pub mod autosave;
pub mod bookings;
pub mod draft_store;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod location;
pub mod reconcile;
pub mod steps;
pub mod validation;
pub mod wizard;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use autosave::DraftAutosaver;
pub use bookings::{bucket_bookings, BookingBuckets, BookingService};
pub use draft_store::{DraftKey, DraftStore, MemoryDraftStore, DEFAULT_DRAFT_PREFIX};
pub use error::CoreError;
pub use gateway::{BookingGateway, LocationGateway, MediaGateway, PropertyGateway, UploadFile};
pub use listing::ListingService;
pub use location::{GeolocationError, LocationProvider};
pub use reconcile::{Reconciler, SubmissionOutcome, SubmissionPlan, SubmissionProgress};
pub use steps::{steps_for, StepContext, StepKind, StepDefinition};
pub use validation::ValidationError;
pub use wizard::{Transition, WizardController, WizardMode, WizardSettings};
