//! stayhub-domain
//!
//! Pure domain models for partner onboarding (property drafts, inventory, bookings).
//! No I/O, no network, no storage. Only data types and core enums.

pub mod booking;
pub mod category;
pub mod common;
pub mod draft;
pub mod inventory;
pub mod remote;
pub mod session;

pub use booking::*;
pub use category::*;
pub use common::*;
pub use draft::*;
pub use inventory::*;
pub use remote::*;
pub use session::*;
