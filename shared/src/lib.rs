//! Shared types for the optics admin dashboard
//!
//! Row types and create/update payloads for every table the dashboard
//! touches, plus the display fallbacks used when a column is empty.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    AppointmentCreate, AppointmentRecord, AppointmentStatus, AppointmentUpdate,
    BlogPostCreate, EmailSubscription, PaymentStatus, Review, SubscriptionCreate,
};
