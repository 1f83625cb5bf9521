//! Optics Client - backend access and screen logic for the admin dashboard
//!
//! Talks to the hosted backend (auth, table REST, object storage) and holds
//! the state behind each dashboard screen.

pub mod appointments;
pub mod auth;
pub mod blog;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod reviews;
pub mod storage;
pub mod store;
pub mod subscriptions;
pub mod table;
pub mod validation;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, MutationAction, ViewError};
pub use http::HttpClient;
pub use table::TableClient;

pub use auth::{AuthGate, AuthUser, Session};
pub use storage::StorageClient;
pub use store::{AppointmentService, MemoryStore, RecordStore};

// Screens
pub use appointments::{AppointmentFilter, AppointmentView, StatusFilter};
pub use blog::{BlogDraft, BlogPublisher, ImageUpload, PublishError};
pub use reviews::ReviewList;
pub use subscriptions::{SubscribeError, SubscriptionList};

// Re-export shared types for convenience
pub use shared::models::{AppointmentRecord, AppointmentStatus, AppointmentUpdate, PaymentStatus};
