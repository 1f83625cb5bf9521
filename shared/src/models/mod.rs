//! Data models
//!
//! One module per backend table. Row types mirror the table columns
//! (snake_case, matching the wire format); `*Create` types are insert
//! payloads without server-assigned columns.

pub mod appointment;
pub mod blog;
pub mod review;
pub mod subscription;

// Re-exports
pub use appointment::*;
pub use blog::*;
pub use review::*;
pub use subscription::*;
