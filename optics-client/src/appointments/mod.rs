//! Appointment list: filter/sort engine, view state and edit form

pub mod filter;
pub mod form;
pub mod view;

pub use filter::{AppointmentFilter, DayTier, StatusFilter, filter_and_sort, parse_local_datetime};
pub use form::{EditForm, SERVICES, Service, TimeSlot, time_slots};
pub use view::{AppointmentView, Notice};
