//! Week and day appointment grids for a clinic scheduler.
//!
//! The crate turns immutable snapshots of appointments, doctors and patients
//! into navigable grids and translates clicks on those grids into intents for
//! the booking and editing workflows that own the records.

pub mod config;
pub mod day_view;
pub mod details;
pub mod dispatcher;
pub mod error;
pub mod grid;
pub mod models;
pub mod navigator;
pub mod render;
pub mod resolver;
pub mod slots;
pub mod snapshot;
pub mod status_style;
pub mod week_view;

pub use config::GridConfig;
pub use dispatcher::{dispatch, CalendarEvents, Gesture, Intent, IntentLog};
pub use error::{CalendarError, Result};
pub use grid::{CalendarGrid, CurrentSlot, RenderInput};
pub use models::{Appointment, AppointmentStatus, AppointmentType, Doctor, Patient};
pub use navigator::{PeriodNavigator, ViewMode};
pub use resolver::{SlotKey, StatusCounts};
pub use slots::{generate_time_slots, TimeSlots};
pub use snapshot::ClinicSnapshot;
