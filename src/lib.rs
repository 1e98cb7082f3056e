//! Weekly training agenda for personal trainers.
//!
//! The recurrence engine resolves which students train on a calendar day
//! and which workout text applies. The schedule store holds the roster and
//! the registered entries in memory; thin layers around the pair persist
//! JSON snapshots, read configuration and drive the command line.

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use engine::{resolve_day, resolve_range, CalendarEvent, Occurrence};
pub use error::ScheduleError;
pub use models::{RepeatRule, Student, Weekday, WorkoutEntry};
pub use store::ScheduleStore;
