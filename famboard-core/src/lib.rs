//! Core logic for famboard: turning a household's calendar feeds into a
//! seven-day weekly view.
//!
//! - `event` holds the typed records produced per request
//! - `ics` parses feed bodies into a tolerant intermediate form
//! - `feed` retrieves feeds over HTTP and normalizes them
//! - `household` reads the family/meal-calendar configuration
//! - `week` computes the Monday-to-Sunday window and buckets per day

pub mod error;
pub mod event;
pub mod feed;
pub mod household;
pub mod ics;
pub mod week;

// Re-export the request-facing types at crate root for convenience
pub use error::{FamBoardError, FamBoardResult};
pub use event::{CalendarEvent, DayEvents, MealEvent};
pub use week::{WeekPlanner, WeekWindow};
