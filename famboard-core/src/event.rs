//! Request-facing event types.
//!
//! These are the typed results of feed normalization: family calendar
//! events, meal-plan entries, and the per-day buckets of the weekly view.
//! All of them are assembled fresh per request and never persisted.
//!
//! Instants are local wall-clock values; feed times carrying an explicit
//! zone are converted to the local zone at parse time.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single event from a family member's calendar feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Feed-provided UID, or a generated best-effort fallback.
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    /// Expected (not enforced) to be at or after `start`. Feeds that omit
    /// an end time get `start + 1 hour`.
    pub end: NaiveDateTime,
    pub description: String,
    pub location: String,
    /// Name of the family member whose feed produced this event.
    pub owner: String,
    /// Display color of that family member.
    pub owner_color: String,
}

/// A meal-plan entry, attributed to a calendar day rather than a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEvent {
    pub id: String,
    pub title: String,
    /// The calendar day the meal is planned for.
    pub date: NaiveDate,
}

/// One day of the weekly view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEvents {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub day_of_month: u32,
    pub month: String,
    /// At most one meal per day; the first feed match wins.
    pub meal: Option<MealEvent>,
    /// Events starting on this day, ascending by start time.
    pub events: Vec<CalendarEvent>,
}

impl DayEvents {
    /// Assemble a day record, deriving the display fields from `date`
    /// using the local calendar.
    pub fn new(date: NaiveDate, meal: Option<MealEvent>, events: Vec<CalendarEvent>) -> Self {
        DayEvents {
            date,
            day_of_week: date.format("%A").to_string(),
            day_of_month: date.day(),
            month: date.format("%B").to_string(),
            meal,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_display_fields_derive_from_date() {
        let day = DayEvents::new(
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            None,
            Vec::new(),
        );

        assert_eq!(day.day_of_week, "Wednesday");
        assert_eq!(day.day_of_month, 4);
        assert_eq!(day.month, "June");
    }
}
