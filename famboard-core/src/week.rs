//! Weekly aggregation: the Monday-to-Sunday window and per-day bucketing.

use chrono::{Datelike, Duration, Local, NaiveDate};
use futures::future::join_all;

use crate::error::FamBoardResult;
use crate::event::{CalendarEvent, DayEvents, MealEvent};
use crate::feed::{FeedClient, to_events, to_meals};
use crate::household::HouseholdStore;

/// The Monday-to-Sunday span containing a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The week containing `reference`. Weeks start on Monday.
    pub fn containing(reference: NaiveDate) -> Self {
        let start =
            reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
        WeekWindow { start }
    }

    /// Monday of this week.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday of this week.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    /// The seven days of the week, Monday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..7).map(move |i| start + Duration::days(i))
    }
}

/// Events whose start falls on `day`, ascending by start time.
///
/// Both bounds are inclusive: a start at 23:59:59.999 still belongs to
/// the day, one millisecond later does not.
pub fn events_for_day(events: &[CalendarEvent], day: NaiveDate) -> Vec<CalendarEvent> {
    let day_start = day.and_hms_opt(0, 0, 0).unwrap();
    let day_end = day.and_hms_milli_opt(23, 59, 59, 999).unwrap();

    let mut in_day: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event.start >= day_start && event.start <= day_end)
        .cloned()
        .collect();
    in_day.sort_by_key(|event| event.start);
    in_day
}

/// The meal planned for `day`, if any.
///
/// First match wins when a feed carries duplicates for the same day.
pub fn meal_for_day(meals: &[MealEvent], day: NaiveDate) -> Option<MealEvent> {
    meals.iter().find(|meal| meal.date == day).cloned()
}

/// Aggregates the configured household feeds into a weekly view.
pub struct WeekPlanner<S> {
    store: S,
    feeds: FeedClient,
}

impl<S: HouseholdStore> WeekPlanner<S> {
    pub fn new(store: S) -> Self {
        WeekPlanner {
            store,
            feeds: FeedClient::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build the seven-day view for the week containing `reference`
    /// (today's week when absent).
    ///
    /// Always yields exactly seven days in window order. Sources that
    /// fail to fetch or parse contribute nothing instead of failing the
    /// request; only a store read error propagates.
    pub async fn week(&self, reference: Option<NaiveDate>) -> FamBoardResult<Vec<DayEvents>> {
        let reference = reference.unwrap_or_else(|| Local::now().date_naive());
        let window = WeekWindow::containing(reference);

        let members = self.store.family_members()?;
        let meal_calendar = self.store.meal_calendar()?;

        // Fan out the member feeds; each fetch absorbs its own failure,
        // so one dead source cannot abort or skew its siblings.
        let fetches = members
            .iter()
            .filter(|member| member.active && !member.calendar_url.is_empty())
            .map(|member| async move {
                let feed = self.feeds.fetch(&member.calendar_url).await;
                to_events(&feed, &member.name, &member.color)
            });
        let all_events: Vec<CalendarEvent> =
            join_all(fetches).await.into_iter().flatten().collect();

        // The meal calendar is a single shared source, fetched once.
        let meals = match &meal_calendar {
            Some(cal) if cal.active && !cal.calendar_url.is_empty() => {
                to_meals(&self.feeds.fetch(&cal.calendar_url).await)
            }
            _ => Vec::new(),
        };

        Ok(window
            .days()
            .map(|day| {
                DayEvents::new(
                    day,
                    meal_for_day(&meals, day),
                    events_for_day(&all_events, day),
                )
            })
            .collect())
    }
}
