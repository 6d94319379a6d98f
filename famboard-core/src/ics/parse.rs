//! Feed parsing using the icalendar crate's parser.

use chrono::{Local, NaiveDateTime, TimeZone};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{FamBoardError, FamBoardResult};

/// A parsed feed: every component of the VCALENDAR, in feed order.
///
/// Feed order is preserved all the way through normalization, so the
/// events produced from a feed come out in the order the feed listed them.
#[derive(Debug, Default)]
pub struct Feed {
    pub components: Vec<FeedComponent>,
}

/// One feed component, tagged by kind.
#[derive(Debug)]
pub enum FeedComponent {
    /// A VEVENT record.
    Event(FeedEvent),
    /// Any other component kind (VTODO, VTIMEZONE, ...), kept by name only.
    Other(String),
}

/// Raw VEVENT fields, before presence checks and default-filling.
///
/// Every field is optional here; which combinations qualify as an event
/// or a meal is decided by the normalization layer, not the parser.
#[derive(Debug, Default)]
pub struct FeedEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Parse an ICS body into its component list.
pub fn parse_feed(content: &str) -> FamBoardResult<Feed> {
    let unfolded = unfold(content);
    let calendar =
        read_calendar(&unfolded).map_err(|e| FamBoardError::IcsParse(e.to_string()))?;

    let components = calendar
        .components
        .iter()
        .map(|component| {
            if component.name == "VEVENT" {
                FeedComponent::Event(parse_event(component))
            } else {
                FeedComponent::Other(component.name.to_string())
            }
        })
        .collect();

    Ok(Feed { components })
}

fn parse_event(vevent: &Component) -> FeedEvent {
    FeedEvent {
        uid: vevent.find_prop("UID").map(|p| p.val.to_string()),
        summary: vevent.find_prop("SUMMARY").map(|p| p.val.to_string()),
        start: vevent
            .find_prop("DTSTART")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_local_naive),
        end: vevent
            .find_prop("DTEND")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_local_naive),
        description: vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string()),
        location: vevent.find_prop("LOCATION").map(|p| p.val.to_string()),
    }
}

/// Reduce a DTSTART/DTEND value to local wall-clock time.
///
/// All-day dates become midnight. UTC and TZID-zoned values are converted
/// to the local zone; a TZID we cannot resolve is read as floating time.
/// Always returns a fresh value, so normalizing never touches an instant
/// shared with another record.
fn to_local_naive(dpt: DatePerhapsTime) -> NaiveDateTime {
    match dpt {
        DatePerhapsTime::Date(date) => date.and_hms_opt(0, 0, 0).unwrap(),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => {
            dt.with_timezone(&Local).naive_local()
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => naive,
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            match tzid.parse::<chrono_tz::Tz>() {
                Ok(tz) => match tz.from_local_datetime(&date_time).earliest() {
                    Some(zoned) => zoned.with_timezone(&Local).naive_local(),
                    None => date_time,
                },
                Err(_) => date_time,
            }
        }
    }
}
