//! Feed retrieval and normalization.
//!
//! `FeedClient` turns a calendar URL into a `Feed`, absorbing every
//! failure into an empty result so one dead source cannot abort an
//! aggregation. `to_events` and `to_meals` turn a feed into typed
//! records, skipping anything that lacks a start time or a summary.

use chrono::{Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::FamBoardResult;
use crate::event::{CalendarEvent, MealEvent};
use crate::ics::{Feed, FeedComponent, parse_feed};

/// HTTP client for calendar feeds.
#[derive(Debug, Clone, Default)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and parse a calendar feed.
    ///
    /// Never fails: network errors, non-2xx responses and malformed
    /// bodies are logged and collapsed into an empty feed, so the caller
    /// cannot distinguish a dead source from an empty one.
    pub async fn fetch(&self, url: &str) -> Feed {
        match self.try_fetch(url).await {
            Ok(feed) => feed,
            Err(err) => {
                warn!(url, error = %err, "failed to fetch calendar feed");
                Feed::default()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> FamBoardResult<Feed> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_feed(&body)
    }
}

/// Convert a feed into calendar events attributed to one family member.
///
/// Non-VEVENT components and records missing a start time or a summary
/// are skipped. Output order is feed order; nothing is sorted here.
pub fn to_events(feed: &Feed, owner: &str, owner_color: &str) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for component in &feed.components {
        let FeedComponent::Event(record) = component else {
            continue;
        };
        let (Some(start), Some(summary)) = (record.start, &record.summary) else {
            debug!(owner, "skipping feed record without start or summary");
            continue;
        };

        events.push(CalendarEvent {
            id: record.uid.clone().unwrap_or_else(|| fallback_id(owner)),
            title: summary.clone(),
            start,
            end: record.end.unwrap_or(start + Duration::hours(1)),
            description: record.description.clone().unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
            owner: owner.to_string(),
            owner_color: owner_color.to_string(),
        });
    }

    events
}

/// Convert a feed into meal entries, one per qualifying VEVENT.
///
/// A meal is attributed to the calendar day of its start time; the day is
/// derived as a fresh value, never by truncating an instant in place.
pub fn to_meals(feed: &Feed) -> Vec<MealEvent> {
    let mut meals = Vec::new();

    for component in &feed.components {
        let FeedComponent::Event(record) = component else {
            continue;
        };
        let (Some(start), Some(summary)) = (record.start, &record.summary) else {
            debug!("skipping meal record without start or summary");
            continue;
        };

        meals.push(MealEvent {
            id: record.uid.clone().unwrap_or_else(|| fallback_id("meal")),
            title: summary.clone(),
            date: start.date(),
        });
    }

    meals
}

/// Best-effort unique id for records whose feed omits a UID.
fn fallback_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        &suffix[..7]
    )
}
