//! End-to-end aggregation tests against fixture feeds served over HTTP.

use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use famboard_core::WeekPlanner;
use famboard_core::household::{FamilyMember, HouseholdStore, MealCalendar};
use famboard_core::{FamBoardResult, MealEvent};

/// Serve a fixed ICS body on a local port, one response per connection.
async fn serve_feed(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind a local port");
    let addr = listener.local_addr().expect("Should have a local address");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/calendar\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/feed.ics", addr)
}

/// In-memory household configuration for tests.
struct FixedStore {
    members: Vec<FamilyMember>,
    meal_calendar: Option<MealCalendar>,
}

impl HouseholdStore for FixedStore {
    fn family_members(&self) -> FamBoardResult<Vec<FamilyMember>> {
        Ok(self.members.clone())
    }

    fn meal_calendar(&self) -> FamBoardResult<Option<MealCalendar>> {
        Ok(self.meal_calendar.clone())
    }
}

fn member(name: &str, color: &str, url: String, active: bool) -> FamilyMember {
    FamilyMember {
        name: name.to_string(),
        color: color.to_string(),
        calendar_url: url,
        active,
    }
}

const ALICE_FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:alice-monday\r\n\
SUMMARY:Team standup\r\n\
DTSTART:20250602T090000\r\n\
DTEND:20250602T093000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:alice-sunday\r\n\
SUMMARY:Evening walk\r\n\
DTSTART:20250608T220000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

const MEAL_FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:meal-wednesday\r\n\
SUMMARY:Lasagna\r\n\
DTSTART;VALUE=DATE:20250604\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Spec scenario: a Wednesday reference, one member with a Monday 09:00
/// and a Sunday 22:00 event, and a meal planned for Wednesday.
#[tokio::test]
async fn aggregates_a_full_week() {
    let alice_url = serve_feed(ALICE_FEED).await;
    let meal_url = serve_feed(MEAL_FEED).await;

    let store = FixedStore {
        members: vec![member("Alice", "#7c9a5e", alice_url, true)],
        meal_calendar: Some(MealCalendar {
            calendar_url: meal_url,
            active: true,
        }),
    };

    let planner = WeekPlanner::new(store);
    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let days = planner.week(Some(wednesday)).await.expect("Should aggregate");

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());

    // Monday carries the 09:00 event
    assert_eq!(days[0].events.len(), 1);
    assert_eq!(days[0].events[0].id, "alice-monday");
    assert_eq!(days[0].events[0].owner, "Alice");
    assert_eq!(days[0].events[0].owner_color, "#7c9a5e");

    // Sunday carries the 22:00 event
    assert_eq!(days[6].events.len(), 1);
    assert_eq!(days[6].events[0].id, "alice-sunday");

    // Wednesday carries the meal, nothing else does
    let meal: &MealEvent = days[2].meal.as_ref().expect("Wednesday should have a meal");
    assert_eq!(meal.title, "Lasagna");

    for (i, day) in days.iter().enumerate() {
        if i != 0 && i != 6 {
            assert!(day.events.is_empty(), "day {} should have no events", i);
        }
        if i != 2 {
            assert!(day.meal.is_none(), "day {} should have no meal", i);
        }
    }
}

/// A dead source contributes nothing but does not block its siblings.
#[tokio::test]
async fn failed_source_is_isolated() {
    let alice_url = serve_feed(ALICE_FEED).await;

    let store = FixedStore {
        members: vec![
            // Nothing listens on port 9; the fetch fails and is absorbed
            member("Bob", "#b04a4a", "http://127.0.0.1:9/feed.ics".to_string(), true),
            member("Alice", "#7c9a5e", alice_url, true),
        ],
        meal_calendar: None,
    };

    let planner = WeekPlanner::new(store);
    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let days = planner.week(Some(wednesday)).await.expect("Should aggregate");

    let owners: Vec<_> = days
        .iter()
        .flat_map(|day| day.events.iter().map(|e| e.owner.clone()))
        .collect();
    assert!(!owners.is_empty());
    assert!(owners.iter().all(|owner| owner == "Alice"));
}

/// Inactive members and members without a feed URL are never consulted.
#[tokio::test]
async fn skips_inactive_and_urlless_members() {
    let feed_url = serve_feed(ALICE_FEED).await;

    let store = FixedStore {
        members: vec![
            member("Alice", "#7c9a5e", feed_url.clone(), true),
            member("Bob", "#b04a4a", feed_url, false),
            member("Carol", "#4a6fb0", String::new(), true),
        ],
        meal_calendar: None,
    };

    let planner = WeekPlanner::new(store);
    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let days = planner.week(Some(wednesday)).await.expect("Should aggregate");

    let owners: Vec<_> = days
        .iter()
        .flat_map(|day| day.events.iter().map(|e| e.owner.clone()))
        .collect();
    assert!(owners.iter().all(|owner| owner == "Alice"));
    assert_eq!(owners.len(), 2);
}

/// An inactive meal calendar yields a week with no meals at all.
#[tokio::test]
async fn inactive_meal_calendar_is_ignored() {
    let meal_url = serve_feed(MEAL_FEED).await;

    let store = FixedStore {
        members: Vec::new(),
        meal_calendar: Some(MealCalendar {
            calendar_url: meal_url,
            active: false,
        }),
    };

    let planner = WeekPlanner::new(store);
    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let days = planner.week(Some(wednesday)).await.expect("Should aggregate");

    assert!(days.iter().all(|day| day.meal.is_none()));
}

/// No configuration at all still produces the full, empty week.
#[tokio::test]
async fn empty_household_degrades_to_empty_week() {
    let store = FixedStore {
        members: Vec::new(),
        meal_calendar: None,
    };

    let planner = WeekPlanner::new(store);
    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let days = planner.week(Some(wednesday)).await.expect("Should aggregate");

    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|day| day.events.is_empty() && day.meal.is_none()));
}
