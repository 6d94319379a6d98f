//! ICS feed parsing.
//!
//! Reduces an iCalendar body to a tolerant intermediate representation;
//! required-field checks and default-filling happen in the `feed` module.

mod parse;

pub use parse::{Feed, FeedComponent, FeedEvent, parse_feed};
