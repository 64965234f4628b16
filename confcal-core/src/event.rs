//! Calendar events produced from agenda entries.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// One session, ready to be written as a VEVENT.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// `<prefix>.<agenda id>.<event slot id>`, stable across exports
    pub uid: String,
    /// Stream icon followed by the session title
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// Room name, possibly empty
    pub location: String,
    /// Main speaker, possibly empty
    pub contact: String,
    pub description: String,
    /// Deep link into the public agenda page
    pub url: Option<String>,
    /// IANA name of the home timezone `start`/`end` are expressed in
    pub timezone_id: String,
}

impl CalendarEvent {
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }
}
