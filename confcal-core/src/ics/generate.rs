//! ICS calendar generation.

use crate::config::Config;
use crate::event::CalendarEvent;
use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property};

/// Generate a VCALENDAR holding one VEVENT per event, in the given order.
pub fn generate_ics(events: &[CalendarEvent], config: &Config) -> String {
    let mut cal = Calendar::new();

    if let Some(ref name) = config.calendar.name {
        cal.name(name);
    }
    if let Some(ref desc) = config.calendar.description {
        cal.description(desc);
    }
    cal.timezone(config.timezone.as_str());
    if let Some(ref url) = config.calendar.url {
        cal.append_property(Property::new("URL", url));
    }

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);

        // DTSTAMP must not depend on wall-clock time, otherwise two exports of
        // the same agenda differ
        let dtstamp = event.start_utc().format("%Y%m%dT%H%M%SZ").to_string();
        ics_event.add_property("DTSTAMP", &dtstamp);

        ics_event.add_property("DTSTART", format_instant(&event.start_utc()));
        ics_event.add_property("DTEND", format_instant(&event.end_utc()));

        ics_event.summary(&event.summary);
        ics_event.location(&event.location);
        ics_event.add_property("CONTACT", &event.contact);
        ics_event.description(&event.description);

        if config.emit_tzid {
            ics_event.add_property("TZID", &event.timezone_id);
        }

        if let Some(ref url) = event.url {
            ics_event.add_property("URL", url);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    replace_prodid(&cal.to_string(), &config.calendar.prodid)
}

/// `YYYYMMDDTHHMMSS+0000`: UTC with an explicit numeric offset.
pub fn format_instant(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%S%z").to_string()
}

/// The icalendar crate always writes its own PRODID
fn replace_prodid(ics: &str, prodid: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prodid);
            result.push_str("\r\n");
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn make_test_event() -> CalendarEvent {
        CalendarEvent {
            uid: "C-105.42.7".to_string(),
            summary: "Keynote".to_string(),
            start: Berlin.timestamp_opt(1721030400, 0).unwrap(),
            end: Berlin.timestamp_opt(1721034000, 0).unwrap(),
            location: "Hall A".to_string(),
            contact: "A. Example (Acme)".to_string(),
            description: "A. Example (Acme)\n\nTODO: Description of Keynote".to_string(),
            url: None,
            timezone_id: "Europe/Berlin".to_string(),
        }
    }

    /// Undo RFC 5545 line folding so assertions can match whole properties.
    fn unfold(ics: &str) -> String {
        ics.replace("\r\n ", "").replace("\r\n\t", "")
    }

    #[test]
    fn test_generate_ics_times_have_explicit_utc_offset() {
        let ics = generate_ics(&[make_test_event()], &Config::default());

        assert!(
            ics.contains("DTSTART:20240715T080000+0000"),
            "DTSTART should be UTC with +0000 offset. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND:20240715T090000+0000"),
            "DTEND should be UTC with +0000 offset. ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTSTAMP:20240715T080000Z"));
    }

    #[test]
    fn test_generate_ics_event_properties() {
        let ics = unfold(&generate_ics(&[make_test_event()], &Config::default()));

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("VERSION:2.0"));
        assert!(ics.contains("PRODID:-//confcal//agenda export//EN\r\n"));
        assert!(!ics.contains("ICALENDAR-RS"), "default PRODID should be replaced");
        assert!(ics.contains("UID:C-105.42.7"));
        assert!(ics.contains("SUMMARY:Keynote"));
        assert!(ics.contains("LOCATION:Hall A"));
        assert!(ics.contains("CONTACT:A. Example (Acme)"));
        assert!(ics.contains("TZID:Europe/Berlin"));
        assert!(!ics.contains("URL:"), "no URL without agenda_url");

        let description = ics
            .lines()
            .find(|l| l.starts_with("DESCRIPTION:"))
            .expect("Should have DESCRIPTION line");
        assert!(description.contains("A. Example (Acme)"));
        assert!(description.contains("TODO: Description of Keynote"));
    }

    #[test]
    fn test_generate_ics_escapes_multiline_description() {
        let ics = unfold(&generate_ics(&[make_test_event()], &Config::default()));

        // Every content line must start with a property name, so the raw
        // newlines of the description cannot leak into the output
        for line in ics.lines() {
            assert!(
                line.split(|c: char| c == ':' || c == ';').next().is_some_and(|name| {
                    !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_uppercase() || c == '-')
                }),
                "Unexpected content line: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_generate_ics_one_vevent_per_event_in_order() {
        let mut second = make_test_event();
        second.uid = "C-105.43.".to_string();
        second.summary = "Closing".to_string();

        let ics = generate_ics(&[make_test_event(), second], &Config::default());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        let first_pos = ics.find("UID:C-105.42.7").unwrap();
        let second_pos = ics.find("UID:C-105.43.").unwrap();
        assert!(first_pos < second_pos);
    }

    #[test]
    fn test_generate_ics_calendar_metadata_and_url() {
        let mut config = Config::default();
        config.emit_tzid = false;
        config.calendar.prodid = "-//DevConf//2024//EN".to_string();
        config.calendar.name = Some("DevConf".to_string());
        config.calendar.description = Some("All sessions".to_string());
        config.calendar.url = Some("https://conf.example.org/agenda".to_string());

        let mut event = make_test_event();
        event.url = Some("https://conf.example.org/agenda#42".to_string());

        let ics = unfold(&generate_ics(&[event], &config));

        assert!(ics.contains("PRODID:-//DevConf//2024//EN"));
        assert!(ics.contains("X-WR-CALNAME:DevConf"));
        assert!(ics.contains("X-WR-CALDESC:All sessions"));
        assert!(ics.contains("X-WR-TIMEZONE:Europe/Berlin"));
        assert!(ics.contains("URL:https://conf.example.org/agenda\r\n"));
        assert!(ics.contains("URL:https://conf.example.org/agenda#42"));
        assert!(!ics.contains("TZID:"));
    }

    #[test]
    fn test_generate_ics_writes_configured_timezone() {
        let config = Config {
            timezone: "Europe/Vienna".to_string(),
            ..Config::default()
        };

        let ics = generate_ics(&[make_test_event()], &config);

        assert!(
            ics.contains("X-WR-TIMEZONE:Europe/Vienna"),
            "Calendar should name the configured timezone. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_ics_is_deterministic() {
        let events = vec![make_test_event()];
        let config = Config::default();
        assert_eq!(generate_ics(&events, &config), generate_ics(&events, &config));
    }

    #[test]
    fn test_format_instant() {
        let dt = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(format_instant(&dt), "20231114T221320+0000");
    }
}
