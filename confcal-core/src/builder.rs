//! Turning agenda entries into calendar events.

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde_json::Value;
use tracing::{debug, info};

use crate::agenda::{Agenda, DetailedSessions};
use crate::config::{Config, DescriptionFormat};
use crate::error::{ConfcalError, ConfcalResult};
use crate::event::CalendarEvent;
use crate::json::{JsonExt, value_as_epoch};
use crate::resolve::{
    resolve_co_speakers, resolve_description_by_agenda_id, resolve_room_name, resolve_speaker,
    resolve_stream_icon, resolve_stream_name,
};

pub struct EventBuilder<'a> {
    agenda: &'a Agenda,
    details: Option<&'a DetailedSessions>,
    tz: Tz,
    uid_prefix: &'a str,
    agenda_url: Option<&'a str>,
    format: DescriptionFormat,
}

impl<'a> EventBuilder<'a> {
    pub fn new(agenda: &'a Agenda, config: &'a Config) -> ConfcalResult<Self> {
        Ok(EventBuilder {
            agenda,
            details: None,
            tz: config.tz()?,
            uid_prefix: &config.uid_prefix,
            agenda_url: config.agenda_url.as_deref(),
            format: config.description_format,
        })
    }

    /// Use abstracts from a detailed agenda document instead of the
    /// placeholder description.
    pub fn with_details(mut self, details: &'a DetailedSessions) -> Self {
        self.details = Some(details);
        self
    }

    /// Build every titled entry in id order.
    ///
    /// The first malformed entry aborts the whole batch.
    pub fn build_all(&self) -> ConfcalResult<Vec<CalendarEvent>> {
        let mut events = Vec::with_capacity(self.agenda.len());
        for (id, entry) in self.agenda.entries() {
            if let Some(event) = self.build(id, entry)? {
                events.push(event);
            }
        }
        info!(
            events = events.len(),
            skipped = self.agenda.len() - events.len(),
            "built calendar events"
        );
        Ok(events)
    }

    /// Build one entry. `Ok(None)` means the entry has no title and is skipped.
    pub fn build(&self, id: &str, entry: &Value) -> ConfcalResult<Option<CalendarEvent>> {
        let title = match entry.field("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(title)) => Some(title.trim()),
            Some(_) => return Err(malformed(id, "'title' is not a string")),
        };
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            debug!(id, "skipping entry without title");
            return Ok(None);
        };

        let start = self.instant(id, entry, "start")?;
        let end = self.instant(id, entry, "end")?;

        let stream_id = entry.key_string("mainFocus").unwrap_or_default();
        let room_id = entry.key_string("roomId").unwrap_or_default();
        let slot_id = entry.key_string("eventSlotId").unwrap_or_default();

        let icon = resolve_stream_icon(&stream_id, &self.agenda.streams);
        let speaker = resolve_speaker(entry.field("speaker"));

        Ok(Some(CalendarEvent {
            uid: format!("{}.{}.{}", self.uid_prefix, id, slot_id),
            summary: format!("{}{}", icon, title),
            start,
            end,
            location: resolve_room_name(&room_id, &self.agenda.rooms),
            description: self.description(id, entry, title, &icon, &stream_id, &speaker),
            contact: speaker,
            url: self
                .agenda_url
                .map(|base| format!("{}#{}", base.trim_end_matches('#'), id)),
            timezone_id: self.tz.name().to_string(),
        }))
    }

    fn instant(&self, id: &str, entry: &Value, key: &str) -> ConfcalResult<DateTime<Tz>> {
        let value = entry
            .field(key)
            .ok_or_else(|| malformed(id, &format!("missing '{}'", key)))?;
        let secs = value_as_epoch(value).ok_or_else(|| {
            let reason = format!("'{}' is not an epoch timestamp: {}", key, value);
            malformed(id, &reason)
        })?;
        self.tz
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| malformed(id, &format!("'{}' is out of range: {}", key, secs)))
    }

    /// Non-blank groups in order: speaker, co-speakers, stream, abstract.
    fn description(
        &self,
        id: &str,
        entry: &Value,
        title: &str,
        icon: &str,
        stream_id: &str,
        speaker: &str,
    ) -> String {
        let (line_break, group_break) = match self.format {
            DescriptionFormat::Plain => ("\n", "\n\n"),
            DescriptionFormat::Html => ("<br>", "<br><br>"),
        };

        let mut groups: Vec<String> = Vec::new();

        if !speaker.is_empty() {
            groups.push(match self.format {
                DescriptionFormat::Plain => speaker.to_string(),
                DescriptionFormat::Html => format!("<i>{}</i>", speaker),
            });
        }

        let co_speakers =
            resolve_co_speakers(entry.field("coSpeakers").or_else(|| entry.field("coSpeaker")));
        if !co_speakers.is_empty() {
            groups.push(co_speakers.replace('\n', line_break));
        }

        let stream_name = resolve_stream_name(stream_id, &self.agenda.main_focuses);
        let stream = format!("{}{}", icon, stream_name);
        if !stream.trim().is_empty() {
            groups.push(stream.trim().to_string());
        }

        let body = match self.details {
            Some(details) => resolve_description_by_agenda_id(id, details),
            None => format!("TODO: Description of {}", title),
        };
        if !body.is_empty() {
            groups.push(body);
        }

        groups.join(group_break)
    }
}

fn malformed(id: &str, reason: &str) -> ConfcalError {
    ConfcalError::MalformedEntry {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}
