//! Cross-reference lookups for agenda entries.
//!
//! Every resolver is total: a missing key, an unknown id or a value of the
//! wrong JSON type all resolve to an empty string.

use serde_json::{Map, Value};

use crate::agenda::DetailedSessions;
use crate::json::JsonExt;

/// Name of the room `room_id` points at.
pub fn resolve_room_name(room_id: &str, rooms: &Map<String, Value>) -> String {
    if room_id.trim().is_empty() {
        return String::new();
    }
    rooms
        .get(room_id)
        .map(|room| room.str_or_empty("name").to_string())
        .unwrap_or_default()
}

/// `"Name (Company)"`, or just `"Name"` when the company is blank.
///
/// A record without a name yields `""` even if it has a company.
pub fn resolve_speaker(speaker: Option<&Value>) -> String {
    let Some(speaker) = speaker else {
        return String::new();
    };

    let name = speaker.str_or_empty("name").trim();
    if name.is_empty() {
        return String::new();
    }

    let company = speaker.str_or_empty("company").trim();
    if company.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, company)
    }
}

/// One resolved speaker per line.
///
/// Records that resolve to `""` (no name, even with a company) are dropped
/// rather than joined as blank lines.
pub fn resolve_co_speakers(list: Option<&Value>) -> String {
    let Some(Value::Array(speakers)) = list else {
        return String::new();
    };

    speakers
        .iter()
        .map(|speaker| resolve_speaker(Some(speaker)))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stream icon with one trailing space, ready to prefix a title.
pub fn resolve_stream_icon(stream_id: &str, streams: &Map<String, Value>) -> String {
    if stream_id.trim().is_empty() {
        return String::new();
    }
    match streams.get(stream_id) {
        Some(stream) => format!("{} ", stream.str_or_empty("icon")),
        None => String::new(),
    }
}

/// Display name of a stream from the event's `mainFocuses` table.
pub fn resolve_stream_name(stream_id: &str, main_focuses: &Map<String, Value>) -> String {
    if stream_id.trim().is_empty() {
        return String::new();
    }
    main_focuses
        .get(stream_id)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

/// Trimmed abstract of the detailed session with the same id.
pub fn resolve_description_by_agenda_id(agenda_id: &str, details: &DetailedSessions) -> String {
    details
        .get(agenda_id)
        .map(|session| session.str_or_empty("abstract").trim().to_string())
        .unwrap_or_default()
}
