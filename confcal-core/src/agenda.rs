//! The agenda document and its auxiliary mappings.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfcalError, ConfcalResult};
use crate::json::JsonExt;

/// Sessions plus the lookup tables their foreign keys point into.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    /// `(id, entry)` pairs sorted by id
    entries: Vec<(String, Value)>,
    pub rooms: Map<String, Value>,
    pub streams: Map<String, Value>,
    pub main_focuses: Map<String, Value>,
}

/// A room as shown by the room listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: String,
    pub name: String,
    pub capacity: Option<u64>,
}

impl Agenda {
    /// Split an event document into agenda entries and lookup tables.
    ///
    /// The document must carry an `agenda` object. The lookup tables are
    /// optional and default to empty.
    pub fn from_value(doc: Value) -> ConfcalResult<Self> {
        let Value::Object(mut root) = doc else {
            return Err(ConfcalError::Parse(
                "agenda document is not a JSON object".to_string(),
            ));
        };

        let entries = match root.remove("agenda") {
            Some(Value::Object(agenda)) => agenda,
            Some(_) => {
                return Err(ConfcalError::Parse(
                    "'agenda' is not a JSON object".to_string(),
                ));
            }
            None => {
                return Err(ConfcalError::Parse(
                    "agenda document has no 'agenda' field".to_string(),
                ));
            }
        };

        let mut entries: Vec<(String, Value)> = entries.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| compare_ids(a, b));

        Ok(Agenda {
            entries,
            rooms: take_object(&mut root, "rooms"),
            streams: take_object(&mut root, "streams"),
            main_focuses: take_object(&mut root, "mainFocuses"),
        })
    }

    /// Overlay the `streams` table of a mixin document. Mixin entries win.
    pub fn merge_mixin(&mut self, mixin: &Value) {
        if let Some(streams) = mixin.object("streams") {
            debug!(count = streams.len(), "merging mixin streams");
            for (id, stream) in streams {
                self.streams.insert(id.clone(), stream.clone());
            }
        }
    }

    /// Agenda entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rooms in id order with trimmed names and seat capacity.
    pub fn room_listing(&self) -> Vec<RoomInfo> {
        let mut rooms: Vec<RoomInfo> = self
            .rooms
            .iter()
            .map(|(id, room)| RoomInfo {
                id: id.clone(),
                name: room.str_or_empty("name").trim().to_string(),
                capacity: room.field("capacity").and_then(Value::as_u64),
            })
            .collect();
        rooms.sort_by(|a, b| compare_ids(&a.id, &b.id));
        rooms
    }
}

fn take_object(root: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match root.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Numeric ids sort numerically and before any non-numeric id; the rest sort
/// lexicographically.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Long-form session records from the detailed agenda document, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DetailedSessions {
    by_id: HashMap<String, Value>,
}

impl DetailedSessions {
    /// Index a detailed agenda document.
    ///
    /// Accepts a list of session objects (indexed by their `id`), an object
    /// keyed by id, or either of those wrapped in an `agenda` field. Sessions
    /// without a usable id are ignored.
    pub fn from_value(doc: Value) -> Self {
        let doc = match doc {
            Value::Object(mut root) if root.contains_key("agenda") => {
                root.remove("agenda").unwrap_or(Value::Null)
            }
            other => other,
        };

        let by_id = match doc {
            Value::Array(sessions) => sessions
                .into_iter()
                .filter_map(|session| session.key_string("id").map(|id| (id, session)))
                .collect(),
            Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };

        DetailedSessions { by_id }
    }

    pub fn get(&self, agenda_id: &str) -> Option<&Value> {
        self.by_id.get(agenda_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
