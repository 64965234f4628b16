//! Conference agenda to iCalendar export.
//!
//! The pipeline has four stages:
//! - `source` loads agenda documents from a file or over HTTP
//! - `resolve` looks up rooms, speakers, streams and abstracts
//! - `builder` turns agenda entries into `CalendarEvent`s
//! - `ics` and `output` render RFC 5545 text and write it to disk

pub mod agenda;
pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod json;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod source;

pub use agenda::{Agenda, DetailedSessions, RoomInfo};
pub use config::Config;
pub use error::{ConfcalError, ConfcalResult};
pub use event::CalendarEvent;
pub use pipeline::{ExportSummary, export, load_agenda};
