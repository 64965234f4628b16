//! Export configuration.
//!
//! Everything that used to be a hard-coded constant in the agenda scripts
//! (source location, timezone, output file, uid prefix, agenda base URL) lives
//! here so other events or years can be exported without code changes.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{ConfcalError, ConfcalResult};

static DEFAULT_SOURCE: &str = "event.json";
static DEFAULT_OUTPUT: &str = "agenda.ics";
static DEFAULT_TIMEZONE: &str = "Europe/Berlin";
static DEFAULT_UID_PREFIX: &str = "C-105";
static DEFAULT_PRODID: &str = "-//confcal//agenda export//EN";

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "confcal.toml";

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_uid_prefix() -> String {
    DEFAULT_UID_PREFIX.to_string()
}

fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

fn default_true() -> bool {
    true
}

/// How the DESCRIPTION text is marked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionFormat {
    /// Plain text, groups separated by a blank line
    #[default]
    Plain,
    /// Speaker in `<i>`, line breaks as `<br>`
    Html,
}

/// Line terminator of the written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndings {
    /// RFC 5545 CRLF
    #[default]
    Crlf,
    /// Carriage returns stripped
    Lf,
}

/// Calendar-level metadata written into the VCALENDAR header.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarMeta {
    #[serde(default = "default_prodid")]
    pub prodid: String,

    /// X-WR-CALNAME
    pub name: Option<String>,

    /// X-WR-CALDESC
    pub description: Option<String>,

    /// Calendar-level URL, usually the public agenda page
    pub url: Option<String>,
}

impl Default for CalendarMeta {
    fn default() -> Self {
        CalendarMeta {
            prodid: default_prodid(),
            name: None,
            description: None,
            url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// File path or http(s) URL of the agenda document
    #[serde(default = "default_source")]
    pub source: String,

    /// Optional document whose `streams` override the source's
    pub mixin: Option<String>,

    /// Optional detailed agenda document providing abstracts
    pub details: Option<String>,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// IANA name of the conference's home timezone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_uid_prefix")]
    pub uid_prefix: String,

    /// Base URL for per-session deep links (`<agenda_url>#<id>`)
    pub agenda_url: Option<String>,

    #[serde(default)]
    pub description_format: DescriptionFormat,

    #[serde(default)]
    pub line_endings: LineEndings,

    /// Emit a TZID property on every event
    #[serde(default = "default_true")]
    pub emit_tzid: bool,

    #[serde(default)]
    pub calendar: CalendarMeta,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            mixin: None,
            details: None,
            output: default_output(),
            timezone: default_timezone(),
            uid_prefix: default_uid_prefix(),
            agenda_url: None,
            description_format: DescriptionFormat::default(),
            line_endings: LineEndings::default(),
            emit_tzid: true,
            calendar: CalendarMeta::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ConfcalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, else `confcal.toml` from the working directory if
    /// it exists, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfcalResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(CONFIG_FILE_NAME);
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml(content: &str) -> ConfcalResult<Self> {
        toml::from_str(content).map_err(|e| ConfcalError::Config(e.to_string()))
    }

    /// The configured home timezone.
    pub fn tz(&self) -> ConfcalResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfcalError::InvalidTimezone(self.timezone.clone()))
    }
}
