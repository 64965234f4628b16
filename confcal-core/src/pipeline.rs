//! The export pipeline: load, resolve, build, serialize, write.

use std::path::PathBuf;

use tracing::info;

use crate::agenda::{Agenda, DetailedSessions};
use crate::builder::EventBuilder;
use crate::config::Config;
use crate::error::ConfcalResult;
use crate::ics::generate_ics;
use crate::output::write_calendar;
use crate::source::Source;

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub entries: usize,
    pub events: usize,
}

impl ExportSummary {
    /// Entries dropped for lacking a title.
    pub fn skipped(&self) -> usize {
        self.entries - self.events
    }
}

/// Load the agenda document and overlay the mixin streams, if configured.
pub async fn load_agenda(config: &Config) -> ConfcalResult<Agenda> {
    let doc = Source::parse(&config.source).load().await?;
    let mut agenda = Agenda::from_value(doc)?;

    if let Some(ref mixin) = config.mixin {
        let mixin = Source::parse(mixin).load().await?;
        agenda.merge_mixin(&mixin);
    }

    Ok(agenda)
}

async fn load_details(config: &Config) -> ConfcalResult<Option<DetailedSessions>> {
    match config.details {
        Some(ref details) => {
            let doc = Source::parse(details).load().await?;
            let sessions = DetailedSessions::from_value(doc);
            info!(sessions = sessions.len(), "loaded session details");
            Ok(Some(sessions))
        }
        None => Ok(None),
    }
}

/// Run the whole export. Nothing is written unless every entry builds.
pub async fn export(config: &Config) -> ConfcalResult<ExportSummary> {
    let agenda = load_agenda(config).await?;
    let details = load_details(config).await?;

    let mut builder = EventBuilder::new(&agenda, config)?;
    if let Some(ref details) = details {
        builder = builder.with_details(details);
    }
    let events = builder.build_all()?;

    let ics = generate_ics(&events, config);
    write_calendar(&config.output, &ics, config.line_endings)?;

    Ok(ExportSummary {
        output: config.output.clone(),
        entries: agenda.len(),
        events: events.len(),
    })
}
