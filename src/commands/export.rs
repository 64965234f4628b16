use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use confcal_core::Config;
use confcal_core::config::{DescriptionFormat, LineEndings};
use confcal_core::source::Source;

/// Command-line values that take precedence over the config file.
#[derive(Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub mixin: Option<String>,
    pub details: Option<String>,
    pub output: Option<PathBuf>,
    pub timezone: Option<String>,
    pub html: bool,
    pub lf: bool,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source = source;
        }
        if self.mixin.is_some() {
            config.mixin = self.mixin;
        }
        if self.details.is_some() {
            config.details = self.details;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(timezone) = self.timezone {
            config.timezone = timezone;
        }
        if self.html {
            config.description_format = DescriptionFormat::Html;
        }
        if self.lf {
            config.line_endings = LineEndings::Lf;
        }
    }
}

pub async fn run(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let mut config = Config::load_or_default(config_path).context("Failed to load config")?;
    overrides.apply(&mut config);

    let source = Source::parse(&config.source);
    let summary = confcal_core::export(&config)
        .await
        .with_context(|| format!("Failed to export agenda from {}", source))?;

    println!(
        "📅 Wrote {} sessions to {}",
        summary.events,
        summary.output.display()
    );
    if summary.skipped() > 0 {
        println!("  {} entries without a title skipped", summary.skipped());
    }

    Ok(())
}
