mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "confcal")]
#[command(about = "Export a conference agenda as an iCalendar (.ics) file")]
struct Cli {
    /// Config file (defaults to ./confcal.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log skipped entries and each pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the agenda into an .ics file
    Export {
        /// Agenda file path or http(s) URL
        #[arg(short, long)]
        source: Option<String>,

        /// Document whose `streams` override the agenda's stream icons
        #[arg(long)]
        mixin: Option<String>,

        /// Detailed agenda document providing session abstracts
        #[arg(long)]
        details: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Home timezone of the conference (e.g., "Europe/Berlin")
        #[arg(long)]
        timezone: Option<String>,

        /// HTML-flavored descriptions (speaker in <i>, <br> line breaks)
        #[arg(long)]
        html: bool,

        /// Write LF line endings instead of CRLF
        #[arg(long)]
        lf: bool,
    },
    /// List the conference rooms and their capacity
    Rooms {
        /// Agenda file path or http(s) URL
        #[arg(short, long)]
        source: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Export {
            source,
            mixin,
            details,
            output,
            timezone,
            html,
            lf,
        } => {
            let overrides = commands::export::Overrides {
                source,
                mixin,
                details,
                output,
                timezone,
                html,
                lf,
            };
            commands::export::run(cli.config.as_deref(), overrides).await
        }
        Commands::Rooms { source } => commands::rooms::run(cli.config.as_deref(), source).await,
    }
}

/// Log to stderr so stdout only carries command output.
fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "warn" };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))?;

    Ok(())
}
