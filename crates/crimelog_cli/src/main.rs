//! Terminal front end for the crimelog archive.
//!
//! # Responsibility
//! - Map command-line arguments onto `CoreConfig`.
//! - Run one sync or one read-only query per invocation and print the result.
//!
//! ```bash
//! crimelog sync
//! crimelog list --sort location
//! crimelog by-type inbrott
//! crimelog show 401782
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crimelog_core::{
    default_log_level, init_logging, subcategory_keys, ArchiveService, CoreConfig, Event,
    HttpEventSource, JsonFileArchive, SortKey, SubcategoryKind, TYPE_CATALOG,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "crimelog", version)]
#[command(about = "Archive and browse incident reports from a public-safety feed")]
struct Cli {
    /// Archive document location
    #[arg(
        long,
        env = "CRIMELOG_ARCHIVE",
        default_value = crimelog_core::config::DEFAULT_ARCHIVE_PATH
    )]
    archive: PathBuf,

    /// Feed endpoint returning a JSON array of events
    #[arg(
        long,
        env = "CRIMELOG_SOURCE_URL",
        default_value = crimelog_core::config::DEFAULT_SOURCE_URL
    )]
    source_url: String,

    /// Origin prepended to relative detail paths
    #[arg(
        long,
        env = "CRIMELOG_DETAIL_ORIGIN",
        default_value = crimelog_core::config::DEFAULT_DETAIL_ORIGIN
    )]
    detail_origin: String,

    /// Feed request timeout in seconds
    #[arg(long, env = "CRIMELOG_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Directory for rolling log files (absolute); logging is off when unset
    #[arg(long, env = "CRIMELOG_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "CRIMELOG_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the feed and merge it into the archive
    Sync,
    /// List archived events
    List {
        /// id|datetime|type|location (or i|d|t|l)
        #[arg(long, short, default_value = "datetime")]
        sort: SortKey,
    },
    /// List archived events of one type (case-insensitive)
    ByType { key: String },
    /// List archived events at one location (case-insensitive)
    ByLocation { key: String },
    /// Show one archived event with its detail URL
    Show { id: i64 },
    /// List known type labels and the ones present in the archive
    Types,
    /// List locations present in the archive
    Locations,
}

impl Cli {
    fn core_config(&self) -> CoreConfig {
        CoreConfig {
            source_url: self.source_url.clone(),
            detail_origin: self.detail_origin.clone(),
            archive_path: self.archive.clone(),
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            ..CoreConfig::default()
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir, true).context("failed to initialize logging")?;
    }

    let config = cli.core_config();
    config.validate().context("invalid configuration")?;

    let source = HttpEventSource::from_config(&config);
    let archive = JsonFileArchive::new(&config.archive_path);
    let service = ArchiveService::new(source, archive, config.detail_origin.as_str());

    match cli.command {
        Command::Sync => {
            let report = service.sync().context("sync failed")?;
            println!(
                "fetched {} events, {} new, {} duplicates; archive holds {}",
                report.fetched,
                report.added(),
                report.duplicates,
                report.total
            );
        }
        Command::List { sort } => print_events(&service.events_sorted_by(sort)?),
        Command::ByType { key } => print_events(&service.subcategory_by_type(&key)?),
        Command::ByLocation { key } => print_events(&service.subcategory_by_location(&key)?),
        Command::Show { id } => match service.find_event(id)? {
            Some(event) => {
                println!("{} ---- {}", event.id, event.name);
                println!("{} | {} | {}", event.datetime, event.kind, event.location.name);
                if !event.summary.is_empty() {
                    println!("{}", event.summary);
                }
                println!("{}", service.detail_url(&event));
            }
            None => println!("no archived event with id {id}"),
        },
        Command::Types => {
            let present = subcategory_keys(&service.all_events()?, SubcategoryKind::Type);
            let present_lower: Vec<String> = present.iter().map(|key| key.to_lowercase()).collect();
            for label in TYPE_CATALOG {
                let marker = if present_lower.contains(&label.to_lowercase()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {label}");
            }
            for key in present
                .iter()
                .filter(|key| !crimelog_core::is_known_type(key))
            {
                println!("+ {key}");
            }
        }
        Command::Locations => {
            for group in service.subcategories(SubcategoryKind::Location)? {
                println!("{} ({})", group.key, group.events.len());
            }
        }
    }

    Ok(())
}

fn print_events(events: &[Event]) {
    for event in events {
        println!("{} ---- {}", event.id, event.name);
    }
}
