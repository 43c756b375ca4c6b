mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vaxtrack_core::Child;
use vaxtrack_core::tracker::Tracker;

#[derive(Parser)]
#[command(name = "vaxtrack")]
#[command(about = "Track your children's vaccinations and export the schedule to your calendar")]
struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a child and show their schedule
    Add {
        /// Child's name
        name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
    },
    /// Change a child's name or date of birth
    Edit {
        /// Child id or name
        child: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
    },
    /// Dashboard of every child with overdue and upcoming counts
    List {
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a child's vaccination schedule
    Show {
        /// Child id or name (defaults to default_child, then the latest added)
        #[arg(short, long)]
        child: Option<String>,
    },
    /// Mark a milestone's vaccines as given
    Complete {
        /// Milestone age label (e.g. "Birth", "6 Weeks", "6-9 Months")
        age: String,

        /// Child id or name
        #[arg(short, long)]
        child: Option<String>,

        /// Date given (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Only mark these vaccines (repeatable, defaults to the whole milestone)
        #[arg(long = "vaccine")]
        vaccines: Vec<String>,
    },
    /// Delete a child
    Delete {
        /// Child id or name
        child: String,

        /// Keep the child's vaccination records on disk
        #[arg(long)]
        keep_data: bool,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Write the schedule as an .ics calendar file
    Ics {
        /// Child id or name
        #[arg(short, long)]
        child: Option<String>,

        /// Only export this milestone
        #[arg(short, long)]
        milestone: Option<String>,

        /// Output path (defaults to <Name>-vaccination-schedule.ics)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export all data as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a JSON backup made with `export`
    Import {
        file: PathBuf,
    },
    /// Delete every child and vaccination record
    Reset {
        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show config and data paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = chrono::Local::now().date_naive();
    tracing::debug!(%today, "Starting");

    match cli.command {
        Commands::Add { name, dob } => {
            let mut tracker = Tracker::load()?;
            commands::add::run(&mut tracker, &name, &dob, today)
        }
        Commands::Edit { child, name, dob } => {
            let mut tracker = Tracker::load()?;
            let child = resolve_child(&tracker, Some(&child))?;
            commands::edit::run(&mut tracker, &child, name.as_deref(), dob.as_deref(), today)
        }
        Commands::List { json } => {
            let tracker = Tracker::load()?;
            commands::list::run(&tracker, today, json)
        }
        Commands::Show { child } => {
            let tracker = Tracker::load()?;
            let child = resolve_child(&tracker, child.as_deref())?;
            commands::show::run(&tracker, &child, today)
        }
        Commands::Complete {
            age,
            child,
            date,
            vaccines,
        } => {
            let mut tracker = Tracker::load()?;
            let child = resolve_child(&tracker, child.as_deref())?;
            let date = date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
            commands::complete::run(&mut tracker, &child, &age, &vaccines, &date, today)
        }
        Commands::Delete {
            child,
            keep_data,
            force,
        } => {
            let mut tracker = Tracker::load()?;
            let child = resolve_child(&tracker, Some(&child))?;
            commands::delete::run(&mut tracker, &child, keep_data, force)
        }
        Commands::Ics {
            child,
            milestone,
            output,
        } => {
            let tracker = Tracker::load()?;
            let child = resolve_child(&tracker, child.as_deref())?;
            commands::ics::run(&tracker, &child, milestone.as_deref(), output)
        }
        Commands::Export { output } => {
            let tracker = Tracker::load()?;
            commands::backup::export(&tracker, output)
        }
        Commands::Import { file } => {
            let mut tracker = Tracker::load()?;
            commands::backup::import(&mut tracker, &file)
        }
        Commands::Reset { force } => {
            let mut tracker = Tracker::load()?;
            commands::reset::run(&mut tracker, force)
        }
        Commands::Config => commands::config::run(),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve a child by id or name, falling back to the default child.
fn resolve_child(tracker: &Tracker, query: Option<&str>) -> Result<Child> {
    if let Some(query) = query {
        return Ok(tracker.resolve_child(query)?);
    }

    match tracker.default_child() {
        Some(child) => Ok(child),
        None => anyhow::bail!(
            "No children found.\n\n\
            Add your first child with:\n  \
            vaxtrack add <name> --dob YYYY-MM-DD\n\n\
            Example:\n  \
            vaxtrack add \"Asha\" --dob 2024-01-15"
        ),
    }
}
