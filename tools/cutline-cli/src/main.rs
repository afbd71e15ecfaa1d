//! Cutline CLI — apply editing commands to a session and plan exports.
//!
//! Usage:
//!   cutline init <SESSION> --duration <SECS>   Create a session file
//!   cutline info <SESSION>                     Show session information
//!   cutline command <SESSION> <TEXT>...        Apply a free-text editing command
//!   cutline remove <SESSION> <ID>              Remove one decision
//!   cutline clear <SESSION>                    Remove all decisions
//!   cutline preview <SESSION>                  Show the preview timeline
//!   cutline map <SESSION> --original <T>       Convert between time bases
//!   cutline plan <SESSION>                     Show the export plan
//!   cutline shell <SESSION>                    Interactive editing with undo/redo

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cutline_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "cutline",
    about = "Non-destructive, command-driven video edit planning",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/cutline/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new session file
    Init {
        /// Session file to create
        path: PathBuf,

        /// Media duration in seconds
        #[arg(short, long)]
        duration: f64,

        /// Session name (defaults to the file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// JSON file with an array of analysis annotations
        #[arg(long)]
        annotations: Option<PathBuf>,

        /// JSON file with an array of transcript segments
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show session information
    Info {
        /// Path to the session file
        path: PathBuf,
    },

    /// Apply a free-text editing command
    Command {
        /// Path to the session file
        path: PathBuf,

        /// Command text, e.g. "remove all silence"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Show the resulting edits without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a decision by id
    Remove {
        /// Path to the session file
        path: PathBuf,

        /// Decision id
        id: String,
    },

    /// Remove all decisions
    Clear {
        /// Path to the session file
        path: PathBuf,
    },

    /// Show the preview timeline
    Preview {
        /// Path to the session file
        path: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Convert a time between original and preview time
    Map {
        /// Path to the session file
        path: PathBuf,

        #[command(flatten)]
        time: MapTime,
    },

    /// Show the export plan
    Plan {
        /// Path to the session file
        path: PathBuf,

        /// Source media, to print a full transcoder command
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the transcoder command
        #[arg(short, long, default_value = "output.mp4")]
        output: PathBuf,

        /// Plan video only
        #[arg(long)]
        no_audio: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Edit interactively with undo/redo
    Shell {
        /// Path to the session file
        path: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct MapTime {
    /// Original media time in seconds
    #[arg(long)]
    original: Option<f64>,

    /// Preview time in seconds
    #[arg(long)]
    preview: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => {
            let config = AppConfig::load_from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?;
            (config, None)
        }
        None => match AppConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    cutline_common::logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
    }

    match cli.command {
        Commands::Init {
            path,
            duration,
            name,
            annotations,
            transcript,
            force,
        } => commands::init::run(path, duration, name, annotations, transcript, force),
        Commands::Info { path } => commands::info::run(path, &config),
        Commands::Command {
            path,
            text,
            dry_run,
        } => commands::command::run(path, text.join(" "), dry_run, &config).await,
        Commands::Remove { path, id } => commands::remove::run(path, id, &config),
        Commands::Clear { path } => commands::clear::run(path, &config),
        Commands::Preview { path, json } => commands::preview::run(path, json),
        Commands::Map { path, time } => commands::map::run(path, time.original, time.preview),
        Commands::Plan {
            path,
            input,
            output,
            no_audio,
            json,
        } => commands::plan::run(path, input, output, !no_audio, json),
        Commands::Shell { path } => commands::shell::run(path, &config).await,
    }
}
