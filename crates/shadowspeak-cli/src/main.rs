use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod speaker;

#[derive(Parser)]
#[command(name = "shadowspeak")]
#[command(about = "ShadowSpeak - rehearse spoken delivery sentence by sentence", long_about = None)]
struct Cli {
    /// Saved scripts file (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split text into practice sentences and print them
    Segment {
        /// Text file to read ("-" or omitted for stdin)
        file: Option<PathBuf>,
        /// Print units as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage saved scripts
    Scripts {
        #[command(subcommand)]
        action: ScriptsAction,
    },
    /// Step through sentences interactively
    Practice {
        /// Text file to practice ("-" for stdin)
        file: Option<PathBuf>,
        /// Saved script to resume instead of reading text
        #[arg(long, conflicts_with = "file")]
        script: Option<String>,
    },
}

#[derive(Subcommand)]
enum ScriptsAction {
    /// List saved scripts
    List,
    /// Show the sentences of a saved script
    Show { id: String },
    /// Segment text and save it as a new script
    Save {
        name: String,
        /// Text file to read ("-" or omitted for stdin)
        file: Option<PathBuf>,
    },
    /// Delete a saved script
    Delete { id: String },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("SHADOWSPEAK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let context = commands::AppContext::load(cli.config, cli.store)?;

    match cli.command {
        Commands::Segment { file, json } => commands::segment::run(file, json)?,
        Commands::Scripts { action } => match action {
            ScriptsAction::List => commands::scripts::list(&context)?,
            ScriptsAction::Show { id } => commands::scripts::show(&context, &id)?,
            ScriptsAction::Save { name, file } => commands::scripts::save(&context, &name, file)?,
            ScriptsAction::Delete { id } => commands::scripts::delete(&context, &id)?,
        },
        Commands::Practice { file, script } => commands::practice::run(&context, file, script)?,
    }

    Ok(())
}
