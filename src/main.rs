use clap::{Parser, Subcommand};
use fzf_quick_open::commands::*;
use fzf_quick_open::core::{config::Settings, error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fzf-quick-open")]
#[command(about = "Fuzzy file open and search for editor terminals")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Settings file (defaults to config.json in the config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session for an editor plugin over stdin/stdout
    Serve,
    /// Forward selections from stdin to a selection channel
    Topipe {
        /// Record tag: open, add or rg
        tag: String,
        /// Channel address printed by `serve`
        channel: String,
    },
    /// Print a pipeline without running it
    Compose {
        #[command(subcommand)]
        pipeline: ComposeTarget,
        /// Channel address the pipeline forwards to
        #[arg(long, global = true)]
        channel: Option<String>,
        /// Workspace folder (repeatable)
        #[arg(long = "workspace-folder", global = true, value_name = "DIR")]
        workspace_folders: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ComposeTarget {
    /// Pick a file and open it
    File,
    /// Pick a directory and add it to the workspace
    Folder,
    /// Search a pattern with ripgrep and jump to a match
    Search {
        /// Pattern passed to ripgrep
        pattern: String,
    },
}

impl From<ComposeTarget> for Pipeline {
    fn from(target: ComposeTarget) -> Self {
        match target {
            ComposeTarget::File => Pipeline::FileOpen,
            ComposeTarget::Folder => Pipeline::FolderAdd,
            ComposeTarget::Search { pattern } => Pipeline::Search(pattern),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve => execute_serve(cli.config),
        Commands::Topipe { tag, channel } => execute_topipe(&tag, &channel),
        Commands::Compose {
            pipeline,
            channel,
            workspace_folders,
        } => {
            let settings = Settings::from_cli(cli.config.as_deref())?;
            execute_compose(
                &settings,
                &pipeline.into(),
                channel.as_deref(),
                &workspace_folders,
            )
        }
    }
}
