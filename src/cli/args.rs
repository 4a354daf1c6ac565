//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Browse competitions and experiments, create projects, run simulated experiments
#[derive(Parser, Debug)]
#[command(name = "compws")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Workspace directory holding .compws.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub workspace: Option<PathBuf>,

    /// Catalog TOML file (overrides `data_file` from config)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Say hello
    Hello,

    /// Show competitions and experiments as a tree
    Tree,

    /// Invalidate and re-render the tree
    Refresh,

    /// Create a project (name and framework are prompted when omitted)
    Create {
        /// Project name (no whitespace)
        name: Option<String>,
        /// Framework to use
        #[arg(short, long)]
        framework: Option<String>,
    },

    /// Run a simulated experiment with progress (Ctrl-C cancels)
    Run {
        /// Competition name (picked interactively when omitted)
        competition: Option<String>,
        /// Experiment name (picked interactively when omitted)
        experiment: Option<String>,
    },

    /// Show experiment details
    Details {
        /// Competition name (picked interactively when omitted)
        competition: Option<String>,
        /// Experiment name (picked interactively when omitted)
        experiment: Option<String>,
        /// Print details instead of showing a picker
        #[arg(short, long)]
        print: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Print a config template
    Template,
}
