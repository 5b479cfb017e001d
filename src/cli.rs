use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(name = "gitswap", version, about)]
pub struct Cli {
    /// Profiles file to use instead of ~/.git_profile_manager.json
    #[arg(long, global = true, env = "GIT_PROFILES_FILE")]
    pub profiles_file: Option<PathBuf>,
    /// Repository directory for local scope (defaults to the current directory)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists all saved profiles
    List,
    /// Adds a new profile
    Add {
        /// Unique profile name
        name: String,
        /// Git username
        git_name: String,
        /// Git email
        git_email: String,
    },
    /// Replaces name and email of a saved profile
    Update {
        /// Profile to update
        name: String,
        /// New Git username
        git_name: String,
        /// New Git email
        git_email: String,
    },
    /// Deletes a saved profile
    Delete {
        /// Profile to delete
        name: String,
    },
    /// Applies a profile, backing up the current identity if it is not saved
    Apply {
        /// Profile to apply
        name: String,
        /// Write the global config instead of the repository config
        #[arg(long)]
        global: bool,
    },
    /// Displays the current Git identity
    Current {
        /// Only show the global identity
        #[arg(long, conflicts_with = "local")]
        global: bool,
        /// Only show the repository identity
        #[arg(long)]
        local: bool,
    },
    /// Saves the current Git identity as a new profile
    Save {
        /// Name for the new profile
        name: String,
        /// Read the global identity instead of the repository identity
        #[arg(long)]
        global: bool,
    },
}
