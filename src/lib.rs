pub mod cli;
pub mod commands;
pub mod controller;
pub mod error;
pub mod git;
pub mod logs;
pub mod menu;
pub mod profile;
pub mod storage;
pub mod store;
pub mod validation;

use std::path::PathBuf;

use cli::{Cli, Commands};
use controller::IdentityController;
use error::{AppError, AppResult};
use git::{GitCli, Scope};
use storage::{JsonFileRepository, get_global_profile_path};
use store::ProfileStore;

pub use controller::{ApplyReport, BackupOutcome};
pub use profile::{Identity, Profile};

/// Menu entry for returning to the previous menu; reserved as a profile name
pub const BACK_OPTION: &str = "back";

/// Controller wired to the JSON profiles file and the `git` executable
pub type AppController = IdentityController<JsonFileRepository, GitCli>;

/// Builds the controller for the given profiles file and repository directory
pub fn bootstrap(profiles_file: Option<PathBuf>, repo: Option<PathBuf>) -> AppResult<AppController> {
    let profiles_path = match profiles_file {
        Some(path) => path,
        None => get_global_profile_path()?,
    };
    let work_dir = match repo {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|err| AppError::Access(format!("failed to read current directory: {}", err)))?,
    };
    log::debug!("using profiles file {}", profiles_path.display());

    let store = ProfileStore::load(JsonFileRepository::new(profiles_path));
    Ok(IdentityController::new(store, GitCli::new(work_dir)))
}

/// Executes the parsed command line
pub fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profiles_file,
        repo,
        verbose: _,
        command,
    } = cli;

    let mut controller = bootstrap(profiles_file, repo)?;

    match command {
        Some(Commands::List) => commands::list_profiles(&controller),
        Some(Commands::Add {
            name,
            git_name,
            git_email,
        }) => commands::add_profile(&mut controller, &name, &git_name, &git_email),
        Some(Commands::Update {
            name,
            git_name,
            git_email,
        }) => commands::update_profile(&mut controller, &name, &git_name, &git_email),
        Some(Commands::Delete { name }) => commands::delete_profile(&mut controller, &name),
        Some(Commands::Apply { name, global }) => {
            commands::apply_profile(&mut controller, &name, Scope::from_global_flag(global))
        }
        Some(Commands::Current { global, local }) => {
            let scope = match (global, local) {
                (true, _) => Some(Scope::Global),
                (_, true) => Some(Scope::Local),
                _ => None,
            };
            commands::show_current(&controller, scope)
        }
        Some(Commands::Save { name, global }) => {
            commands::save_current(&mut controller, &name, Scope::from_global_flag(global))
        }
        None => menu::run_menu(&mut controller),
    }
}
