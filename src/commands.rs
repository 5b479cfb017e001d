use colored::Colorize;

use crate::{
    controller::{ApplyReport, BackupOutcome, IdentityController},
    error::{AppError, AppResult},
    git::{GitConfig, Scope},
    profile::Profile,
    storage::ProfileRepository,
    validation::{
        validate_input_git_email, validate_input_git_name, validate_profile_fields,
        validate_profile_name,
    },
};

/// Checks if any profiles exist in storage
///
/// # Arguments
/// * `profiles` - Profiles to check
pub fn check_if_profiles_exist(profiles: &[Profile]) -> AppResult<()> {
    if profiles.is_empty() {
        return Err(AppError::Validation("no profiles found".to_string()));
    }
    Ok(())
}

/// Formats one profile as a table row
pub fn format_profile(profile: &Profile) -> String {
    format!("{:20} | {:20} | {}", profile.name, profile.git_name, profile.git_email)
}

/// Lists all saved profiles
pub fn list_profiles<R: ProfileRepository, G: GitConfig>(
    controller: &IdentityController<R, G>,
) -> AppResult<()> {
    let profiles = controller.list_profiles();
    check_if_profiles_exist(profiles)?;

    for profile in profiles {
        println!("{}", format_profile(profile));
    }
    Ok(())
}

/// Adds a new profile
pub fn add_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    name: &str,
    git_name: &str,
    git_email: &str,
) -> AppResult<()> {
    let (name, git_name, git_email) = (name.trim(), git_name.trim(), git_email.trim());
    validate_profile_fields(name, git_name, git_email)?;

    controller.add_profile(name, git_name, git_email)?;
    println!("{} {}", "added profile:".green(), name);
    Ok(())
}

/// Updates an existing profile
pub fn update_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    name: &str,
    git_name: &str,
    git_email: &str,
) -> AppResult<()> {
    let (name, git_name, git_email) = (name.trim(), git_name.trim(), git_email.trim());
    validate_input_git_name(git_name)?;
    validate_input_git_email(git_email)?;

    controller.update_profile(name, git_name, git_email)?;
    println!("{} {}", "updated profile:".green(), name);
    Ok(())
}

/// Deletes a profile
pub fn delete_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    name: &str,
) -> AppResult<()> {
    let removed = controller.delete_profile(name)?;
    println!("{} {}", "deleted profile:".green(), removed.name);
    Ok(())
}

/// Applies a profile to the given scope
pub fn apply_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    name: &str,
    scope: Scope,
) -> AppResult<()> {
    let report = controller.apply_profile(name, scope)?;
    print_apply_report(&report);
    Ok(())
}

fn print_apply_report(report: &ApplyReport) {
    let target = match report.scope {
        Scope::Local => "to repository",
        Scope::Global => "globally",
    };
    println!(
        "{} '{}' {}: {}",
        "applied profile".green(),
        report.profile.name,
        target,
        report.profile.identity()
    );

    match &report.backup {
        BackupOutcome::Created(backup_name) => println!(
            "{} '{}'",
            "previous identity backed up as".yellow(),
            backup_name
        ),
        BackupOutcome::Failed(err) => println!(
            "{} {}",
            "warning: previous identity was not backed up:".yellow(),
            err
        ),
        BackupOutcome::ReadFailed(err) => println!(
            "{} {}",
            "warning: previous identity could not be read:".yellow(),
            err
        ),
        _ => {}
    }
}

/// Shows the current identity for one scope, or both when `scope` is `None`
pub fn show_current<R: ProfileRepository, G: GitConfig>(
    controller: &IdentityController<R, G>,
    scope: Option<Scope>,
) -> AppResult<()> {
    let scopes: Vec<Scope> = match scope {
        Some(scope) => vec![scope],
        None => vec![Scope::Local, Scope::Global],
    };

    for scope in scopes {
        let label = format!("current {} user:", scope);
        match controller.get_current(scope)? {
            Some(identity) => {
                let saved = controller
                    .store()
                    .find_by_identity(&identity.name, &identity.email)
                    .map(|profile| format!(" [{}]", profile.name))
                    .unwrap_or_default();
                println!("{} {}{}", label.blue(), identity, saved);
            }
            None => println!("{} {}", label.blue(), "not configured".dimmed()),
        }
    }
    Ok(())
}

/// Saves the current identity as a new profile
pub fn save_current<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    name: &str,
    scope: Scope,
) -> AppResult<()> {
    let name = name.trim();
    validate_profile_name(name)?;

    let profile = controller.save_current_as_profile(name, scope)?;
    println!(
        "{} '{}': {}",
        "saved current identity as".green(),
        profile.name,
        profile.identity()
    );
    Ok(())
}
