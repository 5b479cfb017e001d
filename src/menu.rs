use colored::Colorize;
use inquire::Select;

use crate::{
    BACK_OPTION,
    commands::{
        add_profile, apply_profile, check_if_profiles_exist, delete_profile, list_profiles,
        show_current, update_profile,
    },
    controller::IdentityController,
    error::AppError,
    git::{GitConfig, Scope},
    profile::{Identity, Profile},
    storage::ProfileRepository,
    validation::{
        prompt_until_valid, validate_input_git_email, validate_input_git_name,
        validate_input_profile_name,
    },
};

const APPLY_LOCAL: &str = "apply profile (repository)";
const APPLY_GLOBAL: &str = "apply profile (global)";
const ADD: &str = "add profile";
const ADD_FROM_CURRENT: &str = "add profile from current config";
const UPDATE: &str = "update profile";
const DELETE: &str = "delete profile";
const SHOW_CURRENT: &str = "show current identity";
const SHOW_ALL: &str = "show all profiles";
const QUIT: &str = "quit";

/// Runs interactive menu interface
///
/// Failed actions are reported and the menu keeps running; only prompt failures end it.
pub fn run_menu<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
) -> Result<(), AppError> {
    loop {
        let actions: Vec<&'static str> = vec![
            APPLY_LOCAL,
            APPLY_GLOBAL,
            ADD,
            ADD_FROM_CURRENT,
            UPDATE,
            DELETE,
            SHOW_CURRENT,
            SHOW_ALL,
            QUIT,
        ];

        let action_selected: &'static str =
            Select::new(&format!("{}", "select action".blue()), actions).prompt()?;

        let result = match action_selected {
            APPLY_LOCAL => menu_apply_profile(controller, Scope::Local),
            APPLY_GLOBAL => menu_apply_profile(controller, Scope::Global),
            ADD => menu_add_profile(controller, None),
            ADD_FROM_CURRENT => menu_add_from_current(controller),
            UPDATE => menu_update_profile(controller),
            DELETE => menu_delete_profile(controller),
            SHOW_CURRENT => show_current(controller, None),
            SHOW_ALL => list_profiles(controller),
            QUIT => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
            _ => unreachable!("unexpected input"),
        };

        match result {
            Ok(()) => {}
            Err(err @ AppError::Inquire(_)) => return Err(err),
            Err(err) => println!("{}", err.to_string().red()),
        }
    }
}

/// Menu for applying a profile
fn menu_apply_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    scope: Scope,
) -> Result<(), AppError> {
    let Some(name) = select_profile(controller.list_profiles(), "select profile to apply:")?
    else {
        return Ok(());
    };
    apply_profile(controller, &name, scope)
}

/// Menu for adding a new profile, optionally pre-filled from an identity
fn menu_add_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
    prefill: Option<&Identity>,
) -> Result<(), AppError> {
    let existing: Vec<Profile> = controller.list_profiles().to_vec();

    // Input validation
    let name: String = prompt_until_valid(
        &format!("{}", "enter profile name:".blue()),
        prefill.map(|identity| identity.name.as_str()),
        |input| validate_input_profile_name(input, &existing),
    )?;

    let git_name: String = prompt_until_valid(
        &format!("{}", "enter git username:".blue()),
        prefill.map(|identity| identity.name.as_str()),
        validate_input_git_name,
    )?;

    let git_email: String = prompt_until_valid(
        &format!("{}", "enter git email:".blue()),
        prefill.map(|identity| identity.email.as_str()),
        validate_input_git_email,
    )?;

    add_profile(controller, &name, &git_name, &git_email)
}

/// Menu for adding a profile pre-filled with the current identity
fn menu_add_from_current<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
) -> Result<(), AppError> {
    let current = match controller.get_current(Scope::Local)? {
        Some(identity) => identity,
        None => controller
            .get_current(Scope::Global)?
            .ok_or_else(|| AppError::NoIdentity("local or global".to_string()))?,
    };

    if let Some(saved) = controller
        .store()
        .find_by_identity(&current.name, &current.email)
    {
        println!(
            "{} '{}'",
            "current identity is already saved as".yellow(),
            saved.name
        );
    }

    menu_add_profile(controller, Some(&current))
}

/// Menu for updating a profile
fn menu_update_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
) -> Result<(), AppError> {
    let Some(name) = select_profile(controller.list_profiles(), "select profile to update:")?
    else {
        return Ok(());
    };
    let Some(profile) = controller.store().get(&name).cloned() else {
        return Err(AppError::NotFound(name));
    };

    let git_name: String = prompt_until_valid(
        &format!("{}", "enter git username:".blue()),
        Some(profile.git_name.as_str()),
        validate_input_git_name,
    )?;
    let git_email: String = prompt_until_valid(
        &format!("{}", "enter git email:".blue()),
        Some(profile.git_email.as_str()),
        validate_input_git_email,
    )?;

    update_profile(controller, &name, &git_name, &git_email)
}

/// Menu for deleting a profile
fn menu_delete_profile<R: ProfileRepository, G: GitConfig>(
    controller: &mut IdentityController<R, G>,
) -> Result<(), AppError> {
    let Some(name) = select_profile(controller.list_profiles(), "select profile to delete:")?
    else {
        return Ok(());
    };
    delete_profile(controller, &name)
}

/// Lets the user pick a profile name; `None` when they choose to go back
fn select_profile(profiles: &[Profile], message: &str) -> Result<Option<String>, AppError> {
    check_if_profiles_exist(profiles)?;

    let profile_names: Vec<String> = build_name_list(profiles);
    let selected: String = Select::new(&format!("{}", message.blue()), profile_names).prompt()?;

    if selected == BACK_OPTION {
        return Ok(None);
    }
    Ok(Some(selected))
}

/// Builds list of profile names for menu to display
pub fn build_name_list(profiles: &[Profile]) -> Vec<String> {
    let mut profile_names: Vec<String> = profiles
        .iter()
        .map(|profile| profile.name.clone())
        .collect();
    profile_names.push(BACK_OPTION.to_string());
    profile_names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_list_ends_with_back() {
        let profiles = vec![
            Profile::new("work", "john", "john@corp.com"),
            Profile::new("home", "john", "john@home.org"),
        ];
        assert_eq!(build_name_list(&profiles), vec!["work", "home", "back"]);
    }
}
