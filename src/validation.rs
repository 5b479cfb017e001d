use colored::Colorize;
use inquire::Text;

use crate::{BACK_OPTION, error::AppError, profile::Profile};

/// Prompts user for input until valid input is provided
///
/// Input is trimmed before validation. `initial` pre-fills the prompt.
pub fn prompt_until_valid<F>(
    prompt_message: &str,
    initial: Option<&str>,
    input_validation: F,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Result<(), AppError>,
{
    loop {
        let mut prompt = Text::new(prompt_message);
        if let Some(initial) = initial {
            prompt = prompt.with_initial_value(initial);
        }
        let input: String = prompt.prompt()?.trim().to_string();
        match input_validation(&input) {
            Ok(_) => break Ok(input),
            Err(AppError::Validation(msg)) => println!("{}", msg.red()),
            Err(AppError::DuplicateName(name)) => {
                println!("{}", format!("profile '{}' already exists", name).red())
            }
            Err(e) => return Err(e),
        }
    }
}

// Validate input helper functions

/// Validates a user-chosen profile name
pub fn validate_profile_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(AppError::Validation("Profile name cannot be empty".to_string()))
    } else if name == BACK_OPTION {
        Err(AppError::Validation(format!("Profile name cannot be '{}'", BACK_OPTION)))
    } else {
        Ok(())
    }
}

/// Validates a new profile name against the stored profiles
pub fn validate_input_profile_name(name: &str, existing: &[Profile]) -> Result<(), AppError> {
    validate_profile_name(name)?;
    if existing.iter().any(|profile| profile.name == name) {
        return Err(AppError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Validates git username input
pub fn validate_input_git_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(AppError::Validation("Git name cannot be empty".to_string()))
    } else {
        Ok(())
    }
}

/// Validates git email input
pub fn validate_input_git_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        Err(AppError::Validation("Git email cannot be empty".to_string()))
    } else {
        Ok(())
    }
}

/// Validates all fields of a profile given on the command line
pub fn validate_profile_fields(name: &str, git_name: &str, git_email: &str) -> Result<(), AppError> {
    validate_profile_name(name)?;
    validate_input_git_name(git_name)?;
    validate_input_git_email(git_email)
}
