use validator::ValidateEmail;

use crate::{
    error::{AppError, AppResult},
    profile::Profile,
    storage::ProfileRepository,
};

/// Suffix appended to the base of auto-generated backup names
const BACKUP_SUFFIX: &str = "_backup";
/// Base used when neither email nor name can name a backup
const FALLBACK_BACKUP_BASE: &str = "user";

/// Ordered, name-unique list of profiles written through to a repository
#[derive(Debug)]
pub struct ProfileStore<R: ProfileRepository> {
    profiles: Vec<Profile>,
    repository: R,
}

impl<R: ProfileRepository> ProfileStore<R> {
    /// Loads the store from `repository`, renaming later records that reuse a name
    pub fn load(mut repository: R) -> Self {
        let mut profiles: Vec<Profile> = Vec::new();
        for mut profile in repository.load() {
            if profile.name.is_empty() || profiles.iter().any(|p| p.name == profile.name) {
                let base = if profile.name.is_empty() {
                    FALLBACK_BACKUP_BASE
                } else {
                    profile.name.as_str()
                };
                let renamed = (1u64..)
                    .map(|counter| format!("{}_{}", base, counter))
                    .find(|candidate| !profiles.iter().any(|p| &p.name == candidate))
                    .unwrap_or_default();
                log::warn!("renaming stored profile '{}' to '{}'", profile.name, renamed);
                profile.name = renamed;
            }
            profiles.push(profile);
        }
        log::debug!("loaded {} profiles", profiles.len());
        Self { profiles, repository }
    }

    /// Writes the current profile list to the repository
    pub fn save(&mut self) -> AppResult<()> {
        self.repository.save(&self.profiles)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Appends a new profile and persists
    pub fn add(&mut self, name: &str, git_name: &str, git_email: &str) -> AppResult<()> {
        if name.is_empty() {
            return Err(AppError::Validation("profile name cannot be empty".to_string()));
        }
        if self.contains(name) {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        self.profiles.push(Profile::new(name, git_name, git_email));
        if let Err(err) = self.save() {
            self.profiles.pop();
            return Err(err);
        }

        log::info!("added profile '{}'", name);
        Ok(())
    }

    /// Replaces git name and email of an existing profile in place and persists
    pub fn update(&mut self, name: &str, git_name: &str, git_email: &str) -> AppResult<()> {
        let index = self.position(name)?;

        let previous = self.profiles[index].clone();
        self.profiles[index].git_name = git_name.to_string();
        self.profiles[index].git_email = git_email.to_string();
        if let Err(err) = self.save() {
            self.profiles[index] = previous;
            return Err(err);
        }

        log::info!("updated profile '{}'", name);
        Ok(())
    }

    /// Removes a profile and persists
    pub fn delete(&mut self, name: &str) -> AppResult<Profile> {
        let index = self.position(name)?;

        let removed = self.profiles.remove(index);
        if let Err(err) = self.save() {
            self.profiles.insert(index, removed);
            return Err(err);
        }

        log::info!("deleted profile '{}'", name);
        Ok(removed)
    }

    /// First profile, in stored order, carrying exactly this identity
    pub fn find_by_identity(&self, git_name: &str, git_email: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|profile| profile.matches(git_name, git_email))
    }

    /// Returns `<base>_backup`, or `<base>_backup_<n>` with the smallest free `n`
    pub fn generate_unique_backup_name(&self, base: &str) -> String {
        let backup_name = format!("{}{}", base, BACKUP_SUFFIX);
        if !self.contains(&backup_name) {
            return backup_name;
        }

        let mut counter: u64 = 1;
        loop {
            let candidate = format!("{}_{}", backup_name, counter);
            if !self.contains(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn position(&self, name: &str) -> AppResult<usize> {
        self.profiles
            .iter()
            .position(|profile| profile.name == name)
            .ok_or_else(|| AppError::NotFound(name.to_string()))
    }
}

/// Picks the base of a backup name for an identity.
///
/// Uses the local part of a well-formed email, then the trimmed git name,
/// then a fixed fallback.
pub fn backup_base(git_name: &str, git_email: &str) -> String {
    let email = git_email.trim();
    if email.validate_email() {
        if let Some((local, _)) = email.split_once('@') {
            if !local.is_empty() {
                return local.to_string();
            }
        }
    }

    let name = git_name.trim();
    if !name.is_empty() {
        return name.to_string();
    }

    FALLBACK_BACKUP_BASE.to_string()
}
