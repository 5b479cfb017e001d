use crate::{
    error::{AppError, AppResult},
    git::{GitConfig, Scope},
    profile::{Identity, Profile},
    storage::ProfileRepository,
    store::{ProfileStore, backup_base},
};

/// What happened to the identity that was active before an apply
#[derive(Debug)]
pub enum BackupOutcome {
    /// Nothing was configured for the scope
    NoCurrentIdentity,
    /// The active identity is the one being applied
    SameIdentity,
    /// The active identity is already saved under this profile name
    AlreadySaved(String),
    /// A backup profile was created under this name
    Created(String),
    /// The backup could not be stored; the apply went ahead anyway
    Failed(AppError),
    /// The active identity could not be read, so nothing was backed up
    ReadFailed(AppError),
}

impl BackupOutcome {
    pub fn created(&self) -> Option<&str> {
        match self {
            BackupOutcome::Created(name) => Some(name),
            _ => None,
        }
    }
}

/// Result of a successful apply
#[derive(Debug)]
pub struct ApplyReport {
    pub profile: Profile,
    pub scope: Scope,
    pub backup: BackupOutcome,
}

/// Reconciles saved profiles with the live Git configuration
#[derive(Debug)]
pub struct IdentityController<R: ProfileRepository, G: GitConfig> {
    store: ProfileStore<R>,
    git: G,
}

impl<R: ProfileRepository, G: GitConfig> IdentityController<R, G> {
    pub fn new(store: ProfileStore<R>, git: G) -> Self {
        Self { store, git }
    }

    pub fn store(&self) -> &ProfileStore<R> {
        &self.store
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    pub fn list_profiles(&self) -> &[Profile] {
        self.store.profiles()
    }

    pub fn add_profile(&mut self, name: &str, git_name: &str, git_email: &str) -> AppResult<()> {
        self.store.add(name, git_name, git_email)
    }

    pub fn update_profile(&mut self, name: &str, git_name: &str, git_email: &str) -> AppResult<()> {
        self.store.update(name, git_name, git_email)
    }

    pub fn delete_profile(&mut self, name: &str) -> AppResult<Profile> {
        self.store.delete(name)
    }

    /// Reads the live identity for `scope`
    pub fn get_current(&self, scope: Scope) -> AppResult<Option<Identity>> {
        self.git.read_identity(scope)
    }

    /// Saves the live identity for `scope` as a new profile
    pub fn save_current_as_profile(&mut self, name: &str, scope: Scope) -> AppResult<Profile> {
        let current = self
            .get_current(scope)?
            .ok_or_else(|| AppError::NoIdentity(scope.to_string()))?;

        self.store.add(name, &current.name, &current.email)?;
        Ok(Profile::new(name, &current.name, &current.email))
    }

    /// Switches `scope` to the stored profile `name`, backing up an unsaved live identity first
    pub fn apply_profile(&mut self, name: &str, scope: Scope) -> AppResult<ApplyReport> {
        let profile = self
            .store
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(name.to_string()))?;

        let backup = match self.get_current(scope) {
            Ok(current) => self.backup_if_needed(current.as_ref(), &profile),
            Err(err) => BackupOutcome::ReadFailed(err),
        };
        match &backup {
            BackupOutcome::ReadFailed(err) => {
                log::warn!("could not read current {} identity: {}", scope, err)
            }
            BackupOutcome::Failed(err) => {
                log::warn!("could not back up current {} identity: {}", scope, err)
            }
            _ => {}
        }

        self.git.write_identity(scope, &profile.identity())?;
        log::info!("applied profile '{}' to {} scope", profile.name, scope);

        Ok(ApplyReport {
            profile,
            scope,
            backup,
        })
    }

    /// Stores `current` as a backup profile unless it is absent, equal to `target`, or already saved
    pub fn backup_if_needed(&mut self, current: Option<&Identity>, target: &Profile) -> BackupOutcome {
        let Some(current) = current else {
            return BackupOutcome::NoCurrentIdentity;
        };
        if target.matches(&current.name, &current.email) {
            return BackupOutcome::SameIdentity;
        }
        if let Some(saved) = self.store.find_by_identity(&current.name, &current.email) {
            return BackupOutcome::AlreadySaved(saved.name.clone());
        }

        let backup_name = self
            .store
            .generate_unique_backup_name(&backup_base(&current.name, &current.email));
        match self.store.add(&backup_name, &current.name, &current.email) {
            Ok(()) => {
                log::info!("backed up {} as '{}'", current, backup_name);
                BackupOutcome::Created(backup_name)
            }
            Err(err) => BackupOutcome::Failed(err),
        }
    }
}
