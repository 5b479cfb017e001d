#![allow(dead_code)]

use std::cell::RefCell;

use gitswap::{
    Identity, Profile,
    error::{AppError, AppResult},
    git::{GitConfig, Scope},
    storage::ProfileRepository,
};

/// In-process stand-in for Git's configuration
#[derive(Debug, Default)]
pub struct FakeGit {
    pub in_repository: bool,
    pub fail_reads: bool,
    pub local: RefCell<Option<Identity>>,
    pub global: RefCell<Option<Identity>>,
}

impl FakeGit {
    pub fn in_repository() -> Self {
        Self {
            in_repository: true,
            ..Self::default()
        }
    }

    pub fn outside_repository() -> Self {
        Self::default()
    }

    pub fn with_local(self, name: &str, email: &str) -> Self {
        *self.local.borrow_mut() = Some(Identity::new(name, email));
        self
    }

    pub fn with_global(self, name: &str, email: &str) -> Self {
        *self.global.borrow_mut() = Some(Identity::new(name, email));
        self
    }

    fn slot(&self, scope: Scope) -> &RefCell<Option<Identity>> {
        match scope {
            Scope::Local => &self.local,
            Scope::Global => &self.global,
        }
    }
}

impl GitConfig for FakeGit {
    fn read_identity(&self, scope: Scope) -> AppResult<Option<Identity>> {
        if self.fail_reads {
            return Err(AppError::Access("permission denied".to_string()));
        }
        if scope == Scope::Local && !self.in_repository {
            return Ok(None);
        }
        Ok(self.slot(scope).borrow().clone())
    }

    fn write_identity(&self, scope: Scope, identity: &Identity) -> AppResult<()> {
        if scope == Scope::Local && !self.in_repository {
            return Err(AppError::NoRepository);
        }
        *self.slot(scope).borrow_mut() = Some(identity.clone());
        Ok(())
    }
}

/// Repository whose writes always fail
#[derive(Debug, Default)]
pub struct ReadOnlyRepository {
    pub profiles: Vec<Profile>,
}

impl ProfileRepository for ReadOnlyRepository {
    fn load(&mut self) -> Vec<Profile> {
        self.profiles.clone()
    }

    fn save(&mut self, _profiles: &[Profile]) -> AppResult<()> {
        Err(AppError::Persistence("read-only file system".to_string()))
    }
}
