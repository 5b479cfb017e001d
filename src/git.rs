use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use crate::{
    error::{AppError, AppResult},
    profile::Identity,
};

/// Git config key holding the author name
const USER_NAME_KEY: &str = "user.name";
/// Git config key holding the author email
const USER_EMAIL_KEY: &str = "user.email";
/// Exit status of `git config --get` when the key is unset
const GIT_CONFIG_KEY_MISSING: i32 = 1;
/// Exit status of `git config --unset` when the key is already unset
const GIT_CONFIG_NOTHING_TO_UNSET: i32 = 5;

/// Git configuration level an identity is read from or written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Repository containing the working directory
    Local,
    /// User-wide configuration
    Global,
}

impl Scope {
    pub fn from_global_flag(global: bool) -> Self {
        if global { Scope::Global } else { Scope::Local }
    }

    fn flag(self) -> &'static str {
        match self {
            Scope::Local => "--local",
            Scope::Global => "--global",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => write!(f, "local"),
            Scope::Global => write!(f, "global"),
        }
    }
}

/// Access to the identity stored in Git's configuration
pub trait GitConfig {
    /// Reads name and email for `scope`; `None` unless both are set
    fn read_identity(&self, scope: Scope) -> AppResult<Option<Identity>>;
    /// Writes name and email for `scope`.
    ///
    /// Fails with [`AppError::NoRepository`] for local scope outside a repository.
    fn write_identity(&self, scope: Scope, identity: &Identity) -> AppResult<()>;
}

/// [`GitConfig`] backed by the `git` executable run in a fixed working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Runs git with `args` inside the working directory
    fn git(&self, args: &[&str]) -> AppResult<Output> {
        log::debug!("running git {} in {}", args.join(" "), self.work_dir.display());
        Command::new("git")
            .arg("-C")
            .arg(&self.work_dir)
            .args(args)
            .output()
            .map_err(|err| AppError::Access(format!("failed to run git: {}", err)))
    }

    /// Checks if the working directory is in a Git repository for executing Git commands
    pub fn is_inside_git_repo(&self) -> AppResult<bool> {
        let git_command_output: Output = self.git(&["rev-parse", "--is-inside-work-tree"])?;

        if !git_command_output.status.success() {
            return Ok(false);
        }

        let value = String::from_utf8_lossy(&git_command_output.stdout);
        Ok(value.trim() == "true")
    }

    /// Executes Git config get command
    ///
    /// # Arguments
    /// * `scope` - Config level to read
    /// * `key` - Git config key (user.name or user.email)
    fn get_git_config(&self, scope: Scope, key: &str) -> AppResult<Option<String>> {
        let git_command_output: Output = self.git(&["config", scope.flag(), "--get", key])?;

        if git_command_output.status.code() == Some(GIT_CONFIG_KEY_MISSING) {
            return Ok(None);
        }
        if !git_command_output.status.success() {
            return Err(AppError::Access(stderr_message(&git_command_output)));
        }

        let value = strip_line_ending(&String::from_utf8_lossy(&git_command_output.stdout));
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    /// Executes a Git config set command
    ///
    /// # Arguments
    /// * `scope` - Config level to write
    /// * `key` - Git config key to set (user.name or user.email)
    /// * `value` - Value to set for key (username or email)
    fn set_git_config(&self, scope: Scope, key: &str, value: &str) -> AppResult<()> {
        let git_command_output: Output = self.git(&["config", scope.flag(), key, value])?;

        if !git_command_output.status.success() {
            return Err(AppError::Access(stderr_message(&git_command_output)));
        }

        Ok(())
    }

    /// Puts `key` back to `previous`, unsetting it when there was no value
    fn restore_git_config(&self, scope: Scope, key: &str, previous: Option<&str>) -> AppResult<()> {
        let Some(previous) = previous else {
            let git_command_output: Output = self.git(&["config", scope.flag(), "--unset", key])?;
            if !git_command_output.status.success()
                && git_command_output.status.code() != Some(GIT_CONFIG_NOTHING_TO_UNSET)
            {
                return Err(AppError::Access(stderr_message(&git_command_output)));
            }
            return Ok(());
        };
        self.set_git_config(scope, key, previous)
    }
}

impl GitConfig for GitCli {
    fn read_identity(&self, scope: Scope) -> AppResult<Option<Identity>> {
        if scope == Scope::Local && !self.is_inside_git_repo()? {
            return Ok(None);
        }

        let name = self.get_git_config(scope, USER_NAME_KEY)?;
        let email = self.get_git_config(scope, USER_EMAIL_KEY)?;
        Ok(match (name, email) {
            (Some(name), Some(email)) => Some(Identity { name, email }),
            _ => None,
        })
    }

    fn write_identity(&self, scope: Scope, identity: &Identity) -> AppResult<()> {
        if scope == Scope::Local && !self.is_inside_git_repo()? {
            return Err(AppError::NoRepository);
        }

        let previous_name = self.get_git_config(scope, USER_NAME_KEY)?;
        self.set_git_config(scope, USER_NAME_KEY, &identity.name)?;
        if let Err(err) = self.set_git_config(scope, USER_EMAIL_KEY, &identity.email) {
            log::warn!("failed to write {} user.email, restoring user.name", scope);
            if let Err(restore_err) =
                self.restore_git_config(scope, USER_NAME_KEY, previous_name.as_deref())
            {
                log::error!(
                    "{} user.name left as '{}' after failed restore: {}",
                    scope,
                    identity.name,
                    restore_err
                );
            }
            return Err(err);
        }
        log::debug!("wrote {} identity {}", scope, identity);
        Ok(())
    }
}

/// Drops the newline git prints after a config value, keeping other whitespace
fn strip_line_ending(raw: &str) -> String {
    raw.strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(raw)
        .to_string()
}

fn stderr_message(output: &Output) -> String {
    let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if message.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn init_repository() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let output = Command::new("git")
            .arg("-C")
            .arg(dir.path())
            .args(["init", "--quiet"])
            .output()
            .expect("git init should run");
        assert!(output.status.success(), "git init should succeed");
        dir
    }

    #[test]
    fn scope_from_flag() {
        assert_eq!(Scope::from_global_flag(true), Scope::Global);
        assert_eq!(Scope::from_global_flag(false), Scope::Local);
        assert_eq!(Scope::Local.to_string(), "local");
        assert_eq!(Scope::Global.flag(), "--global");
    }

    #[test]
    fn strips_only_line_ending() {
        assert_eq!(strip_line_ending("john\n"), "john");
        assert_eq!(strip_line_ending("john\r\n"), "john");
        assert_eq!(strip_line_ending(" john \n"), " john ");
        assert_eq!(strip_line_ending("john"), "john");
    }

    #[test]
    fn local_scope_outside_repository() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let git = GitCli::new(dir.path());

        assert!(!git.is_inside_git_repo().expect("rev-parse should run"));
        assert_eq!(git.read_identity(Scope::Local).expect("read should work"), None);
        assert!(matches!(
            git.write_identity(Scope::Local, &Identity::new("john", "john@corp.com")),
            Err(AppError::NoRepository)
        ));
    }

    #[test]
    fn unset_local_identity_reads_absent() {
        if !git_available() {
            return;
        }
        let repo = init_repository();
        let git = GitCli::new(repo.path());

        assert!(git.is_inside_git_repo().expect("rev-parse should run"));
        assert_eq!(
            git.get_git_config(Scope::Local, USER_NAME_KEY).expect("read should work"),
            None
        );
        assert_eq!(git.read_identity(Scope::Local).expect("read should work"), None);
    }

    #[test]
    fn local_identity_round_trip() {
        if !git_available() {
            return;
        }
        let repo = init_repository();
        let git = GitCli::new(repo.path());
        let identity = Identity::new(" Jürgen Müller ", "jürgen@bücher.de");

        git.write_identity(Scope::Local, &identity)
            .expect("write should work");

        assert_eq!(
            git.read_identity(Scope::Local).expect("read should work"),
            Some(identity)
        );
    }

    #[test]
    fn restore_unsets_or_resets_value() {
        if !git_available() {
            return;
        }
        let repo = init_repository();
        let git = GitCli::new(repo.path());

        git.set_git_config(Scope::Local, USER_NAME_KEY, "new")
            .expect("write should work");
        git.restore_git_config(Scope::Local, USER_NAME_KEY, Some("old"))
            .expect("restore should work");
        assert_eq!(
            git.get_git_config(Scope::Local, USER_NAME_KEY).expect("read should work"),
            Some("old".to_string())
        );

        git.restore_git_config(Scope::Local, USER_NAME_KEY, None)
            .expect("restore should work");
        git.restore_git_config(Scope::Local, USER_NAME_KEY, None)
            .expect("unsetting twice should work");
        assert_eq!(
            git.get_git_config(Scope::Local, USER_NAME_KEY).expect("read should work"),
            None
        );
    }
}
