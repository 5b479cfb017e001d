use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A profile with this name is already stored
    #[error("profile already exists: '{0}'")]
    DuplicateName(String),
    /// Operation on a profile name that is not stored
    #[error("profile not found: '{0}'")]
    NotFound(String),
    /// Profiles file could not be written or serialized
    #[error("failed to persist profiles: {0}")]
    Persistence(String),
    /// Git configuration could not be read or written
    #[error("git config access failed: {0}")]
    Access(String),
    /// Local scope used outside of a Git repository
    #[error("not in git repository")]
    NoRepository,
    /// No identity is configured for the requested scope
    #[error("no git identity configured for {0} scope")]
    NoIdentity(String),
    /// Error during input validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// Logger could not be set up
    #[error("logging error: {0}")]
    Logging(String),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
}
