use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    profile::Profile,
};

/// Profiles file in user's home directory
const GLOBAL_GIT_PROFILES_FILE: &str = ".git_profile_manager.json";

/// Gets the default path to the profiles file
pub fn get_global_profile_path() -> AppResult<PathBuf> {
    let home_dir: PathBuf = dirs::home_dir().ok_or_else(|| {
        AppError::Persistence("failed to find the home directory".to_string())
    })?;
    Ok(home_dir.join(GLOBAL_GIT_PROFILES_FILE))
}

/// Storage backend for the ordered profile list
pub trait ProfileRepository {
    /// Reads all stored profiles. Missing or unreadable storage yields an empty list.
    fn load(&mut self) -> Vec<Profile>;
    /// Replaces the stored profiles with `profiles`
    fn save(&mut self, profiles: &[Profile]) -> AppResult<()>;
}

/// Record layout written by the earlier GUI profile manager
#[derive(Deserialize, Debug)]
struct LegacyProfile {
    profile_name: String,
    name: String,
    email: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<LegacyProfile> for Profile {
    fn from(legacy: LegacyProfile) -> Self {
        Profile {
            name: legacy.profile_name,
            git_name: legacy.name,
            git_email: legacy.email,
            extra: legacy.extra,
        }
    }
}

/// Profiles kept as a pretty-printed JSON array on disk
///
/// Records that are not profiles are written back untouched after the profiles.
/// A file that cannot be parsed at all is copied to `<file>.bak` before the first save.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    unrecognized: Vec<Value>,
    unparsable: Option<String>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unrecognized: Vec::new(),
            unparsable: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the contents of an unparsable profiles file are kept
    pub fn backup_path(&self) -> PathBuf {
        let mut backup = self.path.clone().into_os_string();
        backup.push(".bak");
        PathBuf::from(backup)
    }

    fn keep_unparsable(&mut self) -> AppResult<()> {
        let Some(contents) = self.unparsable.take() else {
            return Ok(());
        };

        let backup_path = self.backup_path();
        if let Err(err) = fs::write(&backup_path, &contents) {
            self.unparsable = Some(contents);
            return Err(AppError::Persistence(format!(
                "{}: {}",
                backup_path.display(),
                err
            )));
        }
        log::warn!(
            "kept unparsable profiles file as {}",
            backup_path.display()
        );
        Ok(())
    }
}

impl ProfileRepository for JsonFileRepository {
    fn load(&mut self) -> Vec<Profile> {
        self.unrecognized.clear();
        self.unparsable = None;

        let file_contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no profiles file at {}", self.path.display());
                return Vec::new();
            }
            Err(err) => {
                log::warn!("failed to read {}: {}", self.path.display(), err);
                return Vec::new();
            }
        };

        if file_contents.trim().is_empty() {
            return Vec::new();
        }

        match parse_profiles(&file_contents) {
            Ok((profiles, unrecognized)) => {
                self.unrecognized = unrecognized;
                profiles
            }
            Err(err) => {
                log::warn!(
                    "ignoring unparsable profiles file {}: {}",
                    self.path.display(),
                    err
                );
                self.unparsable = Some(file_contents);
                Vec::new()
            }
        }
    }

    fn save(&mut self, profiles: &[Profile]) -> AppResult<()> {
        let mut records: Vec<Value> = profiles
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()
            .map_err(|err| AppError::Persistence(err.to_string()))?;
        records.extend(self.unrecognized.iter().cloned());

        let json: String = serde_json::to_string_pretty(&records)
            .map_err(|err| AppError::Persistence(err.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::Persistence(format!("{}: {}", parent.display(), err))
            })?;
        }
        self.keep_unparsable()?;

        fs::write(&self.path, json)
            .map_err(|err| AppError::Persistence(format!("{}: {}", self.path.display(), err)))?;
        log::debug!("saved {} profiles to {}", profiles.len(), self.path.display());
        Ok(())
    }
}

/// Parses a JSON array of profile records.
///
/// Records in the legacy layout are converted; anything else is returned separately.
fn parse_profiles(raw: &str) -> Result<(Vec<Profile>, Vec<Value>), serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut profiles = Vec::new();
    let mut unrecognized = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        if let Ok(profile) = serde_json::from_value::<Profile>(record.clone()) {
            profiles.push(profile);
        } else if let Ok(legacy) = serde_json::from_value::<LegacyProfile>(record.clone()) {
            log::info!("converting legacy profile record '{}'", legacy.profile_name);
            profiles.push(legacy.into());
        } else {
            log::warn!("keeping unrecognized profile record #{} as-is", index);
            unrecognized.push(record);
        }
    }
    Ok((profiles, unrecognized))
}

/// Profiles held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    profiles: Vec<Profile>,
}

impl MemoryRepository {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}

impl ProfileRepository for MemoryRepository {
    fn load(&mut self) -> Vec<Profile> {
        self.profiles.clone()
    }

    fn save(&mut self, profiles: &[Profile]) -> AppResult<()> {
        self.profiles = profiles.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let mut repo = JsonFileRepository::new(dir.path().join("absent.json"));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("profiles.json");
        fs::write(&path, "{ not json").expect("write should work");
        assert!(JsonFileRepository::new(path).load().is_empty());
    }

    #[test]
    fn separates_unrecognized_records() {
        let raw = r#"[
            {"name": "work", "git_name": "john", "git_email": "john@corp.com"},
            {"name": "broken"},
            42
        ]"#;
        let (profiles, unrecognized) = parse_profiles(raw).expect("array should parse");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "work");
        assert_eq!(unrecognized, vec![serde_json::json!({"name": "broken"}), Value::from(42)]);
    }

    #[test]
    fn converts_legacy_records() {
        let raw = r#"[{"profile_name": "Work", "name": "john", "email": "john@c.com", "color": "red"}]"#;
        let (profiles, unrecognized) = parse_profiles(raw).expect("array should parse");
        assert!(unrecognized.is_empty());
        assert_eq!(profiles[0].name, "Work");
        assert_eq!(profiles[0].git_name, "john");
        assert_eq!(profiles[0].git_email, "john@c.com");
        assert_eq!(profiles[0].extra.get("color"), Some(&Value::from("red")));
    }

    #[test]
    fn writes_back_unrecognized_records() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("profiles.json");
        fs::write(&path, r#"[{"name": "half"}, {"name": "a", "git_name": "b", "git_email": "c"}]"#)
            .expect("write should work");

        let mut repo = JsonFileRepository::new(&path);
        let mut profiles = repo.load();
        profiles.push(Profile::new("new", "n", "n@x.com"));
        repo.save(&profiles).expect("save should work");

        let raw = fs::read_to_string(&path).expect("read should work");
        let records: Vec<Value> = serde_json::from_str(&raw).expect("saved file should parse");
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], serde_json::json!({"name": "half"}));
    }

    #[test]
    fn unparsable_file_is_kept_aside_on_save() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("profiles.json");
        fs::write(&path, "{ not json").expect("write should work");

        let mut repo = JsonFileRepository::new(&path);
        assert!(repo.load().is_empty());
        repo.save(&[Profile::new("a", "b", "c")]).expect("save should work");

        let kept = fs::read_to_string(repo.backup_path()).expect("backup should exist");
        assert_eq!(kept, "{ not json");
        assert_eq!(repo.load(), vec![Profile::new("a", "b", "c")]);
    }

    #[test]
    fn preserves_unknown_fields() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("profiles.json");
        fs::write(
            &path,
            r#"[{"name": "work", "git_name": "john", "git_email": "john@corp.com", "signing_key": "ABC"}]"#,
        )
        .expect("write should work");

        let mut repo = JsonFileRepository::new(&path);
        let profiles = repo.load();
        assert_eq!(profiles[0].extra.get("signing_key"), Some(&Value::from("ABC")));

        repo.save(&profiles).expect("save should work");
        let raw = fs::read_to_string(&path).expect("read should work");
        assert!(raw.contains("\"signing_key\": \"ABC\""));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("nested").join("profiles.json");
        let mut repo = JsonFileRepository::new(&path);
        repo.save(&[Profile::new("home", "Jané", "jané@example.org")])
            .expect("save should work");

        let profiles = repo.load();
        assert_eq!(profiles, vec![Profile::new("home", "Jané", "jané@example.org")]);
    }

    #[test]
    fn save_failure_is_persistence_error() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let mut repo = JsonFileRepository::new(dir.path());
        let result = repo.save(&[]);
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }
}
