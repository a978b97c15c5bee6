//! Location of the per-user `.survivor-forest` folder that holds run logs.
//!
//! Defaults to the OS local data directory. `SURVIVOR_FOREST_HOME` replaces the
//! base directory for tests and portable runs.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Folder created under the base directory.
pub const APP_DIR_NAME: &str = ".survivor-forest";
/// Environment variable that overrides the base directory.
pub const HOME_ENV_VAR: &str = "SURVIVOR_FOREST_HOME";

static BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors raised while resolving or creating application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// Neither the override nor the OS provided a base directory.
    #[error("No base directory available for run logs")]
    NoBaseDir,
    /// Creating a directory failed.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the application root, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = base_dir().ok_or(AppDirError::NoBaseDir)?;
    create(base.join(APP_DIR_NAME))
}

/// Return `<root>/logs`, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    create(app_root_dir()?.join("logs"))
}

fn create(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn base_dir() -> Option<PathBuf> {
    if let Some(path) = BASE_OVERRIDE.lock().ok().and_then(|guard| guard.clone()) {
        return Some(path);
    }
    if let Ok(path) = std::env::var(HOME_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.data_local_dir().to_path_buf())
}

#[cfg(test)]
fn set_base_override(path: Option<PathBuf>) {
    let mut guard = BASE_OVERRIDE
        .lock()
        .expect("base override mutex poisoned");
    *guard = path;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct OverrideGuard;

    impl OverrideGuard {
        fn set(path: PathBuf) -> Self {
            set_base_override(Some(path));
            Self
        }
    }

    impl Drop for OverrideGuard {
        fn drop(&mut self) {
            set_base_override(None);
        }
    }

    #[test]
    fn logs_dir_lives_under_override_root() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let logs = logs_dir().unwrap();
        assert_eq!(logs, base.path().join(APP_DIR_NAME).join("logs"));
        assert!(logs.is_dir());
    }
}
