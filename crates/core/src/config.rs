//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in this crate reads process-wide environment variables during request handling,
//! so independent instances (for example in tests) can point at different directories.

use crate::constants::{DEFAULT_RECIPE_DATA_DIR, RECIPE_FILE_EXTENSION};
use crate::{RecipeError, RecipeResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    recipe_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(recipe_data_dir: PathBuf) -> RecipeResult<Self> {
        if recipe_data_dir.as_os_str().is_empty() {
            return Err(RecipeError::InvalidInput(
                "recipe_data_dir cannot be empty".into(),
            ));
        }

        Ok(Self { recipe_data_dir })
    }

    pub fn recipe_data_dir(&self) -> &Path {
        &self.recipe_data_dir
    }

    /// Path of the file backing the recipe with the given slug.
    pub fn recipe_path(&self, slug: &str) -> PathBuf {
        self.recipe_data_dir
            .join(format!("{slug}.{RECIPE_FILE_EXTENSION}"))
    }
}

/// Resolve the recipe data directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_RECIPE_DATA_DIR`].
pub fn recipe_data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RECIPE_DATA_DIR))
}

/// Create the recipe data directory if it does not exist yet.
///
/// Intended to be run once at startup, after `CoreConfig` is constructed.
pub fn ensure_recipe_data_dir(cfg: &CoreConfig) -> RecipeResult<()> {
    let dir = cfg.recipe_data_dir();
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(RecipeError::InvalidInput(format!(
            "recipe data path is not a directory: {}",
            dir.display()
        )));
    }

    std::fs::create_dir_all(dir).map_err(|source| RecipeError::WriteFailure {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_rejects_empty_dir() {
        let err = CoreConfig::new(PathBuf::new()).expect_err("empty dir should be rejected");
        assert!(matches!(err, RecipeError::InvalidInput(_)));
    }

    #[test]
    fn test_recipe_path_uses_slug_and_extension() {
        let cfg = CoreConfig::new(PathBuf::from("data")).unwrap();
        assert_eq!(
            cfg.recipe_path("pasta-carbonara"),
            PathBuf::from("data").join("pasta-carbonara.json")
        );
    }

    #[test]
    fn test_data_dir_from_env_value_defaults() {
        assert_eq!(
            recipe_data_dir_from_env_value(None),
            PathBuf::from(DEFAULT_RECIPE_DATA_DIR)
        );
        assert_eq!(
            recipe_data_dir_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_RECIPE_DATA_DIR)
        );
        assert_eq!(
            recipe_data_dir_from_env_value(Some(" /srv/recipes ".into())),
            PathBuf::from("/srv/recipes")
        );
    }

    #[test]
    fn test_ensure_recipe_data_dir_creates_missing_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().join("nested").join("data");
        let cfg = CoreConfig::new(dir.clone()).unwrap();

        ensure_recipe_data_dir(&cfg).expect("should create directory");
        assert!(dir.is_dir());

        // Second call is a no-op.
        ensure_recipe_data_dir(&cfg).expect("existing directory is fine");
    }

    #[test]
    fn test_ensure_recipe_data_dir_rejects_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("data");
        std::fs::write(&path, "not a directory").unwrap();
        let cfg = CoreConfig::new(path).unwrap();

        let err = ensure_recipe_data_dir(&cfg).expect_err("file path should be rejected");
        assert!(matches!(err, RecipeError::InvalidInput(_)));
    }
}
