//! File-backed recipe repository.
//!
//! Every recipe lives in its own JSON file named after its slug:
//!
//! ```text
//! <recipe_data_dir>/
//!   pasta-carbonara.json
//!   pancakes.json
//! ```
//!
//! ## Consistency
//!
//! There is no locking. Saves replace the whole file (write to a hidden temporary file in the
//! same directory, then rename), so a reader never sees a half-written recipe and two
//! concurrent saves of one slug leave exactly one of the two values behind: the last writer
//! wins.
//!
//! [`RecipeRepository::submit`] checks for an existing recipe before saving a new one. Nothing
//! spans that check and the save, so two concurrent creates of the same new slug can both
//! pass the check; the second save then silently overwrites the first.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. Password checks and HTTP concerns belong
//! in `api-shared` and `api-rest`.

use crate::config::CoreConfig;
use crate::constants::{RECIPE_FILE_EXTENSION, TEMP_FILE_PREFIX};
use crate::error::{RecipeError, RecipeResult};
use crate::recipe::Recipe;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Service for loading and storing recipe records.
///
/// Cloning is cheap; clones share the same configuration and hold no other state.
#[derive(Clone, Debug)]
pub struct RecipeRepository {
    cfg: Arc<CoreConfig>,
}

impl RecipeRepository {
    /// Creates a repository over the configured recipe data directory.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn data_dir(&self) -> &Path {
        self.cfg.recipe_data_dir()
    }

    /// Loads the recipe stored under `slug`.
    ///
    /// The slug inside the file is returned as stored; it is not compared with the filename.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::NotFound`] if the file is absent or cannot be read
    /// - [`RecipeError::Malformed`] if the content is not a recipe
    pub fn load(&self, slug: &str) -> RecipeResult<Recipe> {
        let path = self.existing_path(slug)?;
        read_recipe(&path, slug)
    }

    /// Loads every recipe in the data directory, ordered by filename.
    ///
    /// Subdirectories and files without the `.json` extension are skipped.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::DirectoryRead`] if the directory cannot be listed
    /// - [`RecipeError::NotFound`] if a listed file cannot be read
    /// - [`RecipeError::Malformed`] if **any** file fails to parse; no partial list is returned
    pub fn load_all(&self) -> RecipeResult<Vec<Recipe>> {
        let dir = self.data_dir();
        let directory_error = |source| RecipeError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(directory_error)? {
            let path = entry.map_err(directory_error)?.path();
            if path.is_dir() || path.extension() != Some(OsStr::new(RECIPE_FILE_EXTENSION)) {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        paths
            .iter()
            .map(|path| {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                read_recipe(path, &stem)
            })
            .collect()
    }

    /// Returns whether a recipe file exists for `slug`. Any I/O error counts as absent.
    pub fn exists(&self, slug: &str) -> bool {
        self.existing_path(slug)
            .map(|path| path.try_exists().unwrap_or(false))
            .unwrap_or(false)
    }

    /// Writes `recipe` to `<slug>.json`, replacing any existing file unconditionally.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::InvalidInput`] if the recipe slug is empty or not a plain file stem
    /// - [`RecipeError::WriteFailure`] if serialisation or any file operation fails, including
    ///   an ingredient amount that is NaN or infinite
    pub fn save(&self, recipe: &Recipe) -> RecipeResult<()> {
        if !is_plain_slug(&recipe.slug) {
            return Err(RecipeError::InvalidInput(format!(
                "recipe slug {:?} cannot be used as a filename",
                recipe.slug
            )));
        }

        let path = self.cfg.recipe_path(&recipe.slug);
        let write_failure = |source| RecipeError::WriteFailure {
            path: path.clone(),
            source,
        };

        let content = to_pretty_json(recipe).map_err(write_failure)?;
        write_replacing(self.data_dir(), &path, &content).map_err(write_failure)?;

        tracing::info!("saved recipe {} to {}", recipe.slug, path.display());
        Ok(())
    }

    /// Saves a submitted recipe, refusing to replace an existing one unless `edit` is set.
    ///
    /// The existence check and the save are separate steps; see the module docs.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::AlreadyExists`] if `edit` is false and the slug is taken
    /// - any error from [`RecipeRepository::save`]
    pub fn submit(&self, recipe: &Recipe, edit: bool) -> RecipeResult<()> {
        if !edit && self.exists(&recipe.slug) {
            return Err(RecipeError::AlreadyExists(recipe.slug.clone()));
        }
        self.save(recipe)
    }

    /// Removes the recipe file for `slug`.
    ///
    /// # Errors
    ///
    /// - [`RecipeError::NotFound`] if there is no file for the slug
    /// - [`RecipeError::WriteFailure`] if removal fails for any other reason
    pub fn delete(&self, slug: &str) -> RecipeResult<()> {
        let path = self.existing_path(slug)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("deleted recipe {} ({})", slug, path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RecipeError::NotFound {
                slug: slug.to_string(),
                source: Some(e),
            }),
            Err(source) => Err(RecipeError::WriteFailure { path, source }),
        }
    }

    /// Path for a slug taken from outside input. Slugs that could escape the data directory
    /// cannot name a stored recipe, so they are reported as not found.
    fn existing_path(&self, slug: &str) -> RecipeResult<PathBuf> {
        if !is_plain_slug(slug) {
            return Err(RecipeError::NotFound {
                slug: slug.to_string(),
                source: None,
            });
        }
        Ok(self.cfg.recipe_path(slug))
    }
}

fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

fn read_recipe(path: &Path, slug: &str) -> RecipeResult<Recipe> {
    let content = fs::read(path).map_err(|e| RecipeError::NotFound {
        slug: slug.to_string(),
        source: Some(e),
    })?;

    serde_json::from_slice(&content).map_err(|source| {
        tracing::warn!("failed to parse recipe file {}: {}", path.display(), source);
        RecipeError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn to_pretty_json(recipe: &Recipe) -> io::Result<Vec<u8>> {
    // serde_json writes non-finite floats as `null`, which would not load back.
    if let Some(ingredient) = recipe
        .ingredients
        .iter()
        .find(|ingredient| !ingredient.amount.is_finite())
    {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!(
                "ingredient {:?} has non-finite amount {}",
                ingredient.name, ingredient.amount
            ),
        ));
    }

    let mut content = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
    recipe.serialize(&mut serializer)?;
    Ok(content)
}

fn write_replacing(dir: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;

    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
