//! Constants used throughout the recipes core crate.
//!
//! Path and filename constants live here so the repository, configuration and CLI agree on
//! the on-disk layout.

/// Extension (without the dot) of a stored recipe file.
pub const RECIPE_FILE_EXTENSION: &str = "json";

/// Default directory for recipe storage when no explicit directory is configured.
pub const DEFAULT_RECIPE_DATA_DIR: &str = "data";

/// Prefix of the temporary file a recipe is written to before being renamed into place.
pub const TEMP_FILE_PREFIX: &str = ".recipe-";
