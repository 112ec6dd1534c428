//! # Recipes Core
//!
//! Core business logic for the recipe catalogue.
//!
//! This crate contains pure data operations and file management:
//! - Slug derivation from recipe names
//! - The recipe record and its JSON storage shape
//! - File-backed storage of one `<slug>.json` per recipe under the configured data directory
//! - Decoding of submitted create/edit forms
//! - Ingredient highlighting of instruction lines
//!
//! **No API concerns**: password checks and HTTP servers belong in `api-shared` and
//! `api-rest`.

pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod highlight;
pub mod recipe;
pub mod repositories;
pub mod slug;

pub use config::CoreConfig;
pub use constants::DEFAULT_RECIPE_DATA_DIR;
pub use error::{RecipeError, RecipeResult};
pub use form::RecipeForm;
pub use highlight::highlight_ingredients;
pub use recipe::{Ingredient, Recipe};
pub use repositories::recipes::RecipeRepository;
pub use slug::slugify;
