//! Recipe records and their on-disk JSON shape.
//!
//! The field names are part of the storage format and must stay byte-exact:
//!
//! ```text
//! {
//!     "name": "Pasta Carbonara",
//!     "slug": "pasta-carbonara",
//!     "description": "",
//!     "kind": "Dinner",
//!     "cookTimeMinutes": 25,
//!     "instructions": ["Boil pasta", "..."],
//!     "ingredients": [{ "name": "egg", "amount": 2, "unit": "" }]
//! }
//! ```
//!
//! Decoding is lenient: missing fields take their zero value and `null` lists decode as
//! empty, so files produced by older tooling remain readable.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A single recipe as stored in `<slug>.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    /// Display name.
    pub name: String,

    /// Primary key and filename stem; `slugify(name)` when written through the normal path.
    pub slug: String,

    pub description: String,

    /// Free-text category label, e.g. "Dinner".
    pub kind: String,

    pub cook_time_minutes: u32,

    /// Steps, in order.
    #[serde(deserialize_with = "null_as_empty")]
    pub instructions: Vec<String>,

    /// Ingredients, in display order. This order also drives highlighting.
    #[serde(deserialize_with = "null_as_empty")]
    pub ingredients: Vec<Ingredient>,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
