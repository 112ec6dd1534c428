//! Decoding of submitted recipe forms.
//!
//! The create/edit page posts an untyped list of key/value fields. [`RecipeForm::from_pairs`]
//! turns that list into the strongly-typed shape in one place and never fails: unparseable
//! numbers become zero and missing values become empty.
//!
//! | Field | Rule |
//! |-------|------|
//! | `name`, `description`, `kind`, `password` | first value wins, absent is `""` |
//! | `edit` | `true` only when the first value is exactly `"true"` |
//! | `cookTimeMinutes` | trimmed non-negative integer, otherwise `0` |
//! | `instructions` | every non-blank value, in order |
//! | `ingredientName` / `ingredientAmount` / `ingredientUnit` | paired by position; rows with a blank name are dropped |

use crate::recipe::{Ingredient, Recipe};
use crate::slug::slugify;

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_KIND: &str = "kind";
pub const FIELD_COOK_TIME: &str = "cookTimeMinutes";
pub const FIELD_INSTRUCTIONS: &str = "instructions";
pub const FIELD_INGREDIENT_NAME: &str = "ingredientName";
pub const FIELD_INGREDIENT_AMOUNT: &str = "ingredientAmount";
pub const FIELD_INGREDIENT_UNIT: &str = "ingredientUnit";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_EDIT: &str = "edit";

/// A decoded create/edit submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeForm {
    pub name: String,
    pub description: String,
    pub kind: String,
    pub cook_time_minutes: u32,
    pub instructions: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub password: String,
    /// Overwrite an existing recipe instead of refusing the create.
    pub edit: bool,
}

impl RecipeForm {
    /// Decodes submitted fields, in submission order. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut name = None;
        let mut description = None;
        let mut kind = None;
        let mut password = None;
        let mut edit = None;
        let mut cook_time = None;
        let mut instructions = Vec::new();
        let mut names = Vec::new();
        let mut amounts = Vec::new();
        let mut units = Vec::new();

        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                FIELD_NAME => first(&mut name, value),
                FIELD_DESCRIPTION => first(&mut description, value),
                FIELD_KIND => first(&mut kind, value),
                FIELD_PASSWORD => first(&mut password, value),
                FIELD_EDIT => first(&mut edit, value),
                FIELD_COOK_TIME => first(&mut cook_time, value),
                FIELD_INSTRUCTIONS => {
                    if !value.trim().is_empty() {
                        instructions.push(value);
                    }
                }
                FIELD_INGREDIENT_NAME => names.push(value),
                FIELD_INGREDIENT_AMOUNT => amounts.push(value),
                FIELD_INGREDIENT_UNIT => units.push(value),
                _ => {}
            }
        }

        let mut amounts = amounts.into_iter();
        let mut units = units.into_iter();
        let ingredients = names
            .into_iter()
            .map(|name| Ingredient {
                name,
                amount: amounts.next().as_deref().map_or(0.0, parse_amount),
                unit: units.next().unwrap_or_default(),
            })
            .filter(|ingredient| !ingredient.name.trim().is_empty())
            .collect();

        RecipeForm {
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            kind: kind.unwrap_or_default(),
            cook_time_minutes: cook_time.as_deref().map_or(0, parse_minutes),
            instructions,
            ingredients,
            password: password.unwrap_or_default(),
            edit: edit.as_deref() == Some("true"),
        }
    }

    /// Builds the recipe record, deriving the slug from the name.
    pub fn into_recipe(self) -> Recipe {
        Recipe {
            slug: slugify(&self.name),
            name: self.name,
            description: self.description,
            kind: self.kind,
            cook_time_minutes: self.cook_time_minutes,
            instructions: self.instructions,
            ingredients: self.ingredients,
        }
    }
}

fn first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn parse_minutes(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

fn parse_amount(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_full_submission() {
        let form = RecipeForm::from_pairs([
            ("name", "Pasta Carbonara"),
            ("description", "Roman classic"),
            ("kind", "Dinner"),
            ("cookTimeMinutes", "25"),
            ("instructions", "Boil pasta"),
            ("instructions", "Mix eggs"),
            ("ingredientName", "spaghetti"),
            ("ingredientAmount", "200"),
            ("ingredientUnit", "g"),
            ("ingredientName", "egg"),
            ("ingredientAmount", "2.5"),
            ("ingredientUnit", ""),
            ("password", "secret"),
            ("edit", "true"),
        ]);

        assert_eq!(form.name, "Pasta Carbonara");
        assert_eq!(form.cook_time_minutes, 25);
        assert_eq!(form.instructions, vec!["Boil pasta", "Mix eggs"]);
        assert_eq!(
            form.ingredients,
            vec![
                Ingredient::new("spaghetti", 200.0, "g"),
                Ingredient::new("egg", 2.5, ""),
            ]
        );
        assert_eq!(form.password, "secret");
        assert!(form.edit);

        let recipe = form.into_recipe();
        assert_eq!(recipe.slug, "pasta-carbonara");
        assert_eq!(recipe.name, "Pasta Carbonara");
    }

    #[test]
    fn test_unparseable_numbers_default_to_zero() {
        let form = RecipeForm::from_pairs([
            ("cookTimeMinutes", "about an hour"),
            ("ingredientName", "salt"),
            ("ingredientAmount", "a pinch"),
            ("ingredientUnit", ""),
        ]);

        assert_eq!(form.cook_time_minutes, 0);
        assert_eq!(form.ingredients[0].amount, 0.0);
    }

    #[test]
    fn test_negative_cook_time_defaults_to_zero() {
        let form = RecipeForm::from_pairs([("cookTimeMinutes", "-5")]);
        assert_eq!(form.cook_time_minutes, 0);
    }

    #[test]
    fn test_non_finite_amount_defaults_to_zero() {
        let form = RecipeForm::from_pairs([
            ("ingredientName", "air"),
            ("ingredientAmount", "NaN"),
            ("ingredientName", "space"),
            ("ingredientAmount", "inf"),
        ]);

        assert_eq!(form.ingredients[0].amount, 0.0);
        assert_eq!(form.ingredients[1].amount, 0.0);
    }

    #[test]
    fn test_numbers_are_trimmed() {
        let form = RecipeForm::from_pairs([
            ("cookTimeMinutes", " 40 "),
            ("ingredientName", "milk"),
            ("ingredientAmount", " 0.5 "),
        ]);

        assert_eq!(form.cook_time_minutes, 40);
        assert_eq!(form.ingredients[0].amount, 0.5);
    }

    #[test]
    fn test_missing_amounts_and_units_default() {
        let form = RecipeForm::from_pairs([
            ("ingredientName", "flour"),
            ("ingredientAmount", "3"),
            ("ingredientUnit", "dl"),
            ("ingredientName", "water"),
        ]);

        assert_eq!(
            form.ingredients,
            vec![
                Ingredient::new("flour", 3.0, "dl"),
                Ingredient::new("water", 0.0, ""),
            ]
        );
    }

    #[test]
    fn test_blank_rows_are_dropped_without_shifting_pairs() {
        let form = RecipeForm::from_pairs([
            ("instructions", "Boil"),
            ("instructions", "   "),
            ("instructions", "Serve"),
            ("ingredientName", ""),
            ("ingredientAmount", "9"),
            ("ingredientUnit", "kg"),
            ("ingredientName", "rice"),
            ("ingredientAmount", "2"),
            ("ingredientUnit", "dl"),
        ]);

        assert_eq!(form.instructions, vec!["Boil", "Serve"]);
        assert_eq!(form.ingredients, vec![Ingredient::new("rice", 2.0, "dl")]);
    }

    #[test]
    fn test_surplus_amounts_are_ignored() {
        let form = RecipeForm::from_pairs([("ingredientAmount", "3"), ("ingredientUnit", "dl")]);
        assert!(form.ingredients.is_empty());
    }

    #[test]
    fn test_edit_requires_exact_true() {
        assert!(!RecipeForm::from_pairs([("edit", "TRUE")]).edit);
        assert!(!RecipeForm::from_pairs([("edit", "1")]).edit);
        assert!(!RecipeForm::from_pairs(Vec::<(String, String)>::new()).edit);
    }

    #[test]
    fn test_first_scalar_value_wins() {
        let form = RecipeForm::from_pairs([
            ("name", "First"),
            ("name", "Second"),
            ("edit", "true"),
            ("edit", "false"),
        ]);
        assert_eq!(form.name, "First");
        assert!(form.edit);
    }

    #[test]
    fn test_empty_submission_is_total() {
        let recipe = RecipeForm::from_pairs(Vec::<(String, String)>::new()).into_recipe();
        assert_eq!(recipe, Recipe::default());
    }
}
