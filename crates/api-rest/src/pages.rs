//! HTML pages rendered with maud.
//!
//! All interpolated values are escaped by maud. The only pre-escaped content is the output of
//! [`highlight_ingredients`], which escapes the instruction text itself.

use maud::{html, Markup, DOCTYPE};
use recipes_core::form::{
    FIELD_COOK_TIME, FIELD_DESCRIPTION, FIELD_EDIT, FIELD_INGREDIENT_AMOUNT,
    FIELD_INGREDIENT_NAME, FIELD_INGREDIENT_UNIT, FIELD_INSTRUCTIONS, FIELD_KIND, FIELD_NAME,
    FIELD_PASSWORD,
};
use recipes_core::{highlight_ingredients, Ingredient, Recipe};

/// Blank rows appended to the create form so new lines can be added without scripting.
const SPARE_ROWS: usize = 3;

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/assets/style.css";
            }
            body {
                header {
                    nav {
                        a href="/" { "Recipes" }
                        " "
                        a href="/create" { "New recipe" }
                    }
                }
                main { (content) }
            }
        }
    }
}

/// The index page listing every recipe.
pub fn index(recipes: &[Recipe]) -> Markup {
    layout(
        "Recipes",
        html! {
            h1 { "Recipes" }
            @if recipes.is_empty() {
                p { "No recipes yet." }
            } @else {
                ul.recipes {
                    @for recipe in recipes {
                        li {
                            a href={ "/recipe/" (recipe.slug) } { (recipe.name) }
                            @if !recipe.kind.is_empty() {
                                " " span.kind { (recipe.kind) }
                            }
                            @if recipe.cook_time_minutes > 0 {
                                " " span.time { (recipe.cook_time_minutes) " min" }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// A single recipe, with ingredient names bolded in every instruction.
pub fn recipe(recipe: &Recipe) -> Markup {
    layout(
        &recipe.name,
        html! {
            article.recipe {
                h1 { (recipe.name) }
                @if !recipe.description.is_empty() {
                    p.description { (recipe.description) }
                }
                p.meta {
                    @if !recipe.kind.is_empty() {
                        span.kind { (recipe.kind) }
                        " "
                    }
                    span.time { (recipe.cook_time_minutes) " min" }
                }
                h2 { "Ingredients" }
                ul.ingredients {
                    @for ingredient in &recipe.ingredients {
                        li { (ingredient_line(ingredient)) }
                    }
                }
                h2 { "Instructions" }
                ol.instructions {
                    @for step in &recipe.instructions {
                        li { (highlight_ingredients(step, &recipe.ingredients)) }
                    }
                }
                p {
                    a href={ "/create?edit=" (recipe.slug) } { "Edit" }
                }
            }
        },
    )
}

fn ingredient_line(ingredient: &Ingredient) -> String {
    let mut line = String::new();
    if ingredient.amount != 0.0 {
        line.push_str(&format!("{} ", ingredient.amount));
    }
    if !ingredient.unit.is_empty() {
        line.push_str(&ingredient.unit);
        line.push(' ');
    }
    line.push_str(&ingredient.name);
    line
}

/// The create form, or the edit form when `existing` is given.
pub fn create(existing: Option<&Recipe>) -> Markup {
    let empty = Recipe::default();
    let recipe = existing.unwrap_or(&empty);
    let title = if existing.is_some() {
        format!("Edit {}", recipe.name)
    } else {
        "New recipe".to_string()
    };
    let spare_ingredient = Ingredient::default();

    layout(
        &title,
        html! {
            h1 { (title) }
            form method="post" action="/recipe" enctype="multipart/form-data" {
                @if existing.is_some() {
                    input type="hidden" name=(FIELD_EDIT) value="true";
                }
                label { "Name " input type="text" name=(FIELD_NAME) value=(recipe.name) required; }
                label { "Description " textarea name=(FIELD_DESCRIPTION) { (recipe.description) } }
                label { "Kind " input type="text" name=(FIELD_KIND) value=(recipe.kind); }
                label {
                    "Cook time (minutes) "
                    input type="number" min="0" name=(FIELD_COOK_TIME) value=(recipe.cook_time_minutes);
                }
                fieldset.ingredients {
                    legend { "Ingredients" }
                    @for ingredient in recipe.ingredients.iter().chain(std::iter::repeat(&spare_ingredient).take(SPARE_ROWS)) {
                        div.ingredient {
                            input type="text" name=(FIELD_INGREDIENT_NAME) placeholder="Name" value=(ingredient.name);
                            input type="number" step="any" name=(FIELD_INGREDIENT_AMOUNT) placeholder="Amount"
                                value=(amount_value(ingredient.amount));
                            input type="text" name=(FIELD_INGREDIENT_UNIT) placeholder="Unit" value=(ingredient.unit);
                        }
                    }
                }
                fieldset.instructions {
                    legend { "Instructions" }
                    @for step in recipe.instructions.iter().map(String::as_str).chain(std::iter::repeat("").take(SPARE_ROWS)) {
                        textarea name=(FIELD_INSTRUCTIONS) { (step) }
                    }
                }
                label { "Password " input type="password" name=(FIELD_PASSWORD) required; }
                button type="submit" { "Save" }
            }
        },
    )
}

fn amount_value(amount: f64) -> String {
    if amount == 0.0 {
        String::new()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        Recipe {
            name: "Eggs & Salt".into(),
            slug: "eggs-salt".into(),
            description: "Simple <b>breakfast</b>".into(),
            kind: "Breakfast".into(),
            cook_time_minutes: 10,
            instructions: vec!["Add 2 eggs and salt".into()],
            ingredients: vec![
                Ingredient::new("egg", 2.0, ""),
                Ingredient::new("salt", 0.5, "tsp"),
            ],
        }
    }

    #[test]
    fn test_recipe_page_highlights_and_escapes() {
        let page = recipe(&sample()).into_string();

        assert!(page.contains("<h1>Eggs &amp; Salt</h1>"));
        assert!(page.contains("Simple &lt;b&gt;breakfast&lt;/b&gt;"));
        assert!(page.contains("<li>Add 2 <strong>egg</strong>s and <strong>salt</strong></li>"));
        assert!(page.contains("<li>0.5 tsp salt</li>"));
        assert!(page.contains("<li>2 egg</li>"));
        assert!(page.contains("href=\"/create?edit=eggs-salt\""));
    }

    #[test]
    fn test_index_lists_recipes() {
        let page = index(&[sample()]).into_string();
        assert!(page.contains("<a href=\"/recipe/eggs-salt\">Eggs &amp; Salt</a>"));
        assert!(page.contains("10 min"));

        let empty = index(&[]).into_string();
        assert!(empty.contains("No recipes yet."));
    }

    #[test]
    fn test_create_form_for_new_recipe_has_no_edit_flag() {
        let page = create(None).into_string();
        assert!(page.contains("enctype=\"multipart/form-data\""));
        assert!(!page.contains("name=\"edit\""));
        assert_eq!(page.matches("name=\"ingredientName\"").count(), SPARE_ROWS);
    }

    #[test]
    fn test_edit_form_prefills_recipe() {
        let page = create(Some(&sample())).into_string();
        assert!(page.contains("<input type=\"hidden\" name=\"edit\" value=\"true\">"));
        assert!(page.contains("value=\"Eggs &amp; Salt\""));
        assert_eq!(
            page.matches("name=\"ingredientName\"").count(),
            2 + SPARE_ROWS
        );
        assert!(page.contains(">Add 2 eggs and salt</textarea>"));
    }
}
