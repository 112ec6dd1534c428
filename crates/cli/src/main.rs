use std::path::PathBuf;
use std::sync::Arc;

use api_shared::hash_password;
use clap::{Parser, Subcommand};
use recipes_core::{slugify, CoreConfig, RecipeRepository, DEFAULT_RECIPE_DATA_DIR};

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Recipe catalogue operator CLI")]
struct Cli {
    /// Recipe data directory
    #[arg(long, global = true, env = "RECIPE_DATA_DIR", default_value = DEFAULT_RECIPE_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes
    List,
    /// Print one recipe as JSON
    Show {
        /// Recipe slug
        slug: String,
    },
    /// Print the slug derived from a recipe name
    Slug {
        /// Recipe name
        name: String,
    },
    /// Print the PASSWORD_HASH value for a password
    HashPassword {
        /// Shared password
        password: String,
    },
    /// Delete a recipe
    Delete {
        /// Recipe slug
        slug: String,
    },
}

fn repository(data_dir: PathBuf) -> Result<RecipeRepository, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(data_dir)?;
    Ok(RecipeRepository::new(Arc::new(cfg)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let recipes = repository(cli.data_dir)?.load_all()?;
            if recipes.is_empty() {
                println!("No recipes found.");
            } else {
                for recipe in recipes {
                    println!("{}  {}", recipe.slug, recipe.name);
                }
            }
        }
        Some(Commands::Show { slug }) => {
            let recipe = repository(cli.data_dir)?.load(&slug)?;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        Some(Commands::Slug { name }) => {
            println!("{}", slugify(&name));
        }
        Some(Commands::HashPassword { password }) => {
            println!("{}", hash_password(&password));
        }
        Some(Commands::Delete { slug }) => {
            repository(cli.data_dir)?.delete(&slug)?;
            println!("Deleted {}", slug);
        }
        None => {
            println!("Use 'recipes --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_data_dir_flag_is_parsed() {
        let cli = Cli::try_parse_from(["recipes", "--data-dir", "/tmp/r", "show", "pancakes"])
            .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/r"));
        assert!(matches!(cli.command, Some(Commands::Show { slug }) if slug == "pancakes"));
    }
}
