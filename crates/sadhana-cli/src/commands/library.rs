use std::path::{Path, PathBuf};

use clap::Subcommand;
use sadhana_core::library::{category_counts, filter};
use sadhana_core::{CategoryFilter, Favorites, Mantra};
use serde_json::json;

#[derive(Subcommand)]
pub enum LibraryAction {
    /// Search mantras from a JSON file by name or translation
    Search {
        /// JSON array of mantras
        #[arg(long)]
        file: PathBuf,
        /// Text to look for (default: match everything)
        #[arg(long, default_value = "")]
        query: String,
        /// Category name, or "all"
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Mantra ids to mark as favorites
        #[arg(long, value_delimiter = ',')]
        favorites: Vec<u32>,
    },
    /// Count mantras per category
    Categories {
        /// JSON array of mantras
        #[arg(long)]
        file: PathBuf,
    },
}

fn load(path: &Path) -> Result<Vec<Mantra>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn run(action: LibraryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LibraryAction::Search {
            file,
            query,
            category,
            favorites,
        } => {
            let mantras = load(&file)?;
            let favorites: Favorites = favorites.into_iter().collect();
            let found: Vec<_> = filter(&mantras, &query, category)
                .into_iter()
                .map(|m| {
                    json!({
                        "id": m.id,
                        "name": m.name,
                        "translation": m.translation,
                        "category": m.category,
                        "repetitions": m.repetitions,
                        "favorite": favorites.contains(m.id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        LibraryAction::Categories { file } => {
            let mantras = load(&file)?;
            let counts: Vec<_> = category_counts(&mantras)
                .into_iter()
                .map(|(category, count)| {
                    let name = match category {
                        CategoryFilter::All => "all".to_string(),
                        CategoryFilter::Only(c) => c.to_string(),
                    };
                    json!({ "category": name, "count": count })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
    }
    Ok(())
}
