//! Mantra library: search, category filtering and favorites.
//!
//! Mantra data is supplied by the host, as with observances. This module
//! only filters and counts what it is given.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mantra pre-selected on the mala screen.
pub const DEFAULT_MANTRA: &str = "Om Namah Shivaya";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shiva,
    Krishna,
    Ganesha,
    Wisdom,
    Healing,
    Meditation,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Shiva,
        Category::Krishna,
        Category::Ganesha,
        Category::Wisdom,
        Category::Healing,
        Category::Meditation,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Shiva => "shiva",
            Category::Krishna => "krishna",
            Category::Ganesha => "ganesha",
            Category::Wisdom => "wisdom",
            Category::Healing => "healing",
            Category::Meditation => "meditation",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selector for [`filter`]. `All` matches every mantra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .map(CategoryFilter::Only)
            .ok_or(ValidationError::UnknownCategory { name: s })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mantra {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sanskrit: String,
    pub translation: String,
    pub category: Category,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub pronunciation: String,
    /// Traditional repetition count, usually 108.
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default)]
    pub description: String,
}

/// Mantras whose name or translation contains `search` (ignoring case) and
/// whose category passes `category`. An empty search matches everything.
/// Input order is preserved.
pub fn filter<'a>(
    mantras: &'a [Mantra],
    search: &str,
    category: CategoryFilter,
) -> Vec<&'a Mantra> {
    let term = search.trim().to_lowercase();
    mantras
        .iter()
        .filter(|m| {
            term.is_empty()
                || m.name.to_lowercase().contains(&term)
                || m.translation.to_lowercase().contains(&term)
        })
        .filter(|m| category.matches(m.category))
        .collect()
}

/// Mantra count per category chip, starting with `All`. Categories with
/// no mantras are listed with 0, except `Other`, which only appears when
/// used.
pub fn category_counts(mantras: &[Mantra]) -> Vec<(CategoryFilter, usize)> {
    let mut counts = vec![(CategoryFilter::All, mantras.len())];
    for category in Category::ALL {
        let n = mantras.iter().filter(|m| m.category == category).count();
        if category != Category::Other || n > 0 {
            counts.push((CategoryFilter::Only(category), n));
        }
    }
    counts
}

/// Favorited mantra ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<u32>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it otherwise. Returns whether it is now a
    /// favorite.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for Favorites {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
