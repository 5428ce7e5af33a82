//! Product taxonomy tables for catmatch.
//!
//! This crate provides:
//! - The [`Category`] identifier (id `0` reserved for "unknown")
//! - Loading of the `<id> - <A > B > C>` taxonomy text format
//! - Resolution of category ids and display paths
//!
//! # Example
//!
//! ```
//! use catmatch_taxonomy::{Category, Taxonomy};
//!
//! let taxonomy = Taxonomy::parse(
//!     "412 - Food, Beverages & Tobacco\n413 - Food, Beverages & Tobacco > Beverages\n",
//! )
//! .unwrap();
//!
//! assert_eq!(taxonomy.len(), 2);
//! assert_eq!(taxonomy.resolve("413").unwrap(), Category::new(413));
//! assert_eq!(
//!     taxonomy.resolve("Food, Beverages & Tobacco").unwrap(),
//!     Category::new(412)
//! );
//! ```

mod category;
mod error;
mod loader;

pub use category::Category;
pub use error::{Result, TaxonomyError, TaxonomyErrorCode};

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Separator between nodes of a display path.
pub const PATH_SEPARATOR: char = '>';

/// Split a display path into trimmed, non-empty segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// An immutable `{category -> display path}` table.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    paths: BTreeMap<Category, String>,
    by_path: HashMap<String, Category>,
}

impl Taxonomy {
    /// Parse a taxonomy from its text form.
    pub fn parse(source: &str) -> Result<Self> {
        Self::from_reader(source.as_bytes())
    }

    /// Read a taxonomy from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let entries = loader::read_entries(reader)?;
        Ok(Self::from_paths(entries))
    }

    /// Load a taxonomy file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let taxonomy = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.as_ref().display(),
            categories = taxonomy.len(),
            "Taxonomy loaded"
        );
        Ok(taxonomy)
    }

    /// Build a taxonomy from already parsed `(category, path)` pairs.
    ///
    /// A repeated id replaces the earlier entry.
    pub fn from_paths<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, S)>,
        S: Into<String>,
    {
        let mut paths = BTreeMap::new();
        for (category, path) in entries {
            let path = path.into();
            if let Some(previous) = paths.insert(category, path) {
                tracing::warn!(%category, previous = %previous, "Duplicate taxonomy id, keeping last");
            }
        }

        let by_path = paths
            .iter()
            .map(|(category, path)| (path.clone(), *category))
            .collect();

        Self { paths, by_path }
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if the taxonomy has no categories.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Display path of a category.
    pub fn path(&self, category: Category) -> Option<&str> {
        self.paths.get(&category).map(String::as_str)
    }

    /// Iterate over `(category, display path)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.paths.iter().map(|(category, path)| (*category, path.as_str()))
    }

    /// Check that a category belongs to the taxonomy.
    pub fn validate(&self, category: Category) -> Result<()> {
        if self.paths.contains_key(&category) {
            Ok(())
        } else {
            Err(TaxonomyError::UnknownCategoryId(category.id()))
        }
    }

    /// Look up a category by its exact display path.
    pub fn category_by_name(&self, name: &str) -> Result<Category> {
        self.by_path
            .get(name)
            .copied()
            .ok_or_else(|| TaxonomyError::UnknownCategoryName(name.to_string()))
    }

    /// Resolve either a numeric id or an exact display path.
    pub fn resolve(&self, text: &str) -> Result<Category> {
        let id = text.parse::<Category>().ok();

        if let Some(category) = id {
            if self.validate(category).is_ok() {
                return Ok(category);
            }
        }

        match self.category_by_name(text.trim()) {
            Ok(category) => Ok(category),
            Err(_) => match id {
                Some(category) => Err(TaxonomyError::UnknownCategoryId(category.id())),
                None => Err(TaxonomyError::UnknownCategoryName(text.to_string())),
            },
        }
    }
}
