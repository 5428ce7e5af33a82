//! Taxonomy index: deduplicated parts and per-category part slots.

use crate::normalize::{normalize_phrase, Stemmer};
use catmatch_taxonomy::{split_path, Category, Taxonomy};
use std::collections::HashMap;

/// Position of a part in [`TaxonomyIndex::parts`].
pub type PartSlot = usize;

/// A unique path segment of the taxonomy.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    stem: String,
    chars: Vec<char>,
}

impl Part {
    fn new(name: &str, stemmer: &dyn Stemmer) -> Self {
        Self {
            name: name.to_string(),
            stem: normalize_phrase(name, stemmer),
            chars: name.chars().collect(),
        }
    }

    /// Display name, trimmed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized, stemmed form of the name.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Name as characters.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Name length in characters.
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }
}

/// Read-only index over a taxonomy, built once.
///
/// Categories are kept in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    parts: Vec<Part>,
    categories: Vec<(Category, Vec<PartSlot>)>,
}

impl TaxonomyIndex {
    /// Build the index from `(category, display path)` pairs.
    ///
    /// Paths are split on `>`; identical segments anywhere in the taxonomy
    /// share one part slot.
    pub fn build<I, S>(paths: I, stemmer: &dyn Stemmer) -> Self
    where
        I: IntoIterator<Item = (Category, S)>,
        S: AsRef<str>,
    {
        let mut paths: Vec<(Category, S)> = paths.into_iter().collect();
        paths.sort_by_key(|(category, _)| *category);

        let mut parts: Vec<Part> = Vec::with_capacity(paths.len() * 2);
        let mut slot_by_name: HashMap<&str, PartSlot> = HashMap::with_capacity(paths.len() * 2);
        let mut categories = Vec::with_capacity(paths.len());

        for (category, path) in &paths {
            let slots: Vec<PartSlot> = split_path(path.as_ref())
                .map(|segment| {
                    *slot_by_name.entry(segment).or_insert_with(|| {
                        parts.push(Part::new(segment, stemmer));
                        parts.len() - 1
                    })
                })
                .collect();
            categories.push((*category, slots));
        }

        tracing::debug!(
            categories = categories.len(),
            parts = parts.len(),
            "Taxonomy index built"
        );

        Self { parts, categories }
    }

    /// Build the index from a loaded taxonomy.
    pub fn from_taxonomy(taxonomy: &Taxonomy, stemmer: &dyn Stemmer) -> Self {
        Self::build(taxonomy.iter(), stemmer)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of distinct parts.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// All parts, in slot order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Part stored at `slot`.
    pub fn part(&self, slot: PartSlot) -> Option<&Part> {
        self.parts.get(slot)
    }

    /// Ordered part slots of a category's path, root first.
    pub fn category_parts(&self, category: Category) -> Option<&[PartSlot]> {
        self.categories
            .binary_search_by_key(&category, |(c, _)| *c)
            .ok()
            .map(|idx| self.categories[idx].1.as_slice())
    }

    /// Iterate over categories and their part slots in ascending id order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[PartSlot])> {
        self.categories
            .iter()
            .map(|(category, slots)| (*category, slots.as_slice()))
    }

    /// Deepest path length in the index.
    pub fn max_depth(&self) -> usize {
        self.categories
            .iter()
            .map(|(_, slots)| slots.len())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{EnglishStemmer, IdentityStemmer};

    fn sample() -> Vec<(Category, &'static str)> {
        vec![
            (Category::new(413), "Food, Beverages & Tobacco > Beverages"),
            (Category::new(412), "Food, Beverages & Tobacco"),
            (Category::new(2887), "Food, Beverages & Tobacco > Beverages > Juice"),
        ]
    }

    #[test]
    fn test_parts_deduplicated() {
        let index = TaxonomyIndex::build(sample(), &IdentityStemmer);

        assert_eq!(index.len(), 3);
        assert_eq!(index.part_count(), 3);
        assert_eq!(index.category_parts(Category::new(2887)), Some(&[0, 1, 2][..]));
        assert_eq!(index.category_parts(Category::new(413)), Some(&[0, 1][..]));
    }

    #[test]
    fn test_slots_follow_id_order() {
        let index = TaxonomyIndex::build(sample(), &IdentityStemmer);

        // 412 is first by id, so its only segment takes slot 0
        assert_eq!(index.part(0).unwrap().name(), "Food, Beverages & Tobacco");
        let ids: Vec<u32> = index.categories().map(|(c, _)| c.id()).collect();
        assert_eq!(ids, vec![412, 413, 2887]);
    }

    #[test]
    fn test_part_stems() {
        let index = TaxonomyIndex::build(
            [(Category::new(6658), "Fruits > Citrus Fruits")],
            &EnglishStemmer::new(),
        );
        let part = index.part(1).unwrap();
        assert_eq!(part.name(), "Citrus Fruits");
        assert_eq!(part.stem(), "citrus fruit");
        assert_eq!(part.char_len(), 13);
    }

    #[test]
    fn test_segments_trimmed_and_repeats_kept() {
        let index = TaxonomyIndex::build(
            [(Category::new(1), "  A >B>  A  ")],
            &IdentityStemmer,
        );
        assert_eq!(index.part_count(), 2);
        assert_eq!(index.category_parts(Category::new(1)), Some(&[0, 1, 0][..]));
    }

    #[test]
    fn test_empty_path() {
        let index = TaxonomyIndex::build([(Category::new(5), " ")], &IdentityStemmer);
        assert_eq!(index.len(), 1);
        assert_eq!(index.category_parts(Category::new(5)), Some(&[][..]));
        assert_eq!(index.max_depth(), 0);
    }

    #[test]
    fn test_unknown_category() {
        let index = TaxonomyIndex::build(sample(), &IdentityStemmer);
        assert!(index.category_parts(Category::new(9)).is_none());
        assert_eq!(index.max_depth(), 3);
    }
}
