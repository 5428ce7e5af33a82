//! Phrase normalization.
//!
//! A phrase is reduced to lowercase, letters-only, stemmed words joined by
//! single spaces, so that "Citrus Fruit" and "citrus fruits" compare equal.

use std::borrow::Cow;

/// Reduces a single lowercase word to its canonical form.
pub trait Stemmer: Send + Sync {
    /// Stem one lowercase, letters-only word.
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// Snowball English stemmer.
pub struct EnglishStemmer {
    inner: rust_stemmers::Stemmer,
}

impl EnglishStemmer {
    /// Creates the English stemmer.
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(rust_stemmers::Algorithm::English),
        }
    }
}

impl Default for EnglishStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnglishStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EnglishStemmer")
    }
}

impl Stemmer for EnglishStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.inner.stem(word)
    }
}

/// Leaves words unchanged. For taxonomies in languages without a stemmer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}

/// Normalize a phrase into its stemmed form.
///
/// Words are split on whitespace, lowercased and stripped of every
/// non-letter character, then stemmed. Words left empty are dropped.
///
/// # Example
/// ```
/// use catmatch_matcher::{normalize_phrase, EnglishStemmer};
///
/// let stemmer = EnglishStemmer::new();
/// assert_eq!(
///     normalize_phrase("Citrus Fruits", &stemmer),
///     normalize_phrase("citrus fruit", &stemmer)
/// );
/// ```
pub fn normalize_phrase(phrase: &str, stemmer: &dyn Stemmer) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut word = String::new();

    for raw in phrase.split_whitespace() {
        word.clear();
        for c in raw.chars().filter(|c| c.is_alphabetic()) {
            word.extend(c.to_lowercase());
        }

        if word.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&stemmer.stem(&word));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_strip() {
        assert_eq!(normalize_phrase("Meat, Seafood & Eggs", &IdentityStemmer), "meat seafood eggs");
        assert_eq!(normalize_phrase("  T-Shirts  ", &IdentityStemmer), "tshirts");
    }

    #[test]
    fn test_empty_words_dropped() {
        assert_eq!(normalize_phrase("& 123 --", &IdentityStemmer), "");
        assert_eq!(normalize_phrase("Baby & Toddler", &IdentityStemmer), "baby toddler");
    }

    #[test]
    fn test_plural_stems_agree() {
        let stemmer = EnglishStemmer::new();
        assert_eq!(normalize_phrase("Potatoes", &stemmer), "potato");
        assert_eq!(normalize_phrase("Potato", &stemmer), "potato");
        assert_eq!(normalize_phrase("Juices", &stemmer), normalize_phrase("Juice", &stemmer));
        assert_eq!(
            normalize_phrase("Citrus Fruit", &stemmer),
            normalize_phrase("Citrus Fruits", &stemmer)
        );
    }

    #[test]
    fn test_distinct_words_stay_distinct() {
        let stemmer = EnglishStemmer::new();
        assert_ne!(normalize_phrase("Beef", &stemmer), normalize_phrase("Beer", &stemmer));
        assert_ne!(normalize_phrase("Citrus", &stemmer), normalize_phrase("Citrus Fruits", &stemmer));
    }

    #[test]
    fn test_unicode_letters_kept() {
        assert_eq!(normalize_phrase("Crème Brûlée", &IdentityStemmer), "crème brûlée");
    }
}
