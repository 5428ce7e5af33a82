//! Per-category scoring of a segmented query.

use crate::config::MatcherConfig;
use crate::distance::{bounded_distance, DistanceBuffer};
use crate::error::{MatchError, Result};
use crate::index::{Part, PartSlot, TaxonomyIndex};
use crate::normalize::{normalize_phrase, Stemmer};
use catmatch_taxonomy::split_path;

/// Leading characters compared by the fuzzy stage.
pub const MAX_COMPARE_LEN: usize = 256;

/// One `>`-separated piece of a query.
#[derive(Debug, Clone)]
pub struct Segment<'q> {
    text: &'q str,
    chars: Vec<char>,
    stem: String,
}

impl<'q> Segment<'q> {
    /// Raw trimmed text.
    pub fn text(&self) -> &'q str {
        self.text
    }

    /// Normalized, stemmed text.
    pub fn stem(&self) -> &str {
        &self.stem
    }
}

/// A query split into segments, with their stems.
#[derive(Debug, Clone)]
pub struct Query<'q> {
    segments: Vec<Segment<'q>>,
}

impl<'q> Query<'q> {
    /// Split `text` on `>`, trim and stem every non-empty segment.
    ///
    /// Fails with [`MatchError::EmptyInput`] when no segment remains.
    pub fn parse(text: &'q str, stemmer: &dyn Stemmer) -> Result<Self> {
        let segments: Vec<Segment<'q>> = split_path(text)
            .map(|segment| Segment {
                text: segment,
                chars: segment.chars().collect(),
                stem: normalize_phrase(segment, stemmer),
            })
            .collect();

        if segments.is_empty() {
            return Err(MatchError::EmptyInput);
        }

        Ok(Self { segments })
    }

    /// Segments in query order.
    pub fn segments(&self) -> &[Segment<'q>] {
        &self.segments
    }

    /// Number of segments (never zero).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Mutable state reused across sequential match calls.
///
/// Each thread (or task) matching concurrently needs its own `Scratch`.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    distance: DistanceBuffer,
}

impl Scratch {
    /// Creates scratch space sized for typical taxonomy names.
    pub fn new() -> Self {
        Self {
            distance: DistanceBuffer::with_capacity(64),
        }
    }
}

/// Scores a query against category paths of one index.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    index: &'a TaxonomyIndex,
    config: &'a MatcherConfig,
}

impl<'a> Scorer<'a> {
    /// Creates a scorer over `index`.
    pub fn new(index: &'a TaxonomyIndex, config: &'a MatcherConfig) -> Self {
        Self { index, config }
    }

    /// Score `query` against the part slots of one category.
    ///
    /// Every segment takes the best of its exact, stem and fuzzy matches
    /// over the path. The last segment may only match the leaf. The sum of
    /// segment scores is divided by the number of query segments, so a
    /// partial query is not penalized for a longer taxonomy path but
    /// unmatched segments are.
    pub fn score(&self, query: &Query<'_>, slots: &[PartSlot], scratch: &mut Scratch) -> f32 {
        let Some(leaf) = slots.last() else {
            return 0.0;
        };
        let last = query.len() - 1;
        let mut total = 0.0f32;

        for (i, segment) in query.segments().iter().enumerate() {
            let candidates = if i == last {
                std::slice::from_ref(leaf)
            } else {
                slots
            };

            let mut best = 0.0f32;
            for &slot in candidates {
                let Some(part) = self.index.part(slot) else {
                    continue;
                };
                let score = self.compare(segment, part, &mut scratch.distance);
                if score > best {
                    best = score;
                    if best >= 1.0 {
                        break;
                    }
                }
            }

            total += best;
        }

        if total <= 0.0 {
            return 0.0;
        }
        total / query.len() as f32
    }

    /// Score of one segment against one part, `0.0` when rejected.
    fn compare(&self, segment: &Segment<'_>, part: &Part, buf: &mut DistanceBuffer) -> f32 {
        if segment.text == part.name() {
            return 1.0;
        }

        // plurals and inflections
        if !segment.stem.is_empty() && segment.stem == part.stem() {
            return 1.0;
        }

        // typos in short words change their meaning (Beef / Beer)
        let min_len = self.config.min_node_length;
        if segment.chars.len() < min_len || part.char_len() < min_len {
            return 0.0;
        }

        let max_distance = self.config.max_node_distance;
        let d = bounded_distance(
            &segment.chars,
            part.chars(),
            MAX_COMPARE_LEN,
            max_distance + 1,
            buf,
        );
        if d > max_distance {
            return 0.0;
        }

        // relative to the taxonomy name: queries are often truncated
        let score = 1.0 - d as f32 / part.char_len() as f32;
        if score < self.config.min_score {
            return 0.0;
        }
        score
    }
}
