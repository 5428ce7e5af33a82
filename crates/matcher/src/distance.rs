//! Bounded Levenshtein edit distance.
//!
//! The hot path compares a query segment against thousands of taxonomy part
//! names per call, so the distance works on pre-decoded character slices,
//! keeps a single rolling row, and stops as soon as the result is known to
//! reach the cap.

/// Reusable row storage for [`bounded_distance`].
///
/// One buffer serves any number of sequential calls; it grows to the
/// shorter input's length + 1 on demand and never shrinks.
#[derive(Debug, Clone, Default)]
pub struct DistanceBuffer {
    row: Vec<usize>,
}

impl DistanceBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer that fits inputs of up to `len` characters without
    /// reallocating.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            row: Vec::with_capacity(len + 1),
        }
    }

    fn prepare(&mut self, len: usize) -> &mut [usize] {
        self.row.clear();
        self.row.extend(0..=len);
        &mut self.row
    }
}

/// Levenshtein distance between two character sequences, capped at `cap`.
///
/// Only the first `max_len` characters of each input are compared. The
/// return value is exactly `min(distance, cap)`: once every cell of a row
/// reaches `cap` the final distance cannot drop below it, so the computation
/// stops early.
///
/// # Arguments
/// * `a` - First sequence
/// * `b` - Second sequence
/// * `max_len` - Number of leading characters considered from each input
/// * `cap` - Upper bound on the returned value
/// * `buf` - Scratch row, reused across calls
pub fn bounded_distance(
    a: &[char],
    b: &[char],
    max_len: usize,
    cap: usize,
    buf: &mut DistanceBuffer,
) -> usize {
    let a = &a[..a.len().min(max_len)];
    let b = &b[..b.len().min(max_len)];

    if a == b {
        return 0;
    }

    // rolling row runs over the shorter input
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len().min(cap);
    }
    if long.len() - short.len() >= cap {
        return cap;
    }

    let row = buf.prepare(short.len());

    for (j, &lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = j + 1;
        let mut row_min = row[0];

        for i in 1..=short.len() {
            let above = row[i];
            let cost = usize::from(short[i - 1] != lc);
            let value = (above + 1).min(row[i - 1] + 1).min(diag + cost);
            diag = above;
            row[i] = value;
            row_min = row_min.min(value);
        }

        if row_min >= cap {
            return cap;
        }
    }

    row[short.len()].min(cap)
}

/// Calculate Levenshtein edit distance between two strings.
///
/// Unbounded convenience wrapper that allocates its own buffer.
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    bounded_distance(&a, &b, usize::MAX, usize::MAX, &mut DistanceBuffer::new())
}

/// Levenshtein distance between two strings capped at `cap`, reusing `buf`.
pub fn bounded_levenshtein(a: &str, b: &str, cap: usize, buf: &mut DistanceBuffer) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    bounded_distance(&a, &b, usize::MAX, cap, buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_table() {
        let cases = [
            ("kitten", "sitting", 3),
            ("book", "back", 2),
            ("", "abc", 3),
            ("abc", "", 3),
            ("", "", 0),
            ("a", "a", 0),
            ("a", "b", 1),
            ("ab", "abc", 1),
            ("abc", "ab", 1),
            ("abc", "acb", 2),
            ("abc", "def", 3),
            ("hello", "helo", 1),
            ("world", "word", 1),
            ("distance", "difference", 5),
        ];

        for (a, b, expected) in cases {
            assert_eq!(levenshtein_distance(a, b), expected, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
        assert_eq!(levenshtein_distance("", "größe"), 5);
    }

    #[test]
    fn test_cap_stops_early() {
        let mut buf = DistanceBuffer::new();
        assert_eq!(bounded_levenshtein("Beverages", "Tobacco Products", 6, &mut buf), 6);
        assert_eq!(bounded_levenshtein("Potato", "Potatoes", 6, &mut buf), 2);
        // length difference alone exceeds the cap
        assert_eq!(bounded_levenshtein("Citrus", "Citrus Fruits", 6, &mut buf), 6);
    }

    #[test]
    fn test_max_len_truncates() {
        let a: Vec<char> = "abcdefXYZ".chars().collect();
        let b: Vec<char> = "abcdefQRS".chars().collect();
        let mut buf = DistanceBuffer::new();
        assert_eq!(bounded_distance(&a, &b, 6, 10, &mut buf), 0);
        assert_eq!(bounded_distance(&a, &b, 9, 10, &mut buf), 3);
    }

    #[test]
    fn test_buffer_reuse_across_lengths() {
        let mut buf = DistanceBuffer::with_capacity(2);
        let d = bounded_levenshtein(
            "Fresh & Frozen Fruits",
            "Fresh & Frozen Vegetables",
            20,
            &mut buf,
        );
        assert_eq!(d, 8);
        assert_eq!(bounded_levenshtein("ab", "abc", 20, &mut buf), 1);
    }

    proptest! {
        #[test]
        fn prop_identity(s in "\\PC{0,24}") {
            prop_assert_eq!(levenshtein_distance(&s, &s), 0);
        }

        #[test]
        fn prop_symmetry(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
            prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        }

        #[test]
        fn prop_empty_is_length(s in "\\PC{0,24}") {
            prop_assert_eq!(levenshtein_distance("", &s), s.chars().count());
            prop_assert_eq!(levenshtein_distance(&s, ""), s.chars().count());
        }

        #[test]
        fn prop_triangle(a in "[a-e]{0,10}", b in "[a-e]{0,10}", c in "[a-e]{0,10}") {
            let ab = levenshtein_distance(&a, &b);
            let bc = levenshtein_distance(&b, &c);
            let ac = levenshtein_distance(&a, &c);
            prop_assert!(ac <= ab + bc);
        }

        #[test]
        fn prop_bounded_is_capped_exact(a in "[a-f]{0,14}", b in "[a-f]{0,14}", cap in 0usize..10) {
            let mut buf = DistanceBuffer::new();
            let exact = levenshtein_distance(&a, &b);
            prop_assert_eq!(bounded_levenshtein(&a, &b, cap, &mut buf), exact.min(cap));
        }
    }
}
