//! Parsing of the `<id> - <path>` taxonomy text format.
//!
//! The format is the one Google publishes as `taxonomy-with-ids.<locale>.txt`:
//!
//! ```text
//! # Google_Product_Taxonomy_Version: 2021-09-21
//! 412 - Food, Beverages & Tobacco
//! 413 - Food, Beverages & Tobacco > Beverages
//! ```

use crate::error::{Result, TaxonomyError};
use crate::Category;
use std::io::BufRead;

/// Separator between the id and the display path on a line.
const ID_SEPARATOR: &str = " - ";

/// Parse one source line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub(crate) fn parse_line(line_number: usize, line: &str) -> Result<Option<(Category, String)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let malformed = || TaxonomyError::MalformedLine {
        line_number,
        line: line.to_string(),
    };

    let (id, path) = line.split_once(ID_SEPARATOR).ok_or_else(malformed)?;
    let category: Category = id.parse().map_err(|_| malformed())?;

    Ok(Some((category, path.trim().to_string())))
}

/// Read every entry of a taxonomy source, in source order.
pub(crate) fn read_entries<R: BufRead>(reader: R) -> Result<Vec<(Category, String)>> {
    let mut entries = Vec::with_capacity(5_000);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(entry) = parse_line(idx + 1, &line)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}
