//! HTML-to-entity projections, one module per portal page.
//!
//! Parsers are pure functions over the rendered markup so they can be
//! exercised against fixtures without a browser. Missing leaf fields fall
//! back to sentinels; missing structural anchors are hard errors.

pub mod credits;
pub mod exams;
pub mod fees;
pub mod notifications;
pub mod profile;
pub mod schedule;
pub mod social_work;

use scraper::ElementRef;

/// Collapsed, trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the cell at `index`, when present and non-empty.
pub(crate) fn cell_text(cells: &[ElementRef<'_>], index: usize) -> Option<String> {
    cells
        .get(index)
        .map(|cell| element_text(*cell))
        .filter(|text| !text.is_empty())
}
