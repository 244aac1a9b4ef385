//! Shared HTML walking for the Envoy page extractors.
//!
//! Both pages lay their data out as two-column table rows and flag health with
//! `good`/`bad` classes on arbitrary elements.

use crate::error::ParseError;
use scraper::{ElementRef, Html, Selector};

/// Class marking a healthy status element.
pub const GOOD_CLASS: &str = "good";

/// Class marking an unhealthy status element.
pub const BAD_CLASS: &str = "bad";

/// A table row reduced to its first two cells.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub label: String,
    pub value: String,
}

/// Creates a CSS selector from a string.
pub fn html_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::invalid_selector(selector, e))
}

/// Text content of an element with each text node trimmed and empty nodes
/// dropped, joined by single spaces.
pub fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Selectors locating label/value rows and their cells.
#[derive(Debug, Clone, Copy)]
pub struct RowSelectors<'a> {
    pub row: &'a str,
    pub cell: &'a str,
}

/// Two-column table rows as both Envoy pages render them.
pub const TABLE_ROWS: RowSelectors<'static> = RowSelectors {
    row: "table tr",
    cell: "td",
};

/// Collects every row carrying at least two cells, in document order.
///
/// Rows with fewer cells (headers, spacers) are skipped.
pub fn labeled_rows(
    document: &Html,
    selectors: &RowSelectors,
) -> Result<Vec<LabeledRow>, ParseError> {
    let row_selector = html_selector(selectors.row)?;
    let cell_selector = html_selector(selectors.cell)?;

    Ok(document
        .select(&row_selector)
        .filter_map(|row| {
            let mut cells = row.select(&cell_selector);
            let label = cells.next()?;
            let value = cells.next()?;
            Some(LabeledRow {
                label: element_text(label),
                value: element_text(value),
            })
        })
        .collect())
}

/// Walks the whole tree and returns elements whose class attribute set
/// contains `token`, in document order.
pub fn elements_with_class<'a>(document: &'a Html, token: &str) -> Vec<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().classes().any(|class| class == token))
        .collect()
}
