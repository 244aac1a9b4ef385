//! Extraction of the `/production` energy page.

use scraper::Html;

use crate::envoy::html_parsing::{
    element_text, elements_with_class, labeled_rows, RowSelectors, GOOD_CLASS, TABLE_ROWS,
};
use crate::envoy::parsers::label_rules::{find_rule, PRODUCTION_RULES};
use crate::error::ParseError;
use crate::model::{MetricKey, MetricValue, Page, PageExtractor, PartialMap};

/// Reads current production and period totals from `/production`, plus the
/// "system live since" marker.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductionPageExtractor;

impl ProductionPageExtractor {
    /// Extracts `/production` reading label/value rows through `rows`.
    pub fn extract_with(&self, document: &Html, rows: &RowSelectors) -> PartialMap {
        let mut partial = PartialMap::new(Page::Production);

        if let Err(err) = self.scan(document, rows, &mut partial) {
            tracing::warn!(error = %err, "Error parsing production page");
        }

        tracing::debug!(
            absent = partial.iter().filter(|(_, value)| value.is_absent()).count(),
            "Parsed production page data: {:?}",
            partial
        );
        partial
    }

    fn scan(
        &self,
        document: &Html,
        rows: &RowSelectors,
        partial: &mut PartialMap,
    ) -> Result<(), ParseError> {
        for row in labeled_rows(document, rows)? {
            if let Some(rule) = find_rule(PRODUCTION_RULES, &row.label) {
                partial.insert(rule.key, rule.parser.value_for(rule.key, &row.value));
            }
        }

        // the first good marker carrying a digit holds the live-since date
        let live_since = elements_with_class(document, GOOD_CLASS)
            .into_iter()
            .map(element_text)
            .find(|text| text.chars().any(|c| c.is_ascii_digit()));
        if let Some(text) = live_since {
            partial.insert(MetricKey::SystemLiveSince, MetricValue::Text(text));
        }

        Ok(())
    }
}

impl PageExtractor for ProductionPageExtractor {
    fn page(&self) -> Page {
        Page::Production
    }

    fn extract(&self, document: &Html) -> PartialMap {
        self.extract_with(document, &TABLE_ROWS)
    }
}
