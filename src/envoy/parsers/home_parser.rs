//! Extraction of the `/home` system overview page.

use scraper::Html;

use crate::envoy::html_parsing::{
    element_text, elements_with_class, labeled_rows, RowSelectors, BAD_CLASS, GOOD_CLASS,
    TABLE_ROWS,
};
use crate::envoy::parsers::label_rules::{find_rule, HOME_RULES};
use crate::error::ParseError;
use crate::model::{MetricKey, MetricValue, Page, PageExtractor, PartialMap, Status};

/// Reads lifetime totals, inverter counts and device info from `/home`,
/// plus the microinverter and web status markers.
#[derive(Debug, Default, Clone, Copy)]
pub struct HomePageExtractor;

impl HomePageExtractor {
    /// Extracts `/home` reading label/value rows through `rows`.
    ///
    /// If scanning fails part way, the failure is logged and the map gathered
    /// so far is returned.
    pub fn extract_with(&self, document: &Html, rows: &RowSelectors) -> PartialMap {
        let mut partial = PartialMap::new(Page::Home);
        // status fields are never Absent, even if scanning stops early
        partial.insert(
            MetricKey::MicroinvertersStatus,
            MetricValue::Status(Status::Offline),
        );
        partial.insert(MetricKey::WebStatus, MetricValue::Status(Status::Offline));

        if let Err(err) = self.scan(document, rows, &mut partial) {
            tracing::warn!(error = %err, "Error parsing home page");
        }

        tracing::debug!(
            absent = partial.iter().filter(|(_, value)| value.is_absent()).count(),
            "Parsed home page data: {:?}",
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
            if let Some(rule) = find_rule(HOME_RULES, &row.label) {
                partial.insert(rule.key, rule.parser.value_for(rule.key, &row.value));
            }
        }

        let good: Vec<String> = elements_with_class(document, GOOD_CLASS)
            .into_iter()
            .map(element_text)
            .collect();
        let bad = elements_with_class(document, BAD_CLASS).len();
        tracing::trace!(good = good.len(), bad, "Status markers on home page");

        partial.insert(
            MetricKey::MicroinvertersStatus,
            status_value(&good, "Microinverters"),
        );
        partial.insert(MetricKey::WebStatus, status_value(&good, "Web"));

        Ok(())
    }
}

fn status_value(good: &[String], needle: &str) -> MetricValue {
    MetricValue::Status(Status::from_online(
        good.iter().any(|text| text.contains(needle)),
    ))
}

impl PageExtractor for HomePageExtractor {
    fn page(&self) -> Page {
        Page::Home
    }

    fn extract(&self, document: &Html) -> PartialMap {
        self.extract_with(document, &TABLE_ROWS)
    }
}
