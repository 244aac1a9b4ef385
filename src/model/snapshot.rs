use chrono::{DateTime, Local};
use std::collections::BTreeMap;

use super::types::{MetricKey, MetricValue, Page};

/// Values extracted from a single page, before merging.
///
/// Every key the page is responsible for is present from the start as
/// [`MetricValue::Absent`] and is overwritten as rows are recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialMap {
    page: Page,
    values: BTreeMap<MetricKey, MetricValue>,
}

impl PartialMap {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            values: page.keys().map(|key| (key, MetricValue::Absent)).collect(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn insert(&mut self, key: MetricKey, value: MetricValue) {
        self.values.insert(key, value);
    }

    #[cfg(test)]
    pub fn get(&self, key: MetricKey) -> Option<&MetricValue> {
        self.values.get(&key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, &MetricValue)> {
        self.values.iter()
    }
}

/// The merged result of one refresh cycle. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    values: BTreeMap<MetricKey, MetricValue>,
    collected_at: DateTime<Local>,
}

impl Snapshot {
    /// Merges partial maps in the order given.
    ///
    /// Pages own disjoint key sets, so this is a plain union. A key produced
    /// twice is logged as an error and the later map wins.
    pub fn merge(partials: Vec<PartialMap>, collected_at: DateTime<Local>) -> Self {
        let mut values: BTreeMap<MetricKey, MetricValue> = BTreeMap::new();
        let mut owners: BTreeMap<MetricKey, Page> = BTreeMap::new();

        for partial in partials {
            let page = partial.page();
            for (key, value) in partial.values {
                if let Some(previous) = owners.insert(key, page) {
                    tracing::error!(
                        key = %key,
                        first = %previous,
                        second = %page,
                        "Metric produced by more than one page, keeping the later value"
                    );
                }
                values.insert(key, value);
            }
        }

        Self {
            values,
            collected_at,
        }
    }

    /// Point read. Keys missing from this snapshot read as Absent.
    pub fn get(&self, key: MetricKey) -> MetricValue {
        self.values.get(&key).cloned().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains(&self, key: MetricKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn collected_at(&self) -> DateTime<Local> {
        self.collected_at
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetricKey, &MetricValue)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn test_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    mod succeeds {
        use super::*;

        #[test]
        fn test_partial_map_starts_absent_for_page_keys() {
            let partial = PartialMap::new(Page::Production);

            assert_eq!(partial.len(), 5);
            assert_eq!(partial.get(MetricKey::TodayEnergy), Some(&MetricValue::Absent));
            assert_eq!(partial.get(MetricKey::CurrentPower), None);
        }

        #[test]
        fn test_page_key_sets_are_disjoint_and_complete() {
            let home: HashSet<MetricKey> = Page::Home.keys().collect();
            let production: HashSet<MetricKey> = Page::Production.keys().collect();

            assert!(home.is_disjoint(&production));
            assert_eq!(home.len() + production.len(), MetricKey::ALL.len());
            assert!(home.contains(&MetricKey::WebStatus));
            assert!(production.contains(&MetricKey::SystemLiveSince));
        }

        #[test]
        fn test_merge_unions_both_pages() {
            let mut home = PartialMap::new(Page::Home);
            home.insert(MetricKey::CurrentPower, MetricValue::Float(92.8));
            let mut production = PartialMap::new(Page::Production);
            production.insert(MetricKey::TodayEnergy, MetricValue::Float(11700.0));

            let snapshot = Snapshot::merge(vec![home, production], test_timestamp());

            assert_eq!(snapshot.len(), MetricKey::ALL.len());
            assert_eq!(snapshot.get(MetricKey::CurrentPower), MetricValue::Float(92.8));
            assert_eq!(snapshot.get(MetricKey::TodayEnergy), MetricValue::Float(11700.0));
            assert_eq!(snapshot.get(MetricKey::WeekEnergy), MetricValue::Absent);
            assert_eq!(snapshot.collected_at(), test_timestamp());
        }

        #[test]
        fn test_merge_single_page_leaves_other_keys_missing() {
            let snapshot = Snapshot::merge(vec![PartialMap::new(Page::Home)], test_timestamp());

            assert!(snapshot.contains(MetricKey::InvertersTotal));
            assert!(!snapshot.contains(MetricKey::TodayEnergy));
            assert!(snapshot.get(MetricKey::TodayEnergy).is_absent());
        }
    }

    mod fails {
        use super::*;

        #[test]
        fn test_merge_collision_keeps_later_value() {
            let mut first = PartialMap::new(Page::Home);
            first.insert(MetricKey::WebStatus, MetricValue::Status(Status::Offline));
            let mut second = PartialMap::new(Page::Home);
            second.insert(MetricKey::WebStatus, MetricValue::Status(Status::Online));

            let snapshot = Snapshot::merge(vec![first, second], test_timestamp());

            assert_eq!(
                snapshot.get(MetricKey::WebStatus),
                MetricValue::Status(Status::Online)
            );
        }
    }
}
