use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::entry::Entry;

/// Per-month sums keyed by month label (`4月`), in first-seen order.
/// Sums saturate at `u64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    months: Vec<(String, u64)>,
}

impl MonthlyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, month: &str, value: u64) {
        match self.months.iter_mut().find(|(label, _)| label == month) {
            Some((_, total)) => *total = total.saturating_add(value),
            None => self.months.push((month.to_string(), value)),
        }
    }

    pub fn get(&self, month: &str) -> Option<u64> {
        self.months
            .iter()
            .find(|(label, _)| label == month)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.months.iter().map(|(label, total)| (label.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

// Serialized as a JSON object whose keys keep insertion order.
impl Serialize for MonthlyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.months.len()))?;
        for (label, total) in &self.months {
            map.serialize_entry(label, total)?;
        }
        map.end()
    }
}

#[derive(serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDataset {
    pub entries: Vec<Entry>,
    pub monthly_totals: MonthlyTotals,
    pub total_amount: u64,
}

impl ParsedDataset {
    /// Folds one entry into the aggregates.
    pub fn push(&mut self, entry: Entry) {
        self.monthly_totals.add(entry.date.month_label(), entry.value);
        self.total_amount = self.total_amount.saturating_add(entry.value);
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Arithmetic mean of the entry values.
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.total_amount as f64 / self.entries.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::DateToken;

    #[test]
    fn test_monthly_totals_keep_first_seen_order() {
        let mut totals = MonthlyTotals::new();
        totals.add("5月", 10);
        totals.add("4月", 1);
        totals.add("5月", 5);

        let collected: Vec<_> = totals.iter().collect();
        assert_eq!(collected, vec![("5月", 15), ("4月", 1)]);
        assert_eq!(totals.len(), 2);
        assert!(!totals.is_empty());
        assert!(MonthlyTotals::new().is_empty());
        assert_eq!(totals.get("4月"), Some(1));
        assert_eq!(totals.get("6月"), None);
    }

    #[test]
    fn test_push_and_mean() {
        let mut dataset = ParsedDataset::default();
        assert_eq!(dataset.mean(), None);

        dataset.push(Entry::new(DateToken::new("4月7号"), 100));
        dataset.push(Entry::new(DateToken::new("4月8号"), 50));
        dataset.push(Entry::new(DateToken::new("5月1号"), 0));

        assert_eq!(dataset.total_amount, 150);
        assert_eq!(dataset.monthly_totals.get("4月"), Some(150));
        assert_eq!(dataset.monthly_totals.get("5月"), Some(0));
        assert_eq!(dataset.mean(), Some(50.0));
    }

    #[test]
    fn test_serialize_keeps_month_order() {
        let mut dataset = ParsedDataset::default();
        dataset.push(Entry::new(DateToken::new("12月1号"), 3));
        dataset.push(Entry::new(DateToken::new("1月2号"), 4));

        let json = serde_json::to_string(&dataset.monthly_totals).unwrap();
        assert_eq!(json, r#"{"12月":3,"1月":4}"#);
    }
}
