use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayKind {
    Fixed,
    Lunar,
}

/// Holidays of one year. `fixed` holds Gregorian-dated holidays, `lunar` the
/// Gregorian dates that lunar holidays fall on in that year.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    #[serde(default)]
    pub fixed: BTreeMap<u32, BTreeSet<u32>>,
    #[serde(default)]
    pub lunar: BTreeMap<u32, BTreeSet<u32>>,
}

impl HolidayTable {
    /// 元旦, 劳动节, 国庆节 as fixed dates; 春节, 清明节, 端午节, 中秋节 as they fall in 2024.
    pub fn reference_2024() -> Self {
        let mut table = Self::default();
        table.add_fixed(1, [1]);
        table.add_fixed(5, [1, 2, 3]);
        table.add_fixed(10, 1..=7);
        table.add_lunar(2, [10]);
        table.add_lunar(4, [5]);
        table.add_lunar(6, [10]);
        table.add_lunar(9, [15]);
        table
    }

    pub fn add_fixed(&mut self, month: u32, days: impl IntoIterator<Item = u32>) {
        self.fixed.entry(month).or_default().extend(days);
    }

    pub fn add_lunar(&mut self, month: u32, days: impl IntoIterator<Item = u32>) {
        self.lunar.entry(month).or_default().extend(days);
    }

    pub fn is_fixed(&self, month: u32, day: u32) -> bool {
        self.fixed.get(&month).is_some_and(|days| days.contains(&day))
    }

    pub fn is_lunar(&self, month: u32, day: u32) -> bool {
        self.lunar.get(&month).is_some_and(|days| days.contains(&day))
    }

    /// Fixed holidays win over lunar ones when a date is listed in both.
    pub fn lookup(&self, month: u32, day: u32) -> Option<HolidayKind> {
        if self.is_fixed(month, day) {
            Some(HolidayKind::Fixed)
        } else if self.is_lunar(month, day) {
            Some(HolidayKind::Lunar)
        } else {
            None
        }
    }
}

/// Holiday tables by year. Only years present here can be classified
/// against holidays; extending to a new year means adding its table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct HolidayCalendar {
    years: BTreeMap<i32, HolidayTable>,
}

impl HolidayCalendar {
    pub fn empty() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    pub fn with_year(mut self, year: i32, table: HolidayTable) -> Self {
        self.years.insert(year, table);
        self
    }

    pub fn table(&self, year: i32) -> Option<&HolidayTable> {
        self.years.get(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::empty().with_year(DEFAULT_REFERENCE_YEAR, HolidayTable::reference_2024())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_2024_tables() {
        let table = HolidayTable::reference_2024();
        assert_eq!(table.lookup(1, 1), Some(HolidayKind::Fixed));
        assert_eq!(table.lookup(10, 7), Some(HolidayKind::Fixed));
        assert_eq!(table.lookup(10, 8), None);
        assert_eq!(table.lookup(2, 10), Some(HolidayKind::Lunar));
        assert_eq!(table.lookup(9, 15), Some(HolidayKind::Lunar));
        assert_eq!(table.lookup(3, 12), None);
    }

    #[test]
    fn test_calendar_json_shape() {
        let calendar = HolidayCalendar::empty().with_year(2025, {
            let mut t = HolidayTable::default();
            t.add_fixed(1, [1]);
            t
        });
        let json = serde_json::to_string(&calendar).unwrap();
        assert_eq!(json, r#"{"2025":{"fixed":{"1":[1]},"lunar":{}}}"#);

        let back: HolidayCalendar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, calendar);
    }

    #[test]
    fn test_missing_lunar_section_defaults_to_empty() {
        let calendar: HolidayCalendar =
            serde_json::from_str(r#"{"2030":{"fixed":{"5":[1]}}}"#).unwrap();
        let table = calendar.table(2030).unwrap();
        assert!(table.is_fixed(5, 1));
        assert!(table.lunar.is_empty());
        assert!(calendar.table(2024).is_none());
    }
}
