use chrono::{Datelike, Weekday};
use serde::Serialize;
use tracing::warn;

use crate::model::entry::DateToken;
use crate::model::holiday::{HolidayCalendar, HolidayKind, HolidayTable, DEFAULT_REFERENCE_YEAR};
use crate::model::settings::Settings;
use crate::time::{lenient_date, WeekendPolicy};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekend,
    FixedHoliday,
    LunarHoliday,
    Regular,
}

impl DayKind {
    pub fn is_non_working(self) -> bool {
        self != DayKind::Regular
    }
}

/// Decides whether a date of the reference year is a non-working day.
#[derive(Debug, Clone)]
pub struct Classifier {
    year: i32,
    policy: WeekendPolicy,
    holidays: HolidayTable,
}

impl Classifier {
    pub fn new(year: i32, policy: WeekendPolicy, calendar: &HolidayCalendar) -> Self {
        let holidays = match calendar.table(year) {
            Some(table) => table.clone(),
            None => {
                warn!(
                    year,
                    available = ?calendar.years().collect::<Vec<_>>(),
                    "no holiday table for reference year, only weekends will be flagged"
                );
                HolidayTable::default()
            }
        };
        Self { year, policy, holidays }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.reference_year, settings.weekend_policy, &settings.calendar)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn policy(&self) -> WeekendPolicy {
        self.policy
    }

    pub fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    /// Weekday of the token in the reference year, if it can be placed at all.
    pub fn weekday(&self, date: &DateToken) -> Option<Weekday> {
        let (month, day) = date.month_day()?;
        lenient_date(self.year, month, day).map(|d| d.weekday())
    }

    pub fn classify(&self, date: &DateToken) -> DayKind {
        let Some((month, day)) = date.month_day() else {
            return DayKind::Regular;
        };

        if let Some(weekday) = lenient_date(self.year, month, day).map(|d| d.weekday()) {
            if self.policy.is_weekend(weekday) {
                return DayKind::Weekend;
            }
        }

        match self.holidays.lookup(month, day) {
            Some(HolidayKind::Fixed) => DayKind::FixedHoliday,
            Some(HolidayKind::Lunar) => DayKind::LunarHoliday,
            None => DayKind::Regular,
        }
    }

    pub fn is_non_working_day(&self, date: &DateToken) -> bool {
        self.classify(date).is_non_working()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_YEAR, WeekendPolicy::default(), &HolidayCalendar::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> DateToken {
        DateToken::new(s)
    }

    #[test]
    fn test_fixed_holiday() {
        let classifier = Classifier::default();
        // 2024-01-01 is a Monday, so only the table flags it
        assert!(classifier.is_non_working_day(&token("1月1号")));
        assert_eq!(classifier.classify(&token("1月1号")), DayKind::FixedHoliday);
    }

    #[test]
    fn test_lunar_holiday() {
        let classifier = Classifier::default();
        assert!(classifier.is_non_working_day(&token("2月10号")));
        // 2024-09-15 is a Sunday, not a weekend under the default policy
        assert_eq!(classifier.classify(&token("9月15号")), DayKind::LunarHoliday);
    }

    #[test]
    fn test_regular_tuesday() {
        let classifier = Classifier::default();
        assert!(!classifier.is_non_working_day(&token("3月12号")));
        assert_eq!(classifier.classify(&token("3月12号")), DayKind::Regular);
    }

    #[test]
    fn test_default_policy_flags_friday_and_saturday() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&token("4月5号")), DayKind::Weekend); // Friday
        assert_eq!(classifier.classify(&token("4月6号")), DayKind::Weekend); // Saturday
        assert_eq!(classifier.classify(&token("4月7号")), DayKind::Regular); // Sunday
    }

    #[test]
    fn test_saturday_sunday_policy() {
        let classifier = Classifier::new(2024, WeekendPolicy::SaturdaySunday, &HolidayCalendar::default());
        assert_eq!(classifier.classify(&token("4月7号")), DayKind::Weekend);
        // Friday, but still Qingming
        assert_eq!(classifier.classify(&token("4月5号")), DayKind::LunarHoliday);
        assert_eq!(classifier.classify(&token("4月12号")), DayKind::Regular);
    }

    #[test]
    fn test_malformed_token_is_regular() {
        let classifier = Classifier::default();
        assert!(!classifier.is_non_working_day(&token("hello")));
        assert!(!classifier.is_non_working_day(&token("")));
    }

    #[test]
    fn test_rollover_date_uses_weekday_of_carried_date() {
        let classifier = Classifier::default();
        // 2024-02-30 carries to Friday 2024-03-01
        assert_eq!(classifier.weekday(&token("2月30号")), Some(Weekday::Fri));
        assert!(classifier.is_non_working_day(&token("2月30号")));
    }

    #[test]
    fn test_unknown_year_has_no_holidays() {
        // 2025-01-01 is a Wednesday
        let classifier = Classifier::new(2025, WeekendPolicy::FridaySaturday, &HolidayCalendar::default());
        assert!(classifier.holidays().fixed.is_empty());
        assert!(!classifier.is_non_working_day(&token("1月1号")));
    }
}
