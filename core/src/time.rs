use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which weekdays count as weekend.
///
/// `FridaySaturday` is the historical behavior of the chart (days 5 and 6 in a
/// Sunday=0 numbering) and stays the default; `SaturdaySunday` is the usual
/// weekend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WeekendPolicy {
    #[default]
    FridaySaturday,
    SaturdaySunday,
}

impl WeekendPolicy {
    pub fn is_weekend(self, weekday: Weekday) -> bool {
        match self {
            WeekendPolicy::FridaySaturday => matches!(weekday, Weekday::Fri | Weekday::Sat),
            WeekendPolicy::SaturdaySunday => matches!(weekday, Weekday::Sat | Weekday::Sun),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekendPolicy::FridaySaturday => "friday-saturday",
            WeekendPolicy::SaturdaySunday => "saturday-sunday",
        }
    }
}

impl fmt::Display for WeekendPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekendPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "friday-saturday" | "fri-sat" | "fs" => Ok(WeekendPolicy::FridaySaturday),
            "saturday-sunday" | "sat-sun" | "ss" => Ok(WeekendPolicy::SaturdaySunday),
            _ => Err(anyhow!("Unknown weekend policy: {}", s)),
        }
    }
}

/// Builds a date the lenient way: months past December carry into the next
/// year and days past the end of the month carry into the next month
/// (`2024, 2, 30` is March 1st, day 0 is the last day of the previous month).
pub fn lenient_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let months_from_jan = i64::from(month) - 1;
    let year = i64::from(year) + months_from_jan.div_euclid(12);
    let month = months_from_jan.rem_euclid(12) as u32 + 1;

    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_policy_weekdays() {
        let fs = WeekendPolicy::FridaySaturday;
        assert!(fs.is_weekend(Weekday::Fri));
        assert!(fs.is_weekend(Weekday::Sat));
        assert!(!fs.is_weekend(Weekday::Sun));

        let ss = WeekendPolicy::SaturdaySunday;
        assert!(!ss.is_weekend(Weekday::Fri));
        assert!(ss.is_weekend(Weekday::Sat));
        assert!(ss.is_weekend(Weekday::Sun));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("friday-saturday".parse::<WeekendPolicy>().unwrap(), WeekendPolicy::FridaySaturday);
        assert_eq!("Sat-Sun".parse::<WeekendPolicy>().unwrap(), WeekendPolicy::SaturdaySunday);
        assert!("weekdays".parse::<WeekendPolicy>().is_err());
    }

    #[test]
    fn test_lenient_date_in_range() {
        assert_eq!(lenient_date(2024, 4, 7), Some(ymd(2024, 4, 7)));
        assert_eq!(lenient_date(2024, 2, 29), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_lenient_date_rollover() {
        assert_eq!(lenient_date(2024, 2, 30), Some(ymd(2024, 3, 1)));
        assert_eq!(lenient_date(2024, 13, 1), Some(ymd(2025, 1, 1)));
        assert_eq!(lenient_date(2024, 0, 1), Some(ymd(2023, 12, 1)));
        assert_eq!(lenient_date(2024, 3, 0), Some(ymd(2024, 2, 29)));
        assert_eq!(lenient_date(2024, 2, 30).map(|d| d.weekday()), Some(Weekday::Fri));
    }
}
