use serde::{Deserialize, Serialize};

use crate::model::holiday::{HolidayCalendar, DEFAULT_REFERENCE_YEAR};
use crate::time::WeekendPolicy;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub reference_year: i32,
    pub weekend_policy: WeekendPolicy,
    pub calendar: HolidayCalendar,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            weekend_policy: WeekendPolicy::default(),
            calendar: HolidayCalendar::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"weekend_policy":"saturday-sunday"}"#).unwrap();
        assert_eq!(settings.reference_year, 2024);
        assert_eq!(settings.weekend_policy, WeekendPolicy::SaturdaySunday);
        assert!(settings.calendar.table(2024).is_some());
    }
}
