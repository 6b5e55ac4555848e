use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)月([0-9]+)号").expect("date token pattern is valid"));

const MONTH_MARKER: char = '月';

/// A day of the reference year, kept in the form it was written (`4月7号`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DateToken(String);

impl DateToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `<digits>月` part, e.g. `4月`. Empty when the token has no month marker.
    pub fn month_label(&self) -> &str {
        match self.0.find(MONTH_MARKER) {
            Some(idx) => &self.0[..idx + MONTH_MARKER.len_utf8()],
            None => "",
        }
    }

    /// Month and day re-read from the display text.
    pub fn month_day(&self) -> Option<(u32, u32)> {
        let caps = DATE_TOKEN.captures(&self.0)?;
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        Some((month, day))
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub date: DateToken,
    pub value: u64,
}

impl Entry {
    pub fn new(date: DateToken, value: u64) -> Self {
        Self { date, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label() {
        assert_eq!(DateToken::new("4月7号").month_label(), "4月");
        assert_eq!(DateToken::new("12月31号").month_label(), "12月");
        assert_eq!(DateToken::new("04月07号").month_label(), "04月");
        assert_eq!(DateToken::new("garbage").month_label(), "");
    }

    #[test]
    fn test_month_day() {
        assert_eq!(DateToken::new("4月7号").month_day(), Some((4, 7)));
        assert_eq!(DateToken::new("10月01号").month_day(), Some((10, 1)));
        assert_eq!(DateToken::new("4月号").month_day(), None);
        // Too many digits to be a day at all
        assert_eq!(DateToken::new("4月99999999999号").month_day(), None);
    }
}
