use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::InputError;
use crate::model::dataset::ParsedDataset;
use crate::model::entry::{DateToken, Entry};

/// Shown by hosts instead of parsing when the input is blank.
pub const BLANK_INPUT_NOTICE: &str = "请输入数据！";

// Date token, then any non-digit separator, then the value field.
static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+月[0-9]+号)[^0-9]*(.*)").expect("entry line pattern is valid")
});

/// Rejects input that holds nothing but whitespace.
pub fn ensure_input(raw: &str) -> Result<&str, InputError> {
    if raw.trim().is_empty() {
        Err(InputError::Blank)
    } else {
        Ok(raw)
    }
}

pub fn normalize_separators(raw: &str) -> String {
    raw.replace('：', ":")
}

/// Parses every line of `raw` and aggregates the matches.
///
/// Lines without a `<digits>月<digits>号` token are skipped. A value that does
/// not start with digits counts as 0 but the line is still kept.
pub fn parse(raw: &str) -> ParsedDataset {
    let normalized = normalize_separators(raw);
    let mut dataset = ParsedDataset::default();

    for (idx, line) in normalized.split('\n').enumerate() {
        match parse_line(line) {
            Some(entry) => {
                trace!(line = idx + 1, date = %entry.date, value = entry.value, "parsed entry");
                dataset.push(entry);
            }
            None => debug!(line = idx + 1, "skipping line without a date token"),
        }
    }

    debug!(
        entries = dataset.entries.len(),
        months = dataset.monthly_totals.len(),
        total = dataset.total_amount,
        "parsed dataset"
    );
    dataset
}

pub fn parse_line(line: &str) -> Option<Entry> {
    let caps = ENTRY_LINE.captures(line)?;
    let date = DateToken::new(&caps[1]);
    let value = parse_value(&caps[2]);
    Some(Entry::new(date, value))
}

/// Leading ASCII digits of the trimmed field; trailing decoration is ignored.
pub fn parse_value(field: &str) -> u64 {
    let field = field.trim();
    let digits = field.bytes().take_while(u8::is_ascii_digit).count();
    field[..digits].parse().unwrap_or(0)
}
