use chrono::Weekday;
use dailytally_core::{ChartData, Classifier, DateToken, DayKind, ParsedDataset};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "月份")]
    month: String,
    #[tabled(rename = "金额")]
    total: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "日期")]
    date: String,
    #[tabled(rename = "星期")]
    weekday: String,
    #[tabled(rename = "金额")]
    value: String,
    #[tabled(rename = "类型")]
    kind: String,
}

#[derive(Tabled)]
struct HolidayRow {
    #[tabled(rename = "月份")]
    month: String,
    #[tabled(rename = "固定节日")]
    fixed: String,
    #[tabled(rename = "农历节日")]
    lunar: String,
}

/// Groups digits by thousands: `10680` -> `10,680`.
pub fn format_amount(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn weekday_zh(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "周一",
        Weekday::Tue => "周二",
        Weekday::Wed => "周三",
        Weekday::Thu => "周四",
        Weekday::Fri => "周五",
        Weekday::Sat => "周六",
        Weekday::Sun => "周日",
    }
}

fn kind_label(kind: DayKind) -> &'static str {
    match kind {
        DayKind::Weekend => "周末",
        DayKind::FixedHoliday => "节假日",
        DayKind::LunarHoliday => "农历节日",
        DayKind::Regular => "工作日",
    }
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table
}

pub fn show_summary(dataset: &ParsedDataset) {
    if dataset.is_empty() {
        println!("No dated entries found.");
        return;
    }

    println!("\x1b[1;36m月度总计\x1b[0m");
    println!("{}", styled(Table::new(month_rows(dataset))));
    println!("\x1b[1m{}\x1b[0m", total_line(dataset));
}

fn month_rows(dataset: &ParsedDataset) -> Vec<MonthRow> {
    dataset
        .monthly_totals
        .iter()
        .map(|(month, total)| MonthRow {
            month: month.to_string(),
            total: format!("{} 元", format_amount(total)),
        })
        .collect()
}

fn total_line(dataset: &ParsedDataset) -> String {
    format!("总计: {} 元", format_amount(dataset.total_amount))
}

pub fn show_daily(chart: &ChartData, classifier: &Classifier) {
    if chart.bars.is_empty() {
        println!("No dated entries found.");
        return;
    }

    let rows: Vec<DayRow> = chart
        .bars
        .iter()
        .map(|bar| DayRow {
            date: bar.label.clone(),
            weekday: classifier
                .weekday(&DateToken::new(bar.label.as_str()))
                .map(weekday_zh)
                .unwrap_or("-")
                .to_string(),
            value: format_amount(bar.value),
            kind: kind_label(bar.kind).to_string(),
        })
        .collect();

    let mut table = styled(Table::new(rows));
    for (i, bar) in chart.bars.iter().enumerate() {
        if bar.non_working {
            // +1 skips the header row
            table.with(Modify::new(Rows::one(i + 1)).with(Color::FG_RED));
        }
    }
    println!("{}", table);

    if let Some(mean) = chart.mean {
        println!("平均值: {:.2}", mean);
    }
}

pub fn show_classification(dates: &[DateToken], classifier: &Classifier) {
    let rows: Vec<DayRow> = dates
        .iter()
        .map(|date| {
            let known = date.month_day().is_some();
            DayRow {
                date: date.to_string(),
                weekday: classifier
                    .weekday(date)
                    .map(weekday_zh)
                    .unwrap_or("-")
                    .to_string(),
                value: "-".to_string(),
                kind: if known {
                    kind_label(classifier.classify(date)).to_string()
                } else {
                    "无法识别".to_string()
                },
            }
        })
        .collect();

    println!(
        "Reference year {}, weekend {}",
        classifier.year(),
        classifier.policy()
    );
    println!("{}", styled(Table::new(rows)));
}

pub fn show_holidays(classifier: &Classifier) {
    let holidays = classifier.holidays();
    let mut months: Vec<u32> = holidays.fixed.keys().chain(holidays.lunar.keys()).copied().collect();
    months.sort_unstable();
    months.dedup();

    if months.is_empty() {
        println!("No holidays configured for {}.", classifier.year());
        return;
    }

    let join_days = |days: Option<&std::collections::BTreeSet<u32>>| -> String {
        match days {
            Some(days) if !days.is_empty() => days
                .iter()
                .map(|d| format!("{}号", d))
                .collect::<Vec<_>>()
                .join(", "),
            _ => "-".to_string(),
        }
    };

    let rows: Vec<HolidayRow> = months
        .iter()
        .map(|m| HolidayRow {
            month: format!("{}月", m),
            fixed: join_days(holidays.fixed.get(m)),
            lunar: join_days(holidays.lunar.get(m)),
        })
        .collect();

    println!("Holidays for {}", classifier.year());
    println!("{}", styled(Table::new(rows)));
}
