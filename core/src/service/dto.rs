use serde::Serialize;
use std::fmt;

use crate::model::dataset::MonthlyTotals;
use crate::service::classifier::DayKind;

pub const BAR_DATASET_LABEL: &str = "每日金额";
pub const MEAN_DATASET_LABEL: &str = "平均值";

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    pub fill: Rgba,
    pub border: Rgba,
}

pub const NON_WORKING_COLORS: ColorPair = ColorPair {
    fill: Rgba::new(255, 99, 132, 0.5),
    border: Rgba::new(255, 99, 132, 1.0),
};

pub const REGULAR_COLORS: ColorPair = ColorPair {
    fill: Rgba::new(54, 162, 235, 0.5),
    border: Rgba::new(54, 162, 235, 1.0),
};

pub const MEAN_LINE_COLOR: Rgba = Rgba::new(255, 11, 11, 1.0);

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayBar {
    pub label: String,
    pub month: String,
    pub value: u64,
    pub kind: DayKind,
    pub non_working: bool,
    pub colors: ColorPair,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChartData {
    pub bars: Vec<DayBar>,
    pub mean: Option<f64>,
    pub mean_series: Vec<f64>,
    pub monthly_totals: MonthlyTotals,
    pub total_amount: u64,
}

impl ChartData {
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

/// Bars of one month label, in the order they were entered.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthWindow {
    pub month: String,
    pub bars: Vec<DayBar>,
    pub total: u64,
}
