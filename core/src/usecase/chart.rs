use crate::model::dataset::ParsedDataset;
use crate::service::classifier::Classifier;
use crate::service::dto::{ChartData, DayBar, MonthWindow, NON_WORKING_COLORS, REGULAR_COLORS};
use tracing::debug;

pub struct ChartUseCase<'a> {
    classifier: &'a Classifier,
}

impl<'a> ChartUseCase<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        Self { classifier }
    }

    pub fn build(&self, dataset: &ParsedDataset) -> ChartData {
        let bars: Vec<DayBar> = dataset
            .entries
            .iter()
            .map(|entry| {
                let kind = self.classifier.classify(&entry.date);
                let non_working = kind.is_non_working();
                DayBar {
                    label: entry.date.to_string(),
                    month: entry.date.month_label().to_string(),
                    value: entry.value,
                    kind,
                    non_working,
                    colors: if non_working { NON_WORKING_COLORS } else { REGULAR_COLORS },
                }
            })
            .collect();

        let mean = dataset.mean();
        let mean_series = match mean {
            Some(m) => vec![m; bars.len()],
            None => Vec::new(),
        };

        debug!(
            bars = bars.len(),
            non_working = bars.iter().filter(|b| b.non_working).count(),
            "built chart data"
        );

        ChartData {
            bars,
            mean,
            mean_series,
            monthly_totals: dataset.monthly_totals.clone(),
            total_amount: dataset.total_amount,
        }
    }

    pub fn month_windows(&self, chart: &ChartData) -> Vec<MonthWindow> {
        let mut windows: Vec<MonthWindow> = Vec::new();

        for bar in &chart.bars {
            match windows.iter_mut().find(|w| w.month == bar.month) {
                Some(window) => {
                    window.total = window.total.saturating_add(bar.value);
                    window.bars.push(bar.clone());
                }
                None => windows.push(MonthWindow {
                    month: bar.month.clone(),
                    bars: vec![bar.clone()],
                    total: bar.value,
                }),
            }
        }

        windows
    }
}
