pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use error::InputError;
pub use input::{ensure_input, parse, BLANK_INPUT_NOTICE};
pub use model::dataset::{MonthlyTotals, ParsedDataset};
pub use model::entry::{DateToken, Entry};
pub use model::holiday::{HolidayCalendar, HolidayKind, HolidayTable};
pub use model::settings::Settings;
pub use repository::{FileSettingsRepository, SettingsRepository};
pub use service::classifier::{Classifier, DayKind};
pub use service::dto::{ChartData, DayBar, MonthWindow};
pub use time::WeekendPolicy;
pub use usecase::chart::ChartUseCase;
