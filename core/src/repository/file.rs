use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::model::settings::Settings;
use crate::repository::traits::SettingsRepository;

const DEFAULT_FILE_NAME: &str = "settings.json";

#[derive(Clone)]
pub struct FileSettingsRepository {
    file_path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".dailytally")
            }
        };
        path.push(DEFAULT_FILE_NAME);

        Ok(FileSettingsRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SettingsRepository for FileSettingsRepository {
    /// Missing file means built-in defaults; nothing is written.
    fn load(&self) -> Result<Settings> {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Could not open {}", self.file_path.display()))
            }
        };
        let settings: Settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid settings in {}", self.file_path.display()))?;
        info!(
            path = %self.file_path.display(),
            year = settings.reference_year,
            "loaded settings"
        );
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::holiday::{HolidayCalendar, HolidayTable};
    use crate::time::WeekendPolicy;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSettingsRepository::new(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(repo.load().unwrap(), Settings::default());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSettingsRepository::new(Some(dir.path().join("nested"))).unwrap();

        let mut table = HolidayTable::default();
        table.add_fixed(1, [1]);
        table.add_lunar(1, [29]);
        let settings = Settings {
            reference_year: 2025,
            weekend_policy: WeekendPolicy::SaturdaySunday,
            calendar: HolidayCalendar::empty().with_year(2025, table),
        };

        repo.save(&settings).unwrap();
        assert_eq!(repo.load().unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_FILE_NAME), "{ not json").unwrap();
        let repo = FileSettingsRepository::new(Some(dir.path().to_path_buf())).unwrap();

        let err = repo.load().unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }
}
