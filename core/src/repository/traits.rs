use crate::model::settings::Settings;
use anyhow::Result;

pub trait SettingsRepository {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}
