pub mod file;
pub mod traits;

// Re-export
pub use file::FileSettingsRepository;
pub use traits::SettingsRepository;
