pub mod dataset;
pub mod entry;
pub mod holiday;
pub mod settings;
