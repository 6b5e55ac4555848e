pub mod classifier;
pub mod dto;
