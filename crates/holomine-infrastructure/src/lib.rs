pub mod config_service;
pub mod dataset;
pub mod paths;
pub mod sample_data;

pub use crate::config_service::{ConfigError, ConfigOverrides, ConfigService};
pub use crate::dataset::{DatasetError, load_dataset};
pub use crate::paths::HolominePaths;
pub use crate::sample_data::{SAMPLE_FILE_NAME, export_sample_dataset, sample_dataset_input};
