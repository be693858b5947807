//! Climate API Core Library
//!
//! Shared utilities for the climate API service:
//! - Configuration loading (XDG-compliant)
//! - Dataset path resolution
//! - Common constants

mod config;
pub mod fs;

pub use config::{
    find_config_file, find_dataset, get_xdg_data_dir, load_config, ConfigSource,
};
pub use fs::{file_extension, is_file, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATASET: &str = "./Resources/hawaii.sqlite";

/// Length of the trailing temperature window served by `/tobs`
pub const DEFAULT_TOBS_WINDOW_DAYS: u32 = 365;
