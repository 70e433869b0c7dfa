use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::scrapers::types::{Locator, Role};

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Failed to launch browser: {0}")]
    BrowserLaunch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Element '{role}' ({locator}) not visible after {waited:?}")]
    ElementTimeout {
        role: Role,
        locator: Locator,
        waited: Duration,
    },

    #[error("Browser session error: {0}")]
    Session(String),

    #[error("Locator {0} is not supported by this page session")]
    UnsupportedLocator(Locator),

    #[error("Failed to load table from {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    #[error("Failed to write table to {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("Unsupported output format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
