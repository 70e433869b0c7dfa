pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod scrapers;
pub mod storage;

use std::path::Path;
use tracing::info;

pub use crate::config::ScoutConfig;
pub use crate::error::{Result, ScoutError};
pub use crate::models::{Availability, ProductRecord};

use crate::format::Clock;
use crate::scrapers::{ChromeSession, PageSession, ProductScraper, SnapshotPage};

/// Session for the configured source: a saved HTML snapshot when one is
/// set, headless Chrome otherwise.
pub fn open_session(config: &ScoutConfig) -> Result<Box<dyn PageSession>> {
    match &config.snapshot_html {
        Some(path) => Ok(Box::new(SnapshotPage::from_file(path)?)),
        None => Ok(Box::new(ChromeSession::launch(&config.browser)?)),
    }
}

/// Scrape the configured product and append it to `output_path`.
/// Nothing is written unless the whole record was collected.
pub fn run(
    config: &ScoutConfig,
    session: &dyn PageSession,
    clock: &dyn Clock,
    output_path: &Path,
) -> Result<ProductRecord> {
    // Reject unknown output formats before scraping
    storage::TableFormat::from_path(output_path)?;

    let scraper = ProductScraper::new(session, &config.selectors, config.wait.poll_wait(), clock);
    let record = scraper.scrape(&config.product_url)?;

    let table = storage::append_record(output_path, &record)?;
    info!("{} now holds {} record(s)", output_path.display(), table.len());

    Ok(record)
}
