use tracing::info;

use crate::error::Result;
use crate::format::{format_price, timestamp, Clock};
use crate::models::ProductRecord;
use crate::scrapers::extractor::FieldExtractor;
use crate::scrapers::traits::PageSession;
use crate::scrapers::types::SelectorMap;
use crate::scrapers::wait::PollWait;

/// Scrapes one product page into a `ProductRecord`
pub struct ProductScraper<'a> {
    session: &'a dyn PageSession,
    selectors: &'a SelectorMap,
    wait: PollWait,
    clock: &'a dyn Clock,
}

impl<'a> ProductScraper<'a> {
    pub fn new(
        session: &'a dyn PageSession,
        selectors: &'a SelectorMap,
        wait: PollWait,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            session,
            selectors,
            wait,
            clock,
        }
    }

    /// Navigate to `url` and read description, price and availability.
    /// Description and price are required; the buy button is optional.
    pub fn scrape(&self, url: &str) -> Result<ProductRecord> {
        info!("Scraping {} via {} session", url, self.session.session_name());
        self.session.navigate(url)?;

        let extractor = FieldExtractor::new(self.session, self.selectors, self.wait);
        let description = extractor.description()?;
        let raw_price = extractor.price()?;
        let availability = extractor.availability()?;

        let record = ProductRecord {
            description,
            price: format_price(&raw_price),
            captured_at: timestamp(self.clock),
            availability,
            url: url.to_string(),
        };

        info!(
            "{} | {} -> {} | available: {}",
            record.description, raw_price, record.price, record.availability
        );
        Ok(record)
    }
}
