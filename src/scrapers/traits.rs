use crate::error::Result;
use crate::scrapers::types::Locator;

/// Common trait for everything the extractor can read a product page from.
/// Implemented by the headless Chrome session and by static HTML snapshots.
#[cfg_attr(test, mockall::automock)]
pub trait PageSession {
    /// Load the page and return once navigation has completed
    fn navigate(&self, url: &str) -> Result<()>;

    /// Text of the first element matching `locator`, or `None` while that
    /// element is missing or not visible yet.
    fn visible_text(&self, locator: &Locator) -> Result<Option<String>>;

    /// Name used in logs
    fn session_name(&self) -> &'static str;
}
