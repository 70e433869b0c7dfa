pub mod browser;
pub mod extractor;
pub mod product;
pub mod snapshot;
pub mod traits;
pub mod types;
pub mod wait;

pub use browser::ChromeSession;
pub use extractor::FieldExtractor;
pub use product::ProductScraper;
pub use snapshot::SnapshotPage;
pub use traits::PageSession;
pub use types::{Locator, Role, SelectorMap};
pub use wait::PollWait;
