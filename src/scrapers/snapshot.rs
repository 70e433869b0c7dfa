use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, ScoutError};
use crate::scrapers::traits::PageSession;
use crate::scrapers::types::Locator;

/// Page session over a saved HTML document.
///
/// Nothing is rendered, so "visible" means present and not hidden through the
/// `hidden` attribute or an inline `display: none` / `visibility: hidden`
/// style on the element or one of its ancestors. Only CSS locators work.
pub struct SnapshotPage {
    document: Html,
}

impl SnapshotPage {
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Reading page snapshot from {}", path.display());
        let html = std::fs::read_to_string(path)?;
        Ok(Self::from_html(&html))
    }
}

impl PageSession for SnapshotPage {
    fn navigate(&self, url: &str) -> Result<()> {
        debug!("Snapshot page ignores navigation to {}", url);
        Ok(())
    }

    fn visible_text(&self, locator: &Locator) -> Result<Option<String>> {
        let selector = match locator {
            Locator::Css(css) => Selector::parse(css).map_err(|e| {
                ScoutError::Session(format!("Invalid CSS selector '{}': {:?}", css, e))
            })?,
            Locator::Xpath(_) => return Err(ScoutError::UnsupportedLocator(locator.clone())),
        };

        let text = self
            .document
            .select(&selector)
            .next()
            .filter(|element| !is_hidden(element))
            .map(|element| {
                element
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            });

        Ok(text)
    }

    fn session_name(&self) -> &'static str {
        "snapshot"
    }
}

fn is_hidden(element: &ElementRef) -> bool {
    std::iter::once(*element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .any(|el| {
            let node = el.value();
            if node.attr("hidden").is_some() {
                return true;
            }
            node.attr("style")
                .map(|style| {
                    let style: String = style.chars().filter(|c| !c.is_whitespace()).collect();
                    let style = style.to_ascii_lowercase();
                    style.contains("display:none") || style.contains("visibility:hidden")
                })
                .unwrap_or(false)
        })
}
