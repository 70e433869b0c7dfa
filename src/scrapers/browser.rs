use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::Deserialize;
use serde_json::json;
use std::ffi::{OsStr, OsString};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::BrowserConfig;
use crate::error::{Result, ScoutError};
use crate::scrapers::traits::PageSession;
use crate::scrapers::types::Locator;

/// Page session backed by headless Chrome
pub struct ChromeSession {
    // Dropping the browser kills the Chrome process, so it lives as long as the tab
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launch Chrome with the configured window, locale and privacy flags
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let args = launch_args(config);
        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .window_size(Some((config.window_width, config.window_height)))
            .path(config.chrome_path.clone())
            .args(args.iter().map(OsString::as_os_str).collect::<Vec<&OsStr>>())
            .build()
            .map_err(|e| ScoutError::BrowserLaunch(format!("invalid launch options: {}", e)))?;

        let browser =
            Browser::new(options).map_err(|e| ScoutError::BrowserLaunch(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScoutError::BrowserLaunch(format!("failed to open tab: {}", e)))?;

        if let Some(user_agent) = &config.user_agent {
            tab.set_user_agent(user_agent, Some(config.lang.as_str()), None)
                .map_err(|e| ScoutError::Session(format!("failed to set user agent: {}", e)))?;
        }

        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl PageSession for ChromeSession {
    fn navigate(&self, url: &str) -> Result<()> {
        info!("Opening {}", url);

        let navigation_error = |e: anyhow::Error| ScoutError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };
        self.tab.navigate_to(url).map_err(navigation_error)?;
        self.tab.wait_until_navigated().map_err(navigation_error)?;

        Ok(())
    }

    fn visible_text(&self, locator: &Locator) -> Result<Option<String>> {
        let result = self
            .tab
            .evaluate(&probe_script(locator), false)
            .map_err(|e| ScoutError::Session(format!("probe for {} failed: {}", locator, e)))?;

        let text = parse_probe(result.value)?;
        debug!("{} -> {:?}", locator, text);
        Ok(text)
    }

    fn session_name(&self) -> &'static str {
        "chrome"
    }
}

/// Chrome command-line flags for the configured session
pub(crate) fn launch_args(config: &BrowserConfig) -> Vec<OsString> {
    let mut args = vec![OsString::from(format!("--lang={}", config.lang))];

    if config.incognito {
        args.push(OsString::from("--incognito"));
    }
    if config.disable_notifications {
        args.push(OsString::from("--disable-notifications"));
    }
    if config.disable_gpu {
        args.push(OsString::from("--disable-gpu"));
    }

    args
}

#[derive(Debug, Deserialize)]
struct ProbeOutcome {
    text: Option<String>,
    error: Option<String>,
}

/// Script that finds the element and returns its text only if it is rendered.
/// The result is a JSON string so it always comes back by value.
pub(crate) fn probe_script(locator: &Locator) -> String {
    let lookup = match locator {
        Locator::Css(_) => "document.querySelector(query)",
        Locator::Xpath(_) => {
            "document.evaluate(query, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
        }
    };

    format!(
        r#"
        (() => {{
            const query = {query};
            try {{
                const el = {lookup};
                if (!el || el.nodeType !== Node.ELEMENT_NODE) {{
                    return JSON.stringify({{ text: null }});
                }}
                const style = window.getComputedStyle(el);
                const rendered = el.offsetWidth > 0 || el.offsetHeight > 0 || el.getClientRects().length > 0;
                if (!rendered || style.visibility === 'hidden' || style.display === 'none') {{
                    return JSON.stringify({{ text: null }});
                }}
                return JSON.stringify({{ text: el.innerText }});
            }} catch (e) {{
                return JSON.stringify({{ error: e.message }});
            }}
        }})()
        "#,
        query = json!(locator.as_str()),
        lookup = lookup,
    )
}

fn parse_probe(value: Option<serde_json::Value>) -> Result<Option<String>> {
    let raw = match value {
        Some(serde_json::Value::String(raw)) => raw,
        other => {
            return Err(ScoutError::Session(format!(
                "unexpected probe result: {:?}",
                other
            )))
        }
    };

    let outcome: ProbeOutcome = serde_json::from_str(&raw)
        .map_err(|e| ScoutError::Session(format!("malformed probe result: {}", e)))?;

    if let Some(error) = outcome.error {
        return Err(ScoutError::Session(format!("probe script error: {}", error)));
    }

    Ok(outcome.text.map(|text| text.trim().to_string()))
}
