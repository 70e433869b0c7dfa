use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::scrapers::types::SelectorMap;
use crate::scrapers::wait::PollWait;
use crate::storage::TableFormat;

pub const DEFAULT_PRODUCT_URL: &str =
    "https://www.gsuplementos.com.br/creatina-monohidratada-250gr-growth-supplements-p985931";
pub const DEFAULT_OUTPUT_FILE: &str = "dados.xlsx";
pub const DEFAULT_CONFIG_FILE: &str = "scout";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub product_url: String,
    /// Relative paths are resolved against the working directory
    pub output_path: PathBuf,
    /// Read the page from this HTML file instead of launching Chrome
    pub snapshot_html: Option<PathBuf>,
    pub browser: BrowserConfig,
    pub wait: WaitConfig,
    pub selectors: SelectorMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    pub lang: String,
    pub window_width: u32,
    pub window_height: u32,
    pub incognito: bool,
    pub disable_notifications: bool,
    pub disable_gpu: bool,
    pub sandbox: bool,
    pub chrome_path: Option<PathBuf>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            product_url: DEFAULT_PRODUCT_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            snapshot_html: None,
            browser: BrowserConfig::default(),
            wait: WaitConfig::default(),
            selectors: SelectorMap::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            lang: "pt-BR".to_string(),
            window_width: 1360,
            window_height: 750,
            incognito: true,
            disable_notifications: true,
            disable_gpu: true,
            sandbox: true,
            chrome_path: None,
            user_agent: None,
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            poll_interval_ms: 1_000,
        }
    }
}

impl WaitConfig {
    pub fn poll_wait(&self) -> PollWait {
        PollWait::new(
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.poll_interval_ms),
        )
    }
}

impl ScoutConfig {
    /// Defaults, then `scout.toml` (or the file named by `SCOUT_CONFIG`),
    /// then `SCOUT__*` environment variables.
    pub fn load() -> crate::error::Result<Self> {
        let file = env::var("SCOUT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());

        let s = Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("SCOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: ScoutConfig = s.try_deserialize()?;

        if config.browser.chrome_path.is_none() {
            config.browser.chrome_path = env::var_os("CHROME_PATH").map(PathBuf::from);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.product_url)
            .map_err(|e| ConfigError::Message(format!("Invalid product_url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https" | "file") {
            return Err(ConfigError::Message(format!(
                "Unsupported product_url scheme: {}",
                url.scheme()
            )));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Message("output_path must not be empty".into()));
        }

        // Checked here so a bad extension fails before Chrome is launched
        TableFormat::from_path(&self.output_path)
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        if self.wait.timeout_ms == 0 {
            return Err(ConfigError::Message("wait.timeout_ms must be greater than 0".into()));
        }

        if self.wait.poll_interval_ms == 0 || self.wait.poll_interval_ms > self.wait.timeout_ms {
            return Err(ConfigError::Message(
                "wait.poll_interval_ms must be between 1 and wait.timeout_ms".into(),
            ));
        }

        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(ConfigError::Message("Browser window size must be non-zero".into()));
        }

        if self.browser.lang.trim().is_empty() {
            return Err(ConfigError::Message("browser.lang must not be empty".into()));
        }

        Ok(())
    }

    /// Output path made absolute against `cwd`
    pub fn resolve_output_path(&self, cwd: &Path) -> PathBuf {
        if self.output_path.is_absolute() {
            self.output_path.clone()
        } else {
            cwd.join(&self.output_path)
        }
    }
}
