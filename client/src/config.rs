//! Configuration management for the Stock Withdrawal Management client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with SWM_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::DisplayOptions;

/// Default base URL of the remote stock API
pub const DEFAULT_API_BASE_URL: &str = "https://server-weht.onrender.com";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Remote API configuration
    pub api: ApiConfig,

    /// PDF and print export configuration
    pub export: ExportConfig,

    /// Date and money display
    pub display: DisplayConfig,

    /// Transient notifications
    pub notification: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL, without trailing slash
    pub base_url: String,

    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Unicode TTF font embedded in PDFs (must cover Thai)
    pub font_path: PathBuf,

    /// Tried in order when `font_path` cannot be read
    #[serde(default = "default_font_fallbacks")]
    pub font_fallbacks: Vec<PathBuf>,

    /// Optional bold face; the regular face is used when absent
    pub bold_font_path: Option<PathBuf>,

    /// Directory PDFs are written to
    pub output_dir: PathBuf,

    /// Open the print document in the browser after writing it
    pub open_print_document: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Offset from UTC used to show dates
    pub utc_offset_hours: i32,

    pub currency_symbol: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Lifetime of a notification in milliseconds
    pub dismiss_after_ms: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("SWM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.connect_timeout_secs", 30)?
            .set_default("export.font_path", "assets/fonts/NotoSansThai-Regular.ttf")?
            .set_default("export.output_dir", ".")?
            .set_default("export.open_print_document", true)?
            .set_default("display.utc_offset_hours", 7)?
            .set_default("display.currency_symbol", "$")?
            .set_default("notification.dismiss_after_ms", 3000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SWM_ prefix)
            .add_source(
                Environment::with_prefix("SWM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api: ApiConfig::default(),
            export: ExportConfig::default(),
            display: DisplayConfig::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout_secs: 30,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("assets/fonts/NotoSansThai-Regular.ttf"),
            font_fallbacks: default_font_fallbacks(),
            bold_font_path: None,
            output_dir: PathBuf::from("."),
            open_print_document: true,
        }
    }
}

/// Thai-capable TTF fonts commonly installed by the operating system
pub const SYSTEM_THAI_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSansThai-Regular.ttf",
    "/usr/share/fonts/truetype/tlwg/Garuda.ttf",
    "/usr/share/fonts/truetype/tlwg/Loma.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\tahoma.ttf",
    "C:\\Windows\\Fonts\\LeelawUI.ttf",
];

fn default_font_fallbacks() -> Vec<PathBuf> {
    SYSTEM_THAI_FONTS.iter().map(PathBuf::from).collect()
}

impl DisplayConfig {
    pub fn options(&self) -> DisplayOptions {
        DisplayOptions {
            utc_offset: shared::utc_offset(self.utc_offset_hours),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 7,
            currency_symbol: "$".to_string(),
        }
    }
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
        }
    }
}
