//! Site configuration.
//!
//! An optional `config.toml` in the working directory is layered over stock
//! defaults, deserialized into [`SiteConfig`] and validated before the feed
//! is opened. Every key is optional:
//!
//! ```toml
//! site_title = "Welcome to Photos!"   # index page <title> and heading
//! thumbnails_per_page = 10            # thumbnails shown on every page
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! muted = "#666666"                   # nav bar and back-links
//! link = "#333333"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! muted = "#999999"
//! link = "#cccccc"
//!
//! [http]
//! timeout_secs = 30                   # whole-request timeout for the feed
//! user_agent = "works-gallery/0.1.0"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Title and heading of the index page.
    pub site_title: String,
    /// Upper bound on thumbnails rendered per page.
    pub thumbnails_per_page: usize,
    pub colors: ColorConfig,
    pub http: HttpConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Welcome to Photos!".to_string(),
            thumbnails_per_page: 10,
            colors: ColorConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails_per_page == 0 {
            return Err(ConfigError::Validation(
                "thumbnails_per_page must be at least 1".into(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Feed retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("works-gallery/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Light and dark color schemes, switched by `prefers-color-scheme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::light(),
            dark: ColorScheme::dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Nav bar and back-link color.
    pub muted: String,
    pub link: String,
}

impl ColorScheme {
    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            muted: "#666666".to_string(),
            link: "#333333".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            muted: "#999999".to_string(),
            link: "#cccccc".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::light()
    }
}

// =============================================================================
// Loading and merging
// =============================================================================

/// Stock defaults as a TOML table, the base layer for user overrides.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                let merged = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from `dir` as a raw TOML value, `None` if absent.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the config found in `dir`, or the defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_some() {
        tracing::info!(dir = %dir.display(), "loaded config.toml");
    }
    resolve_config(overlay)
}

/// CSS custom properties for both color schemes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-muted: {light_muted};
    --color-link: {light_link};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-muted: {dark_muted};
        --color-link: {dark_link};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_muted = colors.light.muted,
        light_link = colors.light.link,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_muted = colors.dark.muted,
        dark_link = colors.dark.link,
    )
}
