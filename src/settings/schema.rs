//! Settings schema definitions for layerlens configuration.
//!
//! All settings structs use `#[serde(default)]` to allow partial configuration files.
//! Missing fields are filled with sensible defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_URL: &str = "https://illusion-of-reasoning.netlify.app/";
pub const DEFAULT_ARTICLE_URL: &str = "https://www.linkedin.com/pulse/why-how-current-llm-systems-create-illusion-reasoning-rodrigo-bphwe";
pub const DEFAULT_TITLE: &str = "How LLM Systems Create the Illusion of Reasoning";

/// Root settings structure.
///
/// Loaded from `~/.layerlens/settings.toml` with environment variable interpolation support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerlensSettings {
    /// Schema version for migrations
    pub version: u32,

    /// Links and titles used by export and share
    pub presentation: PresentationSettings,

    /// Layer export destination
    pub export: ExportSettings,

    /// Analytics opt-out
    pub privacy: PrivacySettings,

    /// Advanced/debug settings
    pub advanced: AdvancedSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Public URL of the presentation; share links append `#layer-N`
    pub site_url: String,

    /// Article the presentation accompanies
    pub article_url: String,

    /// Title used in social share links
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory exported layer files are written to (supports $ENV_VAR syntax)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    /// Emit analytics events to the log
    pub analytics: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// Log level: "error" | "warn" | "info" | "debug" | "trace"
    pub log_level: String,
}

// =============================================================================
// Default implementations
// =============================================================================

impl Default for LayerlensSettings {
    fn default() -> Self {
        Self {
            version: 1,
            presentation: PresentationSettings::default(),
            export: ExportSettings::default(),
            privacy: PrivacySettings::default(),
            advanced: AdvancedSettings::default(),
        }
    }
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            article_url: DEFAULT_ARTICLE_URL.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self { analytics: true }
    }
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
