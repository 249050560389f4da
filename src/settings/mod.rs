//! TOML-based settings for layerlens.
//!
//! Settings are loaded from `~/.layerlens/settings.toml` with environment variable
//! interpolation support. Values that may also come from the environment go
//! through the `get_with_env_fallback` helper.
//!
//! # Usage
//!
//! ```rust,ignore
//! use layerlens_lib::settings::SettingsManager;
//!
//! let manager = SettingsManager::new().await?;
//! let settings = manager.get().await;
//! let export_dir = manager.export_dir().await;
//! ```

pub mod loader;
pub mod schema;

pub use loader::{get_with_env_fallback, settings_path, SettingsManager};
pub use schema::{
    AdvancedSettings, ExportSettings, LayerlensSettings, PresentationSettings, PrivacySettings,
};
