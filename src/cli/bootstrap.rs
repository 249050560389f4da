//! CLI bootstrap - load settings, start logging and open a session.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;

use crate::analytics::AnalyticsObserver;
use crate::layers::LayerId;
use crate::session::SessionStore;
use crate::settings::{LayerlensSettings, SettingsManager};

use super::args::Args;
use super::output::OutputMode;

/// Everything a CLI run needs: the session, settings and arguments.
pub struct CliContext {
    /// Presentation state for this run
    pub store: SessionStore,

    /// Settings manager
    pub settings_manager: SettingsManager,

    /// Settings snapshot taken at startup
    pub settings: LayerlensSettings,

    /// Command-line arguments
    pub args: Args,
}

impl CliContext {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_args(&self.args)
    }

    /// Directory for layer exports: `--export`, then settings/env, then `.`.
    pub async fn export_dir(&self) -> PathBuf {
        match &self.args.export {
            Some(dir) => dir.clone(),
            None => self.settings_manager.export_dir().await,
        }
    }

    /// End the session.
    pub async fn shutdown(self) -> Result<()> {
        self.store.end();
        Ok(())
    }
}

/// Initialize the CLI context.
pub async fn initialize(args: &Args) -> Result<CliContext> {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        // Only warn on errors other than file not found
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("[cli] Failed to load .env file: {}", e);
        }
    }

    let settings_manager = match &args.settings {
        Some(path) => SettingsManager::with_path(path).await,
        None => SettingsManager::new().await,
    }
    .context("Failed to initialize settings manager")?;

    let settings = settings_manager.get().await;

    // Logging comes after settings so the configured level applies
    let log_level = if args.verbose {
        "debug"
    } else {
        settings.advanced.log_level.as_str()
    };
    init_logging(log_level)?;

    // Ensure settings file exists (creates template on first run)
    if let Err(e) = settings_manager.ensure_settings_file().await {
        tracing::warn!("Failed to create settings template: {}", e);
    }

    if args.verbose {
        eprintln!(
            "[cli] Settings loaded from {}",
            settings_manager.path().display()
        );
    }

    let mut store = SessionStore::new();
    if settings.privacy.analytics {
        store.subscribe(AnalyticsObserver);
    }
    apply_disabled_layers(&mut store, &args.disable)?;
    if args.compare {
        store.set_compare_mode(true);
    }

    if args.verbose {
        eprintln!("[cli] Session {}", store.session_id());
    }

    Ok(CliContext {
        store,
        settings_manager,
        settings,
        args: args.clone(),
    })
}

fn init_logging(level: &str) -> Result<()> {
    let directive: Directive = format!("layerlens={}", level)
        .parse()
        .with_context(|| format!("Invalid log level: {}", level))?;

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .try_init();
    Ok(())
}

/// Hide each listed layer once, however often it is repeated.
fn apply_disabled_layers(store: &mut SessionStore, numbers: &[u8]) -> Result<()> {
    for &number in numbers {
        let layer = LayerId::new(number)?;
        if store.enabled_layers().is_enabled(layer) {
            store.toggle_layer(layer);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_disabled_layers_is_idempotent() {
        let mut store = SessionStore::new();
        apply_disabled_layers(&mut store, &[3, 7, 3]).unwrap();

        let hidden: Vec<u8> = store
            .enabled_layers()
            .iter()
            .filter(|(_, on)| !on)
            .map(|(l, _)| l.number())
            .collect();
        assert_eq!(hidden, vec![3, 7]);
    }

    #[test]
    fn test_apply_disabled_layers_rejects_unknown() {
        let mut store = SessionStore::new();
        assert!(apply_disabled_layers(&mut store, &[12]).is_err());
        assert!(store.enabled_layers().all_enabled());
    }

    #[tokio::test]
    async fn test_initialize_with_explicit_settings_file() {
        use clap::Parser;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let args = Args::parse_from([
            "layerlens",
            "--settings",
            path.to_str().unwrap(),
            "--disable",
            "2",
            "--compare",
        ]);

        let ctx = initialize(&args).await.unwrap();
        assert!(path.exists());
        assert!(!ctx.store.enabled_layers().is_enabled(LayerId::Tokenization));
        assert!(ctx.store.compare_mode());
        assert_eq!(ctx.store.observer_count(), 1);
        ctx.shutdown().await.unwrap();
    }
}
