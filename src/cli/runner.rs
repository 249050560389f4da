//! CLI execution runner.
//!
//! Applies prompts to the session and prints the resulting layer breakdown.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::compare::Comparison;
use crate::export::{self, ShareLinks};
use crate::layers::LayerId;
use crate::session::Screen;

use super::bootstrap::CliContext;
use super::output::{print_result, prompt_preview, OutputMode};

/// Apply one prompt as a custom prompt and show the layers.
pub async fn execute_once(ctx: &mut CliContext, prompt: &str) -> Result<()> {
    ctx.store.apply_custom_prompt(prompt);
    ctx.store.navigate_to(Screen::Layers)?;
    show_layers(ctx).await
}

/// Print the current layer data, then export it when `--export` was given.
pub async fn show_layers(ctx: &mut CliContext) -> Result<()> {
    let comparison = ctx
        .store
        .compare_mode()
        .then(|| Comparison::against_example(ctx.store.layer_data().final_response()));
    print_result(&ctx.store, ctx.output_mode(), comparison.as_ref())?;

    if let Some(dir) = ctx.args.export.clone() {
        let written = export_visible(ctx, &dir).await?;
        if ctx.output_mode() == OutputMode::Terminal {
            eprintln!("[export] Wrote {} file(s) to {}", written.len(), dir.display());
        }
    }
    Ok(())
}

/// Export every enabled layer of the current data into `dir`.
pub async fn export_visible(ctx: &CliContext, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for record in ctx.store.layer_data().visible(ctx.store.enabled_layers()) {
        let path = export::export_layer(record, &ctx.settings.presentation, dir)
            .await
            .with_context(|| format!("Failed to export {}", record.layer))?;
        written.push(path);
    }
    Ok(written)
}

/// Export a single layer into the configured export directory.
pub async fn export_one(ctx: &CliContext, number: u8) -> Result<PathBuf> {
    let layer = LayerId::new(number)?;
    let dir = ctx.export_dir().await;
    let record = ctx.store.layer_data().record(layer);
    let path = export::export_layer(record, &ctx.settings.presentation, &dir)
        .await
        .with_context(|| format!("Failed to export {}", layer))?;
    Ok(path)
}

/// Share links for a single layer.
pub fn share_one(ctx: &CliContext, number: u8) -> Result<ShareLinks> {
    let layer = LayerId::new(number)?;
    Ok(ShareLinks::for_layer(layer, &ctx.settings.presentation))
}

/// Execute prompts from a file, one per line.
///
/// Each non-empty, non-comment line is executed sequentially.
/// Lines starting with `#` are treated as comments.
/// Execution stops on the first error.
pub async fn execute_batch(ctx: &mut CliContext, file_path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(file_path)
        .await
        .with_context(|| format!("Failed to read prompt file: {}", file_path.display()))?;

    let prompts = parse_prompt_file(&content);
    if prompts.is_empty() {
        anyhow::bail!("No prompts found in file: {}", file_path.display());
    }

    let total = prompts.len();
    let chatty = ctx.output_mode() == OutputMode::Terminal;
    if chatty {
        eprintln!(
            "[batch] Running {} prompt(s) from {}",
            total,
            file_path.display()
        );
    }

    for (i, prompt) in prompts.iter().enumerate() {
        if chatty {
            eprintln!("\n[batch] [{}/{}] {}", i + 1, total, prompt_preview(prompt));
        }

        execute_once(ctx, prompt).await?;
    }

    if chatty {
        eprintln!("\n[batch] All {} prompt(s) completed", total);
    }

    Ok(())
}

fn parse_prompt_file(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}
