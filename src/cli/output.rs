//! CLI output handling.
//!
//! Renders the session's layer data according to the output mode: a
//! sectioned walk-through on a terminal, one JSON object per prompt, or just
//! the final response.

use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;

use crate::compare::Comparison;
use crate::events::StateChange;
use crate::layers::{EnabledLayers, Section};
use crate::session::SessionStore;
use crate::simulator::heuristics::preview;
use crate::simulator::{LayerRecord, Simulation};

use super::args::Args;

const INDENT: &str = "    ";

/// Characters of a prompt shown in one-line notices.
pub const PROMPT_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Terminal,
    Json,
    Quiet,
}

impl OutputMode {
    pub fn from_args(args: &Args) -> Self {
        if args.json {
            OutputMode::Json
        } else if args.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Terminal
        }
    }
}

/// Print the current layer data and final response.
pub fn print_result(
    store: &SessionStore,
    mode: OutputMode,
    comparison: Option<&Comparison>,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match mode {
        OutputMode::Json => {
            writeln!(stdout, "{}", serde_json::to_string(&json_report(store, comparison))?)?;
        }
        OutputMode::Quiet => {
            writeln!(stdout, "{}", store.layer_data().final_response())?;
        }
        OutputMode::Terminal => {
            let styled = atty::is(atty::Stream::Stdout);
            writeln!(stdout, "Prompt: {}", store.user_input())?;
            if store.show_custom_prompt() {
                writeln!(stdout, "{}", custom_prompt_banner(store.user_input()))?;
            }
            if !store.snapshot().uses_simulator() {
                writeln!(stdout, "(curated example)")?;
            }
            write!(
                stdout,
                "{}",
                render_layers(store.layer_data(), store.enabled_layers(), styled)?
            )?;
            writeln!(stdout, "\n== Final response ==\n{}", store.layer_data().final_response())?;
            if let Some(cmp) = comparison {
                writeln!(stdout, "\n{}", render_comparison(cmp))?;
            }
        }
    }
    stdout.flush()?;
    Ok(())
}

/// One JSON document describing the visible layers for the current prompt.
pub fn json_report(store: &SessionStore, comparison: Option<&Comparison>) -> serde_json::Value {
    let snapshot = store.snapshot();
    let layers: Vec<&LayerRecord> = store
        .layer_data()
        .visible(store.enabled_layers())
        .collect();

    let mut report = json!({
        "session_id": snapshot.session_id,
        "prompt": snapshot.user_input,
        "simulated": snapshot.uses_simulator(),
        "enabled_layers": snapshot.enabled_layers,
        "layers": layers,
        "final_response": store.layer_data().final_response(),
    });
    if let Some(cmp) = comparison {
        report["comparison"] = json!(cmp);
    }
    report
}

/// Sectioned walk-through of every layer. Hidden layers get a single line.
pub fn render_layers(sim: &Simulation, enabled: &EnabledLayers, styled: bool) -> Result<String> {
    let mut out = String::new();
    let mut section: Option<Section> = None;

    for record in sim.records() {
        let current = record.layer.section();
        if section != Some(current) {
            out.push_str(&format!("\n== {} ==\n", current.heading()));
            section = Some(current);
        }

        if enabled.is_enabled(record.layer) {
            out.push_str(&render_record(record)?);
        } else {
            out.push_str(&dim(&format!("[{}] {} (hidden)", record.layer.number(), record.title), styled));
            out.push('\n');
        }
    }

    Ok(out)
}

fn render_record(record: &LayerRecord) -> Result<String> {
    let mut out = format!(
        "\n[{}] {}\n{}{}\n",
        record.layer.number(),
        record.title,
        INDENT,
        record.caption
    );

    out.push_str(&format!("{}data:\n", INDENT));
    out.push_str(&indent(&serde_json::to_string_pretty(&record.data)?, 2));

    if let Some(snippet) = &record.snippet {
        out.push_str(&format!("{}code:\n", INDENT));
        out.push_str(&indent(snippet, 2));
    }

    out.push_str(&format!("{}> \"{}\"\n", INDENT, record.layer.quote()));
    Ok(out)
}

/// Layer numbers and titles with their visibility, for `/layers`.
pub fn render_layer_list(enabled: &EnabledLayers) -> String {
    enabled
        .iter()
        .map(|(layer, on)| {
            format!(
                "{} {:>2}. {}",
                if on { "[x]" } else { "[ ]" },
                layer.number(),
                layer.title()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_comparison(cmp: &Comparison) -> String {
    format!(
        "== Compared with the curated answer ({:.0}% shared) ==\n{}",
        cmp.similarity * 100.0,
        cmp.render()
    )
}

/// One-line notice for a store change.
pub fn render_change(change: &StateChange) -> String {
    match change {
        StateChange::LayerToggled { layer, enabled } => format!(
            "[layer] {} {}",
            layer,
            if *enabled { "shown" } else { "hidden" }
        ),
        StateChange::LayersReset => "[layer] All layers shown".to_string(),
        StateChange::UserInputChanged { text } => format!("[prompt] {}", text),
        StateChange::CustomPromptToggled { active } => format!(
            "[prompt] {}",
            if *active { "Custom prompt active" } else { "Custom prompt off" }
        ),
        StateChange::CompareModeToggled { enabled } => format!(
            "[compare] {}",
            if *enabled { "on" } else { "off" }
        ),
        StateChange::ScreenChanged { from, to } => format!("[screen] {} -> {}", from, to),
        StateChange::SessionReset => "[session] Back to the example prompt".to_string(),
    }
}

/// The chat demo: the prompt and the answer the system appears to reason out.
pub fn render_demo(store: &SessionStore) -> String {
    format!(
        "You: {}\n\nAssistant:\n{}\n\nType /reveal to see what actually happened.",
        store.user_input(),
        store.layer_data().final_response()
    )
}

/// Prompt cut to [`PROMPT_PREVIEW_CHARS`], with `...` only when something was cut.
pub fn prompt_preview(prompt: &str) -> String {
    let shown = preview(prompt, PROMPT_PREVIEW_CHARS);
    if shown.len() < prompt.len() {
        format!("{}...", shown)
    } else {
        shown.to_string()
    }
}

pub fn custom_prompt_banner(prompt: &str) -> String {
    format!("✓ Custom query active: \"{}\"", prompt_preview(prompt))
}

fn indent(text: &str, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    text.lines().map(|l| format!("{}{}\n", pad, l)).collect()
}

fn dim(text: &str, styled: bool) -> String {
    if styled {
        format!("\x1b[2m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}
