//! Interactive walk-through.
//!
//! Starts on the intro screen. Slash commands move between screens, toggle
//! layers and export or share them; any other input is applied as a custom
//! prompt and the layer breakdown is shown.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;

use crate::events::StateChange;
use crate::session::{Screen, SessionSnapshot};

use super::bootstrap::CliContext;
use super::output::{render_change, render_demo, render_layer_list, OutputMode};
use super::runner::{execute_once, export_one, share_one, show_layers};

const HELP: &str = "\
Commands:
  /start        Leave the intro and open the chat demo
  /reveal       Show the layers behind the answer
  /back         Return to the chat demo
  /layers       List layers and whether they are shown
  /toggle N     Show or hide layer N (1-10)
  /reset        Show every layer again
  /example      Go back to the curated example prompt
  /compare      Turn compare mode on or off
  /export N     Write layer N to a JSON file
  /share N      Print share links for layer N
  /help         Show this help
  /quit         Exit
Anything else is run as a custom prompt.";

/// REPL command variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Exit the REPL
    Quit,
    Help,
    Start,
    Reveal,
    Back,
    Layers,
    Toggle(u8),
    Reset,
    Example,
    Compare,
    Export(u8),
    Share(u8),
    /// Unknown or malformed command (will show help)
    Unknown(String),
    /// Custom prompt to run through the layers
    Prompt(String),
    /// Empty input (skip)
    Empty,
}

impl ReplCommand {
    /// Parse user input into a REPL command.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }

        if !trimmed.starts_with('/') {
            return ReplCommand::Prompt(trimmed.to_string());
        }

        let mut parts = trimmed.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();
        let extra = parts.next();

        let layer_arg = || match (arg.map(str::parse::<u8>), extra) {
            (Some(Ok(n)), None) => Some(n),
            _ => None,
        };

        let command = match (name.as_str(), arg) {
            ("/quit" | "/exit" | "/q", None) => Some(ReplCommand::Quit),
            ("/help" | "/?", None) => Some(ReplCommand::Help),
            ("/start", None) => Some(ReplCommand::Start),
            ("/reveal", None) => Some(ReplCommand::Reveal),
            ("/back", None) => Some(ReplCommand::Back),
            ("/layers", None) => Some(ReplCommand::Layers),
            ("/reset", None) => Some(ReplCommand::Reset),
            ("/example", None) => Some(ReplCommand::Example),
            ("/compare", None) => Some(ReplCommand::Compare),
            ("/toggle", Some(_)) => layer_arg().map(ReplCommand::Toggle),
            ("/export", Some(_)) => layer_arg().map(ReplCommand::Export),
            ("/share", Some(_)) => layer_arg().map(ReplCommand::Share),
            _ => None,
        };

        command.unwrap_or_else(|| ReplCommand::Unknown(trimmed.to_string()))
    }
}

/// Run an interactive REPL session.
///
/// Returns when the user exits or on EOF (Ctrl+D).
pub async fn run_repl(ctx: &mut CliContext) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    // Collect store changes so each command can report what it did
    let changes: Arc<Mutex<Vec<StateChange>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    let subscription = ctx
        .store
        .subscribe(move |change: &StateChange, _: &SessionSnapshot| {
            sink.lock().push(change.clone())
        });

    if atty::is(atty::Stream::Stdin) {
        eprintln!("{}", ctx.settings.presentation.title);
        eprintln!("Type /start to begin, /help for commands, /quit to exit\n");
    }

    loop {
        print!("{}> ", ctx.store.screen());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // EOF (Ctrl+D)
            eprintln!("\nGoodbye!");
            break;
        }

        let command = ReplCommand::parse(&input);
        if command == ReplCommand::Quit {
            eprintln!("Goodbye!");
            break;
        }

        if let Err(e) = handle_command(ctx, command).await {
            eprintln!("Error: {}", e);
        }

        report_changes(ctx.output_mode(), &changes)?;
    }

    ctx.store.unsubscribe(subscription);
    Ok(())
}

async fn handle_command(ctx: &mut CliContext, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Empty | ReplCommand::Quit => {}
        ReplCommand::Help => eprintln!("{}", HELP),
        ReplCommand::Unknown(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Type /help for the list of commands");
        }
        ReplCommand::Start | ReplCommand::Back => {
            ctx.store.navigate(Screen::Demo)?;
            println!("{}", render_demo(&ctx.store));
        }
        ReplCommand::Reveal => {
            ctx.store.navigate(Screen::Layers)?;
            show_layers(ctx).await?;
        }
        ReplCommand::Layers => println!("{}", render_layer_list(ctx.store.enabled_layers())),
        ReplCommand::Toggle(n) => {
            ctx.store.toggle_layer_number(n)?;
        }
        ReplCommand::Reset => ctx.store.reset_layers(),
        ReplCommand::Example => ctx.store.reset(),
        ReplCommand::Compare => {
            let enabled = !ctx.store.compare_mode();
            ctx.store.set_compare_mode(enabled);
        }
        ReplCommand::Export(n) => {
            let path = export_one(ctx, n).await?;
            println!("Exported to {}", path.display());
        }
        ReplCommand::Share(n) => {
            let links = share_one(ctx, n)?;
            if ctx.output_mode() == OutputMode::Json {
                println!("{}", serde_json::to_string(&links)?);
            } else {
                println!("Link:     {}", links.direct);
                println!("LinkedIn: {}", links.linkedin);
                println!("Twitter:  {}", links.twitter);
                println!("Facebook: {}", links.facebook);
            }
        }
        ReplCommand::Prompt(prompt) => {
            execute_once(ctx, &prompt).await?;
            println!();
        }
    }
    Ok(())
}

/// Print and clear the changes recorded since the last command.
fn report_changes(mode: OutputMode, changes: &Mutex<Vec<StateChange>>) -> Result<()> {
    let drained: Vec<StateChange> = std::mem::take(&mut *changes.lock());
    for change in &drained {
        match mode {
            OutputMode::Json => println!("{}", serde_json::to_string(change)?),
            OutputMode::Terminal => eprintln!("{}", render_change(change)),
            OutputMode::Quiet => {}
        }
    }
    Ok(())
}
