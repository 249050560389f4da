//! Terminal front end for the layer walk-through.
//!
//! Mirrors the presentation's screens on a terminal: an intro, a chat demo
//! that shows the polished answer, and the layer-by-layer breakdown of how
//! that answer was produced.
//!
//! ```text
//! +-----------+     +--------------+     +---------------+
//! | args.rs   | --> | SessionStore | --> | output.rs     |
//! | repl.rs   |     | (simulator)  |     | (print/JSON)  |
//! +-----------+     +--------------+     +---------------+
//! ```
//!
//! # REPL Mode
//!
//! When no prompt is provided via `-e` or `-f`, the CLI enters
//! interactive REPL mode. See `repl.rs` for details.

mod args;
mod bootstrap;
mod output;
mod repl;
mod runner;

pub use args::Args;
pub use bootstrap::{initialize, CliContext};
pub use output::{json_report, render_layers, OutputMode};
pub use repl::{run_repl, ReplCommand};
pub use runner::{execute_batch, execute_once};
