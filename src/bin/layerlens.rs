//! layerlens - walk a prompt through the layers of an LLM system
//!
//! # Usage
//!
//! ```bash
//! # Interactive walk-through (intro, chat demo, layer breakdown)
//! layerlens
//!
//! # Run one prompt and print every layer
//! layerlens -e "Explain how vaccines work"
//!
//! # Hide layers 3 and 7, compare with the curated answer
//! layerlens -e "Plan a weekend in Lisbon" --disable 3 --disable 7 --compare
//!
//! # JSON for scripting, one object per prompt
//! layerlens -f prompts.txt --json | jq .final_response
//!
//! # Export every visible layer as JSON files
//! layerlens -e "How do I bake bread" --export ./layers
//! ```

use anyhow::Result;
use clap::Parser;

use layerlens_lib::cli::{execute_batch, execute_once, initialize, run_repl, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut ctx = initialize(&args).await?;

    let result = if let Some(ref prompt) = args.execute {
        execute_once(&mut ctx, prompt).await
    } else if let Some(ref file) = args.file {
        execute_batch(&mut ctx, file).await
    } else {
        run_repl(&mut ctx).await
    };

    ctx.shutdown().await?;

    result
}
