//! spadec-drv - the `spade` command-line driver.
//!
//! Ties the pipeline crates together in the order a file goes through
//! them: lex, parse, analyze, generate IR, execute. Each input file is run
//! independently and in the order given on the command line; with no input
//! files at all, drops into an interactive REPL instead.

mod cli;
mod pipeline;
mod printer;
mod repl;

pub use cli::{Config, EmitMode};
pub use pipeline::run_file;

use anyhow::{bail, Context, Result};
use std::io::{self, Write};

/// Runs the driver over a full `argv` (program name included), writing
/// file-mode output to `out`. Returns `Ok(())` on success; an `Err` means
/// the process should exit non-zero.
pub fn run(args: impl Iterator<Item = String>, out: &mut dyn Write) -> Result<()> {
    let config = Config::parse(args)?;

    if config.input_files.is_empty() {
        let stdin = io::stdin();
        repl::run_interactive(stdin.lock(), out)?;
        return Ok(());
    }

    let mut all_ok = true;
    for path in &config.input_files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::info!("running {}", path.display());
        if !run_file(&source, &config, out)? {
            all_ok = false;
        }
    }

    if !all_ok {
        bail!("compilation failed");
    }
    Ok(())
}
