//! Command-line configuration.
//!
//! Parsed by hand from `std::env::args()`, same as the rest of the
//! pipeline: nothing in the workspace depends on an argument-parsing crate.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// What an `--emit` flag asks the driver to print instead of running the
/// file to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    Tokens,
    Ast,
    Symbols,
    Ir,
    VmState,
}

impl EmitMode {
    fn parse(mode: &str) -> Result<Self> {
        Ok(match mode {
            "tokens" => EmitMode::Tokens,
            "ast" => EmitMode::Ast,
            "symbols" => EmitMode::Symbols,
            "ir" => EmitMode::Ir,
            "vm-state" => EmitMode::VmState,
            other => bail!("unknown --emit mode `{other}` (expected tokens, ast, symbols, ir, or vm-state)"),
        })
    }
}

#[derive(Debug, Default)]
pub struct Config {
    pub input_files: Vec<PathBuf>,
    pub emit: Option<EmitMode>,
}

impl Config {
    /// Parses a full `argv`, including the program name in position 0.
    pub fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut input_files = Vec::new();
        let mut emit = None;

        let mut args = args.skip(1);
        while let Some(arg) = args.next() {
            if let Some(mode) = arg.strip_prefix("--emit=") {
                emit = Some(EmitMode::parse(mode)?);
            } else if arg == "--emit" {
                let mode = args.next().context("--emit requires a mode")?;
                emit = Some(EmitMode::parse(&mode)?);
            } else if let Some(flag) = arg.strip_prefix("--") {
                bail!("unknown option: --{flag}");
            } else {
                input_files.push(PathBuf::from(arg));
            }
        }

        Ok(Self { input_files, emit })
    }
}
