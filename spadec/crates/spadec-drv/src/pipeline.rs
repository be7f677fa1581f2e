//! Runs one source file through lex, parse, analyze, generate, execute.

use std::io::Write;

use anyhow::Result;
use spadec_ir::Instruction;
use spadec_util::diagnostic::Handler;

use crate::cli::{Config, EmitMode};
use crate::printer;

/// Runs the full pipeline over `source`. An `--emit` mode stops the
/// pipeline at that stage and prints its output to `out` instead of
/// executing. Returns whether the file compiled (and, absent `--emit`,
/// ran) without error.
pub fn run_file(source: &str, config: &Config, out: &mut dyn Write) -> Result<bool> {
    let handler = Handler::new();

    log::debug!("lexing {} bytes of source", source.len());
    let tokens = spadec_lex::lex(source, &handler);
    if config.emit == Some(EmitMode::Tokens) {
        write!(out, "{}", printer::print_tokens(&tokens))?;
        return Ok(!handler.has_errors());
    }

    log::debug!("parsing {} tokens", tokens.len());
    let mut parser = spadec_par::Parser::new(tokens, &handler);
    let program = parser.parse_program();
    if config.emit == Some(EmitMode::Ast) {
        write!(out, "{}", printer::print_program(&program))?;
        return Ok(!handler.has_errors());
    }
    if report_errors(&handler, out)? {
        return Ok(false);
    }

    log::debug!("analyzing {} statements", program.len());
    let tables = spadec_sem::analyze(&program, &handler);
    if config.emit == Some(EmitMode::Symbols) {
        write!(out, "{}", tables.dump())?;
        return Ok(!handler.has_errors());
    }
    if report_errors(&handler, out)? {
        return Ok(false);
    }

    let mut ir = spadec_ir::generate(&program, &tables);
    ir.push(Instruction::Halt);
    log::debug!("generated {} instructions", ir.len());
    if config.emit == Some(EmitMode::Ir) {
        write!(out, "{}", spadec_ir::print_ir(&ir))?;
        return Ok(true);
    }

    let mut vm = spadec_vm::Vm::new();
    let result = vm.execute(&ir);

    if config.emit == Some(EmitMode::VmState) {
        write!(out, "{}", spadec_vm::print_vm_state(&vm))?;
    }

    match result {
        Ok(()) => Ok(true),
        Err(err) => {
            writeln!(out, "error: {err}")?;
            Ok(false)
        },
    }
}

/// Prints every error-level diagnostic and reports whether any were found.
fn report_errors(handler: &Handler, out: &mut dyn Write) -> Result<bool> {
    for diagnostic in handler.diagnostics() {
        if diagnostic.level.is_error() {
            writeln!(out, "{diagnostic}")?;
        }
    }
    Ok(handler.has_errors())
}
