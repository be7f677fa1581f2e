//! The zero-argument interactive mode.
//!
//! Prompts with `spade> `, accumulates lines into one program (a trailing
//! `\` continues onto the next line, replaced by a space; a bare `exit`
//! quits immediately), then runs that program through every pipeline stage,
//! printing each stage's output before looping back to the prompt.

use std::io::{BufRead, Write};

use anyhow::Result;
use spadec_ir::Instruction;
use spadec_util::diagnostic::Handler;

use crate::printer;

const PROMPT: &str = "spade> ";

pub fn run_interactive(input: impl BufRead, mut output: impl Write) -> Result<()> {
    writeln!(output, "Spade Compiler REPL - Enter Spade code (type 'exit' to quit)")?;
    writeln!(output, "Use '\\' at end of line to continue on next line")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut accumulated = String::new();
        let finished = loop {
            let Some(line) = lines.next() else {
                break true;
            };
            let line = line?;
            if line.trim() == "exit" {
                break true;
            }
            if let Some(continued) = line.strip_suffix('\\') {
                accumulated.push_str(continued);
                accumulated.push(' ');
                write!(output, "{PROMPT}")?;
                output.flush()?;
            } else {
                accumulated.push_str(&line);
                break false;
            }
        };

        if finished && accumulated.trim().is_empty() {
            return Ok(());
        }

        if !accumulated.trim().is_empty() {
            run_verbose(&accumulated, &mut output)?;
        }

        if finished {
            return Ok(());
        }
    }
}

/// Runs `source` through every pipeline stage, printing each stage's
/// output in turn, matching the reference REPL's always-verbose transcript.
fn run_verbose(source: &str, out: &mut impl Write) -> Result<()> {
    let handler = Handler::new();

    writeln!(out, "=== LEXER OUTPUT ===")?;
    let tokens = spadec_lex::lex(source, &handler);
    write!(out, "{}", printer::print_tokens(&tokens))?;

    writeln!(out, "\n=== PARSER OUTPUT ===")?;
    let mut parser = spadec_par::Parser::new(tokens, &handler);
    let program = parser.parse_program();
    write!(out, "{}", printer::print_program(&program))?;
    if report_errors(&handler, out)? {
        return Ok(());
    }

    writeln!(out, "\n=== SEMANTIC ANALYSIS ===")?;
    let tables = spadec_sem::analyze(&program, &handler);
    write!(out, "{}", tables.dump())?;
    if report_errors(&handler, out)? {
        return Ok(());
    }

    writeln!(out, "\n=== IR GENERATION ===")?;
    let mut ir = spadec_ir::generate(&program, &tables);
    ir.push(Instruction::Halt);
    write!(out, "{}", spadec_ir::print_ir(&ir))?;

    writeln!(out, "\n=== VM EXECUTION ===")?;
    let mut vm = spadec_vm::Vm::new();
    match vm.execute(&ir) {
        Ok(()) => writeln!(out, "Program executed successfully!")?,
        Err(err) => writeln!(out, "Error executing program: {err}")?,
    }
    write!(out, "{}", spadec_vm::print_vm_state(&vm))?;

    Ok(())
}

fn report_errors(handler: &Handler, out: &mut impl Write) -> Result<bool> {
    for diagnostic in handler.diagnostics() {
        if diagnostic.level.is_error() {
            writeln!(out, "{diagnostic}")?;
        }
    }
    Ok(handler.has_errors())
}
