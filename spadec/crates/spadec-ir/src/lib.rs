//! spadec-ir - lowers a type-checked Spade [`spadec_par::ast::Program`]
//! into a linear stream of stack-machine instructions.
//!
//! Generation never fails on its own: by the time a program reaches this
//! crate, semantic analysis has already rejected anything that would
//! make emission ambiguous (e.g. a bare `null`).

mod builder;
mod generator;
mod instruction;

pub use builder::Builder;
pub use generator::generate;
pub use instruction::{print_ir, Instruction, IrProgram};
