//! spadec-vm - the register-less stack machine that executes a
//! [`spadec_ir::IrProgram`].
//!
//! Execution is a pure function of its instruction stream: there is no
//! suspension, no cancellation and no shared state between runs. A fresh
//! [`Vm`] owns its value stack, string pool and variable table outright, and
//! `Drop` tears all three down when the machine goes out of scope.

mod error;
mod printer;
mod vm;

pub use error::{VmError, VmResult};
pub use printer::print_vm_state;
pub use vm::{ExecutionState, Vm};
