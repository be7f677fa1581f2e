//! VM execution error taxonomy, one variant per outcome the reference
//! interpreter's `VMResult` enum distinguishes.

use spadec_util::diagnostic::DiagnosticCode;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error("stack overflow: value stack is full")]
    StackOverflow,

    #[error("stack underflow: popped an empty stack")]
    StackUnderflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("variable not found: `{0}`")]
    VariableNotFound(String),

    #[error("invalid instruction: {0}")]
    InvalidInstruction(String),

    #[error("power overflow: result exceeds the range of a 32-bit integer")]
    PowerOverflow,

    #[error("index out of bounds: index {index} into a pool of {len} entries")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("out of memory growing a VM buffer")]
    OutOfMemory,
}

impl VmError {
    pub const fn code(&self) -> DiagnosticCode {
        match self {
            VmError::StackOverflow => DiagnosticCode::E_VM_STACK_OVERFLOW,
            VmError::StackUnderflow => DiagnosticCode::E_VM_STACK_UNDERFLOW,
            VmError::DivisionByZero => DiagnosticCode::E_VM_DIVISION_BY_ZERO,
            VmError::VariableNotFound(_) => DiagnosticCode::E_VM_VARIABLE_NOT_FOUND,
            VmError::InvalidInstruction(_) => DiagnosticCode::E_VM_INVALID_INSTRUCTION,
            VmError::PowerOverflow => DiagnosticCode::E_VM_POWER_OVERFLOW,
            VmError::IndexOutOfBounds { .. } => DiagnosticCode::E_VM_INDEX_OUT_OF_BOUNDS,
            VmError::OutOfMemory => DiagnosticCode::E_VM_OUT_OF_MEMORY,
        }
    }
}

pub type VmResult<T> = std::result::Result<T, VmError>;
