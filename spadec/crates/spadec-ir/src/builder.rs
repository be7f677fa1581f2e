use crate::instruction::{Instruction, IrProgram};

/// Accumulates instructions emitted by the generator into a finished
/// [`IrProgram`].
pub struct Builder {
    instructions: Vec<Instruction>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    pub fn emit(&mut self, instruction: Instruction) {
        log::trace!("emit {}", instruction);
        self.instructions.push(instruction);
    }

    /// Returns the accumulated instructions. Does **not** append `HALT` —
    /// that is the driver's job, once it has generated IR for every
    /// statement in the program.
    pub fn build(self) -> IrProgram {
        self.instructions
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_returns_emitted_instructions_without_a_trailing_halt() {
        let mut builder = Builder::new();
        builder.emit(Instruction::PushConst(1));
        let program = builder.build();
        assert_eq!(program, vec![Instruction::PushConst(1)]);
    }
}
