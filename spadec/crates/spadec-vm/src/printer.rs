//! Post-mortem rendering of VM state, used by the driver's `--emit vm-state`
//! flag to show the stack, variables, string pool and machine state after a
//! run (successful or not).

use std::fmt::Write as _;

use crate::vm::{ExecutionState, Vm};

pub fn print_vm_state(vm: &Vm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "state: {}", state_name(vm.state()));
    let _ = writeln!(out, "pc: {}", vm.program_counter());

    let _ = writeln!(out, "stack:");
    for (i, value) in vm.stack().iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i, value);
    }

    let _ = writeln!(out, "variables:");
    for (name, value) in vm.variables() {
        let _ = writeln!(out, "  {} = {}", name, value);
    }

    let _ = writeln!(out, "string pool:");
    for (i, s) in vm.string_pool().iter().enumerate() {
        let _ = writeln!(out, "  [{}] {:?}", i, s);
    }

    out
}

fn state_name(state: ExecutionState) -> &'static str {
    match state {
        ExecutionState::Running => "running",
        ExecutionState::Halted => "halted",
        ExecutionState::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spadec_ir::Instruction;

    #[test]
    fn prints_state_vars_and_pool() {
        let mut vm = Vm::new();
        vm.execute(&vec![
            Instruction::PushStringLit("hi".to_string()),
            Instruction::StoreVar("s".to_string()),
            Instruction::Halt,
        ])
        .unwrap();
        let text = print_vm_state(&vm);
        assert!(text.contains("state: halted"));
        assert!(text.contains("s = 0"));
        assert!(text.contains("[0] \"hi\""));
    }
}
