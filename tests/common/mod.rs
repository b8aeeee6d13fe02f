#![allow(dead_code)]

use turing::mach::layout;
use turing::mach::{compile, CompileResult, StepResult, TuringMachine};

pub fn compile_ok(source: &str) -> CompileResult {
    let result = compile(source);
    assert!(result.ok, "unexpected diagnostics: {:?}", result.diagnostics);
    result
}

/// Compile, reset and run to halt. Panics on a missing transition or when
/// the cycle cap is exceeded.
pub fn exec(source: &str) -> (CompileResult, TuringMachine) {
    exec_n(source, 1_000_000)
}

pub fn exec_n(source: &str, cycles: u64) -> (CompileResult, TuringMachine) {
    let result = compile_ok(source);
    let mut machine = TuringMachine::new();
    machine.reset(&result.initial_tape, result.table.start_state);
    for _ in 0..cycles {
        match machine.step(&result.table) {
            StepResult::Ok => {}
            StepResult::Halted => return (result, machine),
            StepResult::NoTransition => panic!(
                "no transition in state {} at head {}",
                machine.state(),
                machine.head()
            ),
        }
    }
    panic!("{} execution cycles exceeded", cycles);
}

/// The variable as encoded in the bit cells of the tape.
pub fn var_value(machine: &TuringMachine) -> i8 {
    let mut value: u8 = 0;
    for bit in 0..layout::MEM_BITS {
        value <<= 1;
        if machine.tape().get(layout::bit_position(bit)).as_ref() == layout::SYM_BIT1 {
            value |= 1;
        }
    }
    value as i8
}

/// No `#` marker may survive a variable operation anywhere near the action.
pub fn assert_no_marker(machine: &TuringMachine) {
    let (low, high) = machine.tape().bounds(machine.head());
    for position in low..=high {
        assert_ne!(
            machine.tape().get(position).as_ref(),
            layout::SYM_MARKER,
            "marker left behind at {}",
            position
        );
    }
}
