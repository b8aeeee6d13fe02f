mod common;
use common::*;
use std::rc::Rc;
use turing::mach::{compile, Move, StepResult, Transition, TransitionTable, Tape, TuringMachine};

#[test]
fn test_empty_main() {
    let result = compile("Set_alphabet \"\"; Setup \"\"; proc main() {}");
    assert!(result.ok);
    assert_eq!(result.table.start_state, 0);
    assert_eq!(result.table.halt_state, 0);
    let mut machine = TuringMachine::new();
    machine.reset(&result.initial_tape, result.table.start_state);
    assert_eq!(machine.step(&result.table), StepResult::Halted);
    assert_eq!(machine.steps(), 0);
}

#[test]
fn test_move_and_write() {
    let (_, machine) = exec(
        "Set_alphabet \"a b\";
         Setup \"a a a\";
         proc main() { move_right; write \"b\"; move_right; write \"b\"; }",
    );
    assert_eq!(machine.tape().get(0).as_ref(), "a");
    assert_eq!(machine.tape().get(1).as_ref(), "b");
    assert_eq!(machine.tape().get(2).as_ref(), "b");
    assert_eq!(machine.head(), 2);
}

#[test]
fn test_while_skip() {
    let (_, machine) = exec(
        "Set_alphabet \"1 x\";
         Setup \"1 1 1\";
         proc main() { while (read == \"1\") { move_right; } write \"x\"; }",
    );
    for position in 0..3 {
        assert_eq!(machine.tape().get(position).as_ref(), "1");
    }
    assert_eq!(machine.tape().get(3).as_ref(), "x");
    assert_eq!(machine.head(), 3);
}

#[test]
fn test_counter() {
    let (_, machine) = exec(
        "Set_alphabet \"1\";
         proc main() { x = 0; while (x < 3) { x++; write \"1\"; move_right; } }",
    );
    for position in 0..3 {
        assert_eq!(machine.tape().get(position).as_ref(), "1");
    }
    assert_eq!(machine.head(), 3);
    assert_eq!(var_value(&machine), 3);
}

#[test]
fn test_write_blank_clears_cell() {
    let (_, machine) = exec(
        "Set_alphabet \"a\";
         Setup \"a\";
         proc main() { write \"blank\"; }",
    );
    assert_eq!(machine.tape().get(0).as_ref(), " ");
}

#[test]
fn test_halted_latches() {
    let result = compile_ok("Set_alphabet \"a\"; proc main() { write \"a\"; }");
    let mut machine = TuringMachine::new();
    machine.reset(&result.initial_tape, result.table.start_state);
    while machine.step(&result.table) == StepResult::Ok {}
    assert!(machine.halted());
    let steps = machine.steps();
    assert_eq!(machine.step(&result.table), StepResult::Halted);
    assert_eq!(machine.step(&result.table), StepResult::Halted);
    assert_eq!(machine.steps(), steps);
}

#[test]
fn test_no_transition_latches() {
    // hand-built table with a hole: state 0 only handles "a"
    let mut table = TransitionTable::new();
    table.start_state = 0;
    table.halt_state = 1;
    table.add(
        0,
        Rc::from("a"),
        Transition {
            next: 0,
            write: Rc::from("a"),
            motion: Move::Right,
        },
    );
    let mut machine = TuringMachine::new();
    machine.reset(&Tape::new(), 0);
    assert_eq!(machine.step(&table), StepResult::NoTransition);
    assert!(machine.halted());
    assert_eq!(machine.steps(), 0);
    assert_eq!(machine.step(&table), StepResult::Halted);
}

#[test]
fn test_crossing_the_zone_and_back() {
    // one user move left from position 0 must skip the whole variable zone
    let (_, machine) = exec(
        "Set_alphabet \"a\";
         proc main() { move_left; write \"a\"; }",
    );
    assert_eq!(machine.head(), -11);
    assert_eq!(machine.tape().get(-11).as_ref(), "a");

    let (_, machine) = exec(
        "Set_alphabet \"a\";
         proc main() { move_left; write \"a\"; move_right; write \"a\"; }",
    );
    assert_eq!(machine.head(), 0);
    assert_eq!(machine.tape().get(-11).as_ref(), "a");
    assert_eq!(machine.tape().get(0).as_ref(), "a");
}

#[test]
fn test_zone_survives_crossing() {
    let (result, machine) = exec(
        "Set_alphabet \"a\";
         proc main() { move_left; move_right; }",
    );
    // the sentinels and bit cells are untouched by the pass-through
    assert_eq!(machine.tape().get(-10).as_ref(), "BOM");
    assert_eq!(machine.tape().get(-1).as_ref(), "EOM");
    for bit in 0..8 {
        assert_eq!(machine.tape().get(-9 + bit).as_ref(), "0_");
    }
    assert_eq!(machine.head(), 0);
    assert!(result.ok);
}
