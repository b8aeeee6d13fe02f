use super::table::TransitionTable;
use super::tape::Tape;
use super::{Position, StateId};
use crate::lang::Symbol;

/// Outcome of one interpreter step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Ok,
    Halted,
    NoTransition,
}

/// Full configuration of a running machine. A fresh machine is halted until
/// `reset` installs an initial tape and a start state.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    tape: Tape,
    head: Position,
    state: StateId,
    halted: bool,
    steps: u64,
}

impl Default for TuringMachine {
    fn default() -> TuringMachine {
        TuringMachine {
            tape: Tape::new(),
            head: 0,
            state: 0,
            halted: true,
            steps: 0,
        }
    }
}

impl TuringMachine {
    pub fn new() -> TuringMachine {
        TuringMachine::default()
    }

    pub fn reset(&mut self, initial_tape: &Tape, start_state: StateId) {
        self.tape = initial_tape.clone();
        self.head = 0;
        self.state = start_state;
        self.halted = false;
        self.steps = 0;
    }

    pub fn read(&self) -> Symbol {
        self.tape.get(self.head)
    }

    pub fn write(&mut self, symbol: Symbol) {
        self.tape.set(self.head, symbol);
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// One step: read, look up, write, move, halt test. A missing transition
    /// latches the machine halted; every call past halt answers `Halted`.
    pub fn step(&mut self, table: &TransitionTable) -> StepResult {
        if self.halted {
            return StepResult::Halted;
        }
        if self.state == table.halt_state {
            self.halted = true;
            return StepResult::Halted;
        }
        let current = self.read();
        let transition = match table.get(self.state, &current) {
            Some(transition) => transition.clone(),
            None => {
                self.halted = true;
                return StepResult::NoTransition;
            }
        };
        self.tape.set(self.head, transition.write);
        self.head += transition.motion.offset();
        self.state = transition.next;
        self.halted = self.state == table.halt_state;
        self.steps += 1;
        if self.halted {
            StepResult::Halted
        } else {
            StepResult::Ok
        }
    }
}
