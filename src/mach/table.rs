use super::StateId;
use crate::lang::{Diagnostic, Loc, Symbol};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Left,
    Right,
    Stay,
}

impl Move {
    /// Head displacement of the move.
    pub fn offset(self) -> i64 {
        match self {
            Move::Left => -1,
            Move::Right => 1,
            Move::Stay => 0,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Move::Left => write!(f, "L"),
            Move::Right => write!(f, "R"),
            Move::Stay => write!(f, "S"),
        }
    }
}

/// One rule of the machine: what to write, where to move, which state next.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: StateId,
    pub write: Symbol,
    pub motion: Move,
}

/// Deterministic transition table: at most one transition per
/// `(state, symbol)` pair. `add` is append-only; an attempt to overwrite an
/// existing key is recorded and reported by the compiler as a hard error,
/// since only a code-generation defect can produce one.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    pub start_state: StateId,
    pub halt_state: StateId,
    transitions: HashMap<StateId, HashMap<Symbol, Transition>>,
    duplicates: Vec<(StateId, Symbol)>,
}

impl TransitionTable {
    pub fn new() -> TransitionTable {
        TransitionTable::default()
    }

    /// Insert a transition. Returns false (and records the key) when the
    /// pair already has one; the existing transition is kept.
    pub fn add(&mut self, state: StateId, symbol: Symbol, transition: Transition) -> bool {
        let row = self.transitions.entry(state).or_insert_with(HashMap::new);
        if row.contains_key(&symbol) {
            self.duplicates.push((state, symbol));
            return false;
        }
        row.insert(symbol, transition);
        true
    }

    pub fn has(&self, state: StateId, symbol: &str) -> bool {
        self.get(state, symbol).is_some()
    }

    pub fn get(&self, state: StateId, symbol: &str) -> Option<&Transition> {
        self.transitions.get(&state)?.get(symbol)
    }

    /// Number of transitions in the table.
    pub fn len(&self) -> usize {
        self.transitions.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn duplicates(&self) -> &[(StateId, Symbol)] {
        &self.duplicates
    }

    /// Every state mentioned anywhere in the table, sorted. For table views.
    pub fn states(&self) -> Vec<StateId> {
        let mut set = HashSet::new();
        set.insert(self.start_state);
        set.insert(self.halt_state);
        for (state, row) in &self.transitions {
            set.insert(*state);
            for transition in row.values() {
                set.insert(transition.next);
            }
        }
        let mut states: Vec<StateId> = set.into_iter().collect();
        states.sort_unstable();
        states
    }

    /// Every symbol read or written by the table, sorted. For table views.
    pub fn alphabet(&self) -> Vec<Symbol> {
        let mut set = HashSet::new();
        for row in self.transitions.values() {
            for (symbol, transition) in row {
                set.insert(symbol.clone());
                set.insert(transition.write.clone());
            }
        }
        let mut alphabet: Vec<Symbol> = set.into_iter().collect();
        alphabet.sort_unstable();
        alphabet
    }

    /// States reachable from `start_state` by following transitions.
    pub fn reachable(&self) -> HashSet<StateId> {
        let mut seen = HashSet::new();
        let mut queue = vec![self.start_state];
        while let Some(state) = queue.pop() {
            if !seen.insert(state) {
                continue;
            }
            if let Some(row) = self.transitions.get(&state) {
                for transition in row.values() {
                    if !seen.contains(&transition.next) {
                        queue.push(transition.next);
                    }
                }
            }
        }
        seen
    }

    /// Structural checks after generation. `start == halt` is only legal for
    /// the empty table; a halt state that cannot be reached from the start
    /// state is suspicious but not fatal (the program may loop by design),
    /// so it is reported as a warning.
    pub fn validate(&self, out: &mut Vec<Diagnostic>) -> bool {
        let mut ok = true;
        if !self.is_empty() && self.start_state == self.halt_state {
            out.push(Diagnostic::error(
                Loc::default(),
                "the start state equals the halt state".to_string(),
            ));
            ok = false;
        }
        if !self.is_empty() && !self.reachable().contains(&self.halt_state) {
            out.push(Diagnostic::warning(
                Loc::default(),
                "the halt state is not reachable from the start state".to_string(),
            ));
        }
        ok
    }
}
