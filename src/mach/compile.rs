use super::codegen;
use super::flatten::flatten;
use super::layout;
use super::table::TransitionTable;
use super::tape::Tape;
use crate::lang::{self, Diagnostic, Symbol};
use std::rc::Rc;

/// Everything one compilation produces. `table` may be empty or partial when
/// `ok` is false; `diagnostics` then carries at least one error. With
/// `ok` true it may still carry warnings.
#[derive(Debug)]
pub struct CompileResult {
    pub ok: bool,
    pub table: TransitionTable,
    pub diagnostics: Vec<Diagnostic>,
    /// Blank first, then the user symbols in declaration order, then the
    /// five system symbols.
    pub alphabet: Vec<Symbol>,
    /// `Setup` content from position 0 plus the seeded variable zone.
    pub initial_tape: Tape,
}

/// Compile a source text into a transition table. Never panics and never
/// returns early: whatever goes wrong is reported through the diagnostics of
/// an `ok = false` result.
pub fn compile(source: &str) -> CompileResult {
    let parsed = lang::parse(source);
    let mut diagnostics = parsed.diagnostics;
    let mut ok = parsed.ok;

    let mut alphabet = parsed.alphabet;
    alphabet.extend(layout::system_symbols().iter().cloned());

    let mut initial_tape = Tape::new();
    seed_variable_zone(&mut initial_tape);
    for (index, symbol) in parsed.setup.iter().enumerate() {
        initial_tape.set(layout::USER_ZONE_START + index as i64, symbol.clone());
    }

    let mut table = TransitionTable::new();
    if ok && parsed.procedures.contains_key("main") {
        match flatten("main", &parsed.procedures) {
            Ok(flat) => codegen::generate(&flat, &alphabet, &mut table),
            Err(diagnostic) => {
                diagnostics.push(diagnostic);
                ok = false;
            }
        }
    } else {
        // no entry point: an empty table that halts immediately
        table.start_state = 0;
        table.halt_state = 0;
    }

    if !table.duplicates().is_empty() {
        let (state, symbol) = table.duplicates()[0].clone();
        diagnostics.push(Diagnostic::error(
            lang::Loc::default(),
            format!(
                "duplicate transition generated for state {} and symbol '{}' ({} total)",
                state,
                symbol,
                table.duplicates().len()
            ),
        ));
        ok = false;
    }

    if ok {
        ok = table.validate(&mut diagnostics);
    }

    CompileResult {
        ok,
        table,
        diagnostics,
        alphabet,
        initial_tape,
    }
}

/// The sentinels and the eight bit cells the variable primitives navigate
/// by. The variable starts at zero.
fn seed_variable_zone(tape: &mut Tape) {
    tape.set(layout::MEM_BEGIN, Rc::from(layout::SYM_BOM));
    tape.set(layout::MEM_END, Rc::from(layout::SYM_EOM));
    for bit in 0..layout::MEM_BITS {
        tape.set(layout::bit_position(bit), Rc::from(layout::SYM_BIT0));
    }
}
