/*!
## Code Generation

Lowers a flattened instruction block into the transition table. State ids are
assigned by a count-then-emit scheme: `count_states` commits, per instruction,
to the number of states the emitter will own, depending only on the
instruction and the alphabet. That makes every range assignable in one
top-down pass with no backpatching. Counts for the variable subsystem are
upper bounds; unused slack states stay unreachable.

The whole program is emitted twice. Phase R serves a head to the right of the
variable zone, phase L a head to the left of it; a `move_left`/`move_right`
that steps onto a zone sentinel skips across all ten zone cells and resumes in
the opposite phase's copy of the successor state. Which side the head is on
is thereby carried by the state id instead of a marker on the tape.

*/

use super::layout;
use super::table::{Move, Transition, TransitionTable};
use super::var;
use super::StateId;
use crate::lang::ast::{Block, Cond, Inst};
use crate::lang::Symbol;

/// States reserved for one head move: the step, the sentinel check, and the
/// zone-skip chain.
const MOVE_STATES: StateId = 2 + layout::MEM_CELLS as StateId;

/// States the generator will own for `block`.
pub fn count_states(block: &Block, alphabet: &[Symbol]) -> StateId {
    block
        .iter()
        .map(|inst| count_inst(inst, alphabet))
        .sum()
}

fn count_inst(inst: &Inst, alphabet: &[Symbol]) -> StateId {
    match inst {
        Inst::MoveLeft(_) | Inst::MoveRight(_) => MOVE_STATES,
        Inst::Write(..) | Inst::Call(..) => 1,
        Inst::IfElse(_, cond, then_block, else_block) => {
            count_cond(cond, alphabet)
                + count_states(then_block, alphabet)
                + count_states(else_block, alphabet)
        }
        Inst::While(_, cond, body) => count_cond(cond, alphabet) + count_states(body, alphabet),
        Inst::VarSet(..) => var::set_states(alphabet),
        Inst::VarInc(_) => var::inc_states(alphabet),
        Inst::VarDec(_) => var::dec_states(alphabet),
    }
}

fn count_cond(cond: &Cond, alphabet: &[Symbol]) -> StateId {
    match cond {
        Cond::ReadEq(..) | Cond::ReadNeq(..) => 1,
        Cond::And(_, left, right) | Cond::Or(_, left, right) => {
            count_cond(left, alphabet) + count_cond(right, alphabet)
        }
        // the right operand is emitted once per outcome of the left
        Cond::Xor(_, left, right) => {
            count_cond(left, alphabet) + 2 * count_cond(right, alphabet)
        }
        Cond::Not(_, operand) => count_cond(operand, alphabet),
        Cond::VarLt(..) | Cond::VarGt(..) => var::cmp_states(alphabet),
    }
}

/// Emission context for one phase.
pub(super) struct Gen<'a> {
    pub table: &'a mut TransitionTable,
    pub alphabet: &'a [Symbol],
    pub offset: StateId,
    pub phase_r: bool,
}

impl<'a> Gen<'a> {
    /// The same state in the other phase's copy of the program.
    pub fn mirror(&self, state: StateId) -> StateId {
        if self.phase_r {
            state + self.offset
        } else {
            state - self.offset
        }
    }

    /// For every alphabet symbol: keep the symbol, move, go to `to`.
    pub fn step_all(&mut self, from: StateId, to: StateId, motion: Move) {
        let alphabet = self.alphabet;
        for symbol in alphabet {
            self.table.add(
                from,
                symbol.clone(),
                Transition {
                    next: to,
                    write: symbol.clone(),
                    motion,
                },
            );
        }
    }

    pub fn stay_all(&mut self, from: StateId, to: StateId) {
        self.step_all(from, to, Move::Stay);
    }

    /// For every alphabet symbol: write `write`, stay, go to `to`.
    pub fn write_all(&mut self, from: StateId, to: StateId, write: &Symbol) {
        let alphabet = self.alphabet;
        for symbol in alphabet {
            self.table.add(
                from,
                symbol.clone(),
                Transition {
                    next: to,
                    write: write.clone(),
                    motion: Move::Stay,
                },
            );
        }
    }
}

/// Generate the transition table for a flattened program. The empty program
/// produces the empty table with `start == halt == 0`.
pub fn generate(block: &Block, alphabet: &[Symbol], table: &mut TransitionTable) {
    let total = count_states(block, alphabet);
    if block.is_empty() {
        table.start_state = 0;
        table.halt_state = 0;
        return;
    }
    let halt_r = total;
    let halt_l = 2 * total + 1;
    let offset = total + 1;
    table.start_state = 0;
    table.halt_state = halt_r;
    {
        let mut gen = Gen {
            table: &mut *table,
            alphabet,
            offset,
            phase_r: true,
        };
        gen_block(&mut gen, block, 0, halt_r);
    }
    {
        let mut gen = Gen {
            table: &mut *table,
            alphabet,
            offset,
            phase_r: false,
        };
        gen_block(&mut gen, block, offset, halt_l);
    }
    // the phase-L halt folds into the phase-R halt, so externally the
    // machine has a single halt state
    for symbol in alphabet {
        table.add(
            halt_l,
            symbol.clone(),
            Transition {
                next: halt_r,
                write: symbol.clone(),
                motion: Move::Stay,
            },
        );
    }
}

fn gen_block(gen: &mut Gen, block: &Block, start: StateId, exit: StateId) {
    let mut current = start;
    for (index, inst) in block.iter().enumerate() {
        let needed = count_inst(inst, gen.alphabet);
        let next = if index + 1 < block.len() {
            current + needed
        } else {
            exit
        };
        gen_inst(gen, inst, current, next);
        current += needed;
    }
    debug_assert_eq!(current, start + count_states(block, gen.alphabet));
}

fn gen_inst(gen: &mut Gen, inst: &Inst, current: StateId, next: StateId) {
    match inst {
        Inst::MoveLeft(_) => gen_move(gen, current, next, Move::Left),
        Inst::MoveRight(_) => gen_move(gen, current, next, Move::Right),
        Inst::Write(_, symbol) => gen.write_all(current, next, symbol),
        // calls are inlined away before generation; a surviving one is a
        // plain bridge to the successor
        Inst::Call(..) => gen.stay_all(current, next),
        Inst::IfElse(_, cond, then_block, else_block) => {
            let cond_count = count_cond(cond, gen.alphabet);
            let then_count = count_states(then_block, gen.alphabet);
            let else_count = count_states(else_block, gen.alphabet);
            let then_start = current + cond_count;
            let else_start = then_start + then_count;
            let then_target = if then_count > 0 { then_start } else { next };
            let else_target = if else_count > 0 { else_start } else { next };
            gen_cond(gen, cond, current, then_target, else_target);
            if then_count > 0 {
                gen_block(gen, then_block, then_start, next);
            }
            if else_count > 0 {
                gen_block(gen, else_block, else_start, next);
            }
        }
        Inst::While(_, cond, body) => {
            let cond_count = count_cond(cond, gen.alphabet);
            let body_count = count_states(body, gen.alphabet);
            let body_start = current + cond_count;
            let body_target = if body_count > 0 { body_start } else { current };
            gen_cond(gen, cond, current, body_target, next);
            if body_count > 0 {
                // the body exits back into the condition entry
                gen_block(gen, body, body_start, current);
            }
        }
        Inst::VarSet(_, value) => var::gen_set(gen, current, next, *value),
        Inst::VarInc(_) => var::gen_inc(gen, current, next),
        Inst::VarDec(_) => var::gen_dec(gen, current, next),
    }
}

/// A user-level move is one head step plus, when the step lands on the
/// sentinel guarding the variable zone, a chain of ten further steps that
/// crosses the zone and resumes in the other phase.
fn gen_move(gen: &mut Gen, current: StateId, next: StateId, motion: Move) {
    let check = current + 1;
    gen.step_all(current, check, motion);
    let crossing = if gen.phase_r {
        motion == Move::Left
    } else {
        motion == Move::Right
    };
    if !crossing {
        // the zone lies on the other side; the check state just falls through
        gen.stay_all(check, next);
        return;
    }
    let sentinel = if gen.phase_r {
        layout::SYM_EOM
    } else {
        layout::SYM_BOM
    };
    let alphabet = gen.alphabet;
    for symbol in alphabet {
        if symbol.as_ref() == sentinel {
            gen.table.add(
                check,
                symbol.clone(),
                Transition {
                    next: check + 1,
                    write: symbol.clone(),
                    motion,
                },
            );
        } else {
            gen.table.add(
                check,
                symbol.clone(),
                Transition {
                    next,
                    write: symbol.clone(),
                    motion: Move::Stay,
                },
            );
        }
    }
    let skip = layout::MEM_CELLS as StateId - 1;
    for index in 0..skip {
        let state = check + 1 + index;
        let target = if index + 1 < skip {
            state + 1
        } else {
            gen.mirror(next)
        };
        gen.step_all(state, target, motion);
    }
}

/// Lower a condition into a dispatch graph occupying exactly its counted
/// range, entered at `entry`, leaving to one of the two targets.
fn gen_cond(gen: &mut Gen, cond: &Cond, entry: StateId, then_target: StateId, else_target: StateId) {
    match cond {
        Cond::ReadEq(_, symbol) => gen_read_dispatch(gen, entry, symbol, then_target, else_target),
        Cond::ReadNeq(_, symbol) => gen_read_dispatch(gen, entry, symbol, else_target, then_target),
        Cond::Not(_, operand) => gen_cond(gen, operand, entry, else_target, then_target),
        Cond::And(_, left, right) => {
            let left_count = count_cond(left, gen.alphabet);
            gen_cond(gen, left, entry, entry + left_count, else_target);
            gen_cond(gen, right, entry + left_count, then_target, else_target);
        }
        Cond::Or(_, left, right) => {
            let left_count = count_cond(left, gen.alphabet);
            gen_cond(gen, left, entry, then_target, entry + left_count);
            gen_cond(gen, right, entry + left_count, then_target, else_target);
        }
        Cond::Xor(_, left, right) => {
            let left_count = count_cond(left, gen.alphabet);
            let right_count = count_cond(right, gen.alphabet);
            let first = entry + left_count;
            let second = first + right_count;
            // the right operand is re-lowered, not copied: the first copy
            // inverts the outcome, the second keeps it
            gen_cond(gen, left, entry, first, second);
            gen_cond(gen, right, first, else_target, then_target);
            gen_cond(gen, right, second, then_target, else_target);
        }
        Cond::VarLt(_, value) => var::gen_cmp_lt(gen, entry, then_target, else_target, *value),
        Cond::VarGt(_, value) => var::gen_cmp_gt(gen, entry, then_target, else_target, *value),
    }
}

fn gen_read_dispatch(
    gen: &mut Gen,
    entry: StateId,
    matched: &Symbol,
    if_eq: StateId,
    if_neq: StateId,
) {
    let alphabet = gen.alphabet;
    for symbol in alphabet {
        let target = if symbol == matched { if_eq } else { if_neq };
        gen.table.add(
            entry,
            symbol.clone(),
            Transition {
                next: target,
                write: symbol.clone(),
                motion: Move::Stay,
            },
        );
    }
}
