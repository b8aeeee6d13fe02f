/*!
## Variable Subsystem

Transition generators for the 8-bit two's-complement variable `x` stored in
the reserved zone left of the user tape. Every operation must return the head
to the exact cell it started on with that cell's symbol intact. The cell is
overwritten with the position marker `#` on entry, so the original symbol has
to be remembered in the state graph: each operation emits one lineage of
states per user symbol, and the lineage's return states hard-code the symbol
they restore. That is what makes the state counts linear in the user
alphabet.

Set and compare work MSB-first from `BOM`; increment and decrement ripple
LSB-first from `EOM`. A carry or borrow that reaches `BOM` simply stops,
which realizes the two's-complement wrap.

*/

use super::codegen::Gen;
use super::layout;
use super::table::{Move, Transition};
use super::StateId;
use crate::lang::{Symbol, BLANK};
use std::rc::Rc;

fn user_count(alphabet: &[Symbol]) -> StateId {
    alphabet
        .iter()
        .filter(|symbol| !layout::is_system_symbol(symbol))
        .count() as StateId
}

// Reserved states per operation. Upper bounds: a lineage allocates 19, 6, 6
// and 14 states respectively; the remainder is slack and stays unreachable.

pub fn set_states(alphabet: &[Symbol]) -> StateId {
    user_count(alphabet) * 30
}

pub fn inc_states(alphabet: &[Symbol]) -> StateId {
    user_count(alphabet) * 15
}

pub fn dec_states(alphabet: &[Symbol]) -> StateId {
    user_count(alphabet) * 15
}

pub fn cmp_states(alphabet: &[Symbol]) -> StateId {
    user_count(alphabet) * 25
}

/// Allocation cursor over the states reserved for one operation.
struct Span {
    next: StateId,
    end: StateId,
}

impl Span {
    fn reserve(entry: StateId, count: StateId) -> Span {
        Span {
            next: entry + 1,
            end: entry + count,
        }
    }

    fn take(&mut self) -> StateId {
        debug_assert!(self.next < self.end, "state reservation exhausted");
        let state = self.next;
        self.next += 1;
        state
    }
}

/// Sweep toward the variable zone until `sentinel` is under the head.
/// Phase R approaches from the right, phase L from the left.
fn gen_seek(gen: &mut Gen, entry: StateId, exit: StateId, sentinel: &str) {
    let motion = if gen.phase_r { Move::Left } else { Move::Right };
    let alphabet = gen.alphabet;
    for symbol in alphabet {
        if symbol.as_ref() == sentinel {
            gen.table.add(
                entry,
                symbol.clone(),
                Transition {
                    next: exit,
                    write: symbol.clone(),
                    motion: Move::Stay,
                },
            );
        } else {
            gen.table.add(
                entry,
                symbol.clone(),
                Transition {
                    next: entry,
                    write: symbol.clone(),
                    motion,
                },
            );
        }
    }
}

/// Leave the zone and walk the user side until the `#` marker is found, then
/// restore `original` over it. A blank before the marker means the marker is
/// gone; the walk gives up there rather than running forever.
fn gen_return_to_marker(
    gen: &mut Gen,
    span: &mut Span,
    entry: StateId,
    exit: StateId,
    original: &Symbol,
) {
    let (sentinel, motion) = if gen.phase_r {
        (layout::SYM_EOM, Move::Right)
    } else {
        (layout::SYM_BOM, Move::Left)
    };
    let search = span.take();
    let alphabet = gen.alphabet;
    for symbol in alphabet {
        let target = if symbol.as_ref() == sentinel { search } else { entry };
        gen.table.add(
            entry,
            symbol.clone(),
            Transition {
                next: target,
                write: symbol.clone(),
                motion,
            },
        );
    }
    for symbol in alphabet {
        let transition = if symbol.as_ref() == layout::SYM_MARKER {
            Transition {
                next: exit,
                write: original.clone(),
                motion: Move::Stay,
            }
        } else if symbol.as_ref() == BLANK {
            Transition {
                next: exit,
                write: symbol.clone(),
                motion: Move::Stay,
            }
        } else {
            Transition {
                next: search,
                write: symbol.clone(),
                motion,
            }
        };
        gen.table.add(search, symbol.clone(), transition);
    }
}

/// System symbols under the head at entry skip the operation entirely.
fn gen_system_bypass(gen: &mut Gen, entry: StateId, exit: StateId) {
    let alphabet = gen.alphabet;
    for symbol in alphabet {
        if layout::is_system_symbol(symbol) {
            gen.table.add(
                entry,
                symbol.clone(),
                Transition {
                    next: exit,
                    write: symbol.clone(),
                    motion: Move::Stay,
                },
            );
        }
    }
}

/// `x = value`: mark the cell, sweep to `BOM`, write the eight bits MSB
/// first, return to the marker.
pub(super) fn gen_set(gen: &mut Gen, entry: StateId, exit: StateId, value: i8) {
    let bits = layout::int8_bits(value);
    let users = layout::user_symbols(gen.alphabet);
    let mut span = Span::reserve(entry, set_states(gen.alphabet));
    for original in &users {
        let after_marker = span.take();
        gen.table.add(
            entry,
            original.clone(),
            Transition {
                next: after_marker,
                write: Rc::from(layout::SYM_MARKER),
                motion: Move::Stay,
            },
        );
        let after_bom = span.take();
        gen_seek(gen, after_marker, after_bom, layout::SYM_BOM);
        let mut current = after_bom;
        for bit in bits.iter() {
            let on_bit = span.take();
            gen.step_all(current, on_bit, Move::Right);
            let after_write = span.take();
            let bit_symbol: Symbol = Rc::from(*bit);
            gen.write_all(on_bit, after_write, &bit_symbol);
            current = after_write;
        }
        gen_return_to_marker(gen, &mut span, current, exit, original);
    }
    gen_system_bypass(gen, entry, exit);
}

/// `x++`: mark the cell, sweep to `EOM`, step onto the LSB and ripple the
/// carry left. `0_` becomes `1_` and the operation is done; `1_` becomes
/// `0_` and the carry walks one bit left; a carry that reaches `BOM` stops.
pub(super) fn gen_inc(gen: &mut Gen, entry: StateId, exit: StateId) {
    gen_ripple(gen, entry, exit, true);
}

/// `x--`: the symmetric borrow. `1_` becomes `0_` and the operation is done;
/// `0_` becomes `1_` and the borrow walks left.
pub(super) fn gen_dec(gen: &mut Gen, entry: StateId, exit: StateId) {
    gen_ripple(gen, entry, exit, false);
}

fn gen_ripple(gen: &mut Gen, entry: StateId, exit: StateId, increment: bool) {
    let users = layout::user_symbols(gen.alphabet);
    let count = if increment {
        inc_states(gen.alphabet)
    } else {
        dec_states(gen.alphabet)
    };
    let mut span = Span::reserve(entry, count);
    let (done_write, carry_write) = if increment {
        (layout::SYM_BIT1, layout::SYM_BIT0)
    } else {
        (layout::SYM_BIT0, layout::SYM_BIT1)
    };
    for original in &users {
        let after_marker = span.take();
        gen.table.add(
            entry,
            original.clone(),
            Transition {
                next: after_marker,
                write: Rc::from(layout::SYM_MARKER),
                motion: Move::Stay,
            },
        );
        let return_state = span.take();
        gen_return_to_marker(gen, &mut span, return_state, exit, original);
        let after_carry = span.take();
        let after_eom = span.take();
        gen_seek(gen, after_marker, after_eom, layout::SYM_EOM);
        let check_bit = span.take();
        gen.step_all(after_eom, check_bit, Move::Left);
        let alphabet = gen.alphabet;
        for symbol in alphabet {
            let transition = if symbol.as_ref() == carry_write {
                // absorbing bit: flip it and the ripple ends
                Transition {
                    next: return_state,
                    write: Rc::from(done_write),
                    motion: Move::Stay,
                }
            } else if symbol.as_ref() == done_write {
                // propagating bit: flip it and carry into the next one
                Transition {
                    next: after_carry,
                    write: Rc::from(carry_write),
                    motion: Move::Stay,
                }
            } else {
                // BOM: the carry walked off the top, two's-complement wrap
                Transition {
                    next: return_state,
                    write: symbol.clone(),
                    motion: Move::Stay,
                }
            };
            gen.table.add(check_bit, symbol.clone(), transition);
        }
        gen.step_all(after_carry, check_bit, Move::Left);
    }
    gen_system_bypass(gen, entry, exit);
}

pub(super) fn gen_cmp_lt(
    gen: &mut Gen,
    entry: StateId,
    if_true: StateId,
    if_false: StateId,
    rhs: i8,
) {
    gen_cmp(gen, entry, if_true, if_false, rhs, true);
}

pub(super) fn gen_cmp_gt(
    gen: &mut Gen,
    entry: StateId,
    if_true: StateId,
    if_false: StateId,
    rhs: i8,
) {
    gen_cmp(gen, entry, if_true, if_false, rhs, false);
}

/// Signed comparison of `x` against a constant, MSB first. The sign bit is
/// decided by the two's-complement ordering; after it, the first differing
/// bit commits the answer, and equal numbers are false for `<` and `>`
/// alike.
fn gen_cmp(
    gen: &mut Gen,
    entry: StateId,
    if_true: StateId,
    if_false: StateId,
    rhs: i8,
    less: bool,
) {
    let rhs_bits = layout::int8_bits(rhs);
    let rhs_negative = rhs < 0;
    let users = layout::user_symbols(gen.alphabet);
    let mut span = Span::reserve(entry, cmp_states(gen.alphabet));
    for original in &users {
        let after_marker = span.take();
        gen.table.add(
            entry,
            original.clone(),
            Transition {
                next: after_marker,
                write: Rc::from(layout::SYM_MARKER),
                motion: Move::Stay,
            },
        );
        let return_true = span.take();
        let return_false = span.take();
        gen_return_to_marker(gen, &mut span, return_true, if_true, original);
        gen_return_to_marker(gen, &mut span, return_false, if_false, original);
        let after_bom = span.take();
        gen_seek(gen, after_marker, after_bom, layout::SYM_BOM);
        let on_msb = span.take();
        gen.step_all(after_bom, on_msb, Move::Right);
        let compare_rest = span.take();
        let alphabet = gen.alphabet;
        for symbol in alphabet {
            let transition = match symbol.as_ref() {
                layout::SYM_BIT0 => {
                    if rhs_negative {
                        // x >= 0, rhs < 0: decided by sign alone
                        Transition {
                            next: if less { return_false } else { return_true },
                            write: symbol.clone(),
                            motion: Move::Stay,
                        }
                    } else {
                        Transition {
                            next: compare_rest,
                            write: symbol.clone(),
                            motion: Move::Right,
                        }
                    }
                }
                layout::SYM_BIT1 => {
                    if rhs_negative {
                        Transition {
                            next: compare_rest,
                            write: symbol.clone(),
                            motion: Move::Right,
                        }
                    } else {
                        // x < 0, rhs >= 0
                        Transition {
                            next: if less { return_true } else { return_false },
                            write: symbol.clone(),
                            motion: Move::Stay,
                        }
                    }
                }
                _ => Transition {
                    next: return_false,
                    write: symbol.clone(),
                    motion: Move::Stay,
                },
            };
            gen.table.add(on_msb, symbol.clone(), transition);
        }
        let mut current = compare_rest;
        for index in 1..layout::MEM_BITS {
            let next_compare = if index + 1 < layout::MEM_BITS {
                Some(span.take())
            } else {
                None
            };
            let rhs_bit_one = rhs_bits[index] == layout::SYM_BIT1;
            let alphabet = gen.alphabet;
            for symbol in alphabet {
                let transition = match symbol.as_ref() {
                    layout::SYM_BIT0 | layout::SYM_BIT1 => {
                        let x_bit_one = symbol.as_ref() == layout::SYM_BIT1;
                        if x_bit_one == rhs_bit_one {
                            match next_compare {
                                Some(next) => Transition {
                                    next,
                                    write: symbol.clone(),
                                    motion: Move::Right,
                                },
                                // every bit equal: false for both operators
                                None => Transition {
                                    next: return_false,
                                    write: symbol.clone(),
                                    motion: Move::Stay,
                                },
                            }
                        } else {
                            // first differing bit commits the answer
                            let lt_here = !x_bit_one;
                            Transition {
                                next: if lt_here == less {
                                    return_true
                                } else {
                                    return_false
                                },
                                write: symbol.clone(),
                                motion: Move::Stay,
                            }
                        }
                    }
                    _ => Transition {
                        next: return_false,
                        write: symbol.clone(),
                        motion: Move::Stay,
                    },
                };
                gen.table.add(current, symbol.clone(), transition);
            }
            if let Some(next) = next_compare {
                current = next;
            }
        }
    }
    // a system symbol under the head cannot be compared; dispatch to false
    let alphabet = gen.alphabet;
    for symbol in alphabet {
        if layout::is_system_symbol(symbol) {
            gen.table.add(
                entry,
                symbol.clone(),
                Transition {
                    next: if_false,
                    write: symbol.clone(),
                    motion: Move::Stay,
                },
            );
        }
    }
}
