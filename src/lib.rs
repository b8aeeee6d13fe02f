//! # Turing Machine Language
//!
//! A tiny imperative language compiled into a deterministic single-tape
//! Turing-machine transition table, and the machine that runs it one step at
//! a time.
//!
//! ```text
//! Set_alphabet "a b 1";
//! Setup        "a a a";
//! proc main() {
//!     while (read != "blank") { move_right; }
//!     x = 0;
//!     while (x < 3) { x++; write "1"; move_right; }
//! }
//! ```
//!
//! Compilation is a pure function from source text to a [`mach::CompileResult`]:
//! a transition table, the alphabet, the initial tape, and a list of
//! diagnostics. Execution is a [`mach::TuringMachine`] borrowing the table
//! read-only and stepping over its own tape.
//!
//! This is the manual. The language itself is documented in the chapters
//! below; the modules document the machinery.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

pub mod lang;
pub mod mach;
pub mod term;
