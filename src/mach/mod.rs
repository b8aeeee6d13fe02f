/*!
## Machine Module

The compiled form of a program and the machine that executes it: the sparse
tape, the deterministic transition table, the state-count and code-generation
passes that build the table from parsed instructions, and the single-step
interpreter.

*/

/// Identifier of a machine state. Codegen assigns ids from a contiguous
/// range computed by the state-count pass.
pub type StateId = u32;

/// Position on the tape. Negative positions hold the variable zone.
pub type Position = i64;

mod codegen;
pub mod compile;
mod flatten;
pub mod layout;
mod machine;
mod table;
mod tape;
mod var;

pub use codegen::count_states;
pub use codegen::generate;
pub use compile::compile;
pub use compile::CompileResult;
pub use flatten::flatten;
pub use machine::StepResult;
pub use machine::TuringMachine;
pub use table::Move;
pub use table::Transition;
pub use table::TransitionTable;
pub use tape::Tape;
