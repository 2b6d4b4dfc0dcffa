//! Bytecode-style IR for the Liam compiler.
//!
//! A whole module lowers to one flat [`Bytecode`] stream of fixed-width
//! [`Instruction`]s (an [`Opcode`] plus two [`Slot`]s). An instruction's
//! position is its permanent address; operands refer to other instructions
//! by [`InstrIdx`] and to functions by their signature-table index.
//!
//! ```text
//! TypedModule ──build()──▶ Bytecode ──verify()──▶ ok
//!                               └────display()──▶ listing
//! ```

mod builder;
mod bytecode;
mod error;
mod instr;
mod verify;

pub use builder::build;
pub use bytecode::{Bytecode, FnEntry};
pub use error::{BuildError, SlotPos, VerifyError};
pub use instr::{InstrIdx, Instruction, Opcode, Slot};

liam_ir::static_assert_size!(InstrIdx, 4);
