//! The compiled program: one flat instruction stream plus a function table.

use std::fmt::Write as _;

use liam_ir::{Name, StringInterner};
use liam_types::FnIdx;

use crate::{InstrIdx, Instruction};

/// Location of one function's block in the stream.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FnEntry {
    pub name: Name,
    /// The block's `fn_start` marker.
    pub start: InstrIdx,
    /// The block's `fn_end` marker.
    pub end: InstrIdx,
}

/// Instruction stream for a whole module.
///
/// Function blocks appear in signature-table order, so entry `i` of the
/// function table describes the function with `FnIdx(i)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Bytecode {
    instructions: Vec<Instruction>,
    functions: Vec<FnEntry>,
}

impl Bytecode {
    pub fn new(instructions: Vec<Instruction>, functions: Vec<FnEntry>) -> Self {
        Bytecode {
            instructions,
            functions,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, idx: InstrIdx) -> Option<&Instruction> {
        self.instructions.get(idx.index())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn functions(&self) -> &[FnEntry] {
        &self.functions
    }

    pub fn function(&self, idx: FnIdx) -> Option<&FnEntry> {
        self.functions.get(idx.index())
    }

    /// The instructions of one function block, markers included.
    pub fn function_block(&self, idx: FnIdx) -> Option<&[Instruction]> {
        let entry = self.function(idx)?;
        self.instructions
            .get(entry.start.index()..=entry.end.index())
    }

    /// Instructions paired with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (InstrIdx, &Instruction)> + '_ {
        self.instructions
            .iter()
            .enumerate()
            .map(|(i, ins)| (InstrIdx::from_raw(u32::try_from(i).unwrap_or(u32::MAX)), ins))
    }

    /// Human-readable listing:
    ///
    /// ```text
    /// functions:
    ///   fn0 add @0..@5
    /// bytecode:
    ///   @0    fn_start     add  fn0
    ///   @1    return       @2   _
    /// ```
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "functions:");
        for (i, entry) in self.functions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  fn{i} {} {}..{}",
                interner.lookup(entry.name),
                entry.start,
                entry.end
            );
        }
        let _ = writeln!(out, "bytecode:");
        for (idx, ins) in self.iter() {
            let _ = writeln!(
                out,
                "  {:<5} {:<12} {:<4} {}",
                idx.to_string(),
                ins.opcode.name(),
                ins.high.render(interner),
                ins.low.render(interner)
            );
        }
        out
    }
}
