//! Structural verification of an instruction stream.
//!
//! Re-checks, without any type information, the invariants a backend
//! relies on:
//! - every slot holds the operand kind its opcode expects, and no reserved
//!   slot was left unpatched
//! - instruction references are in range and point at value-producing
//!   instructions
//! - function references are in the function table
//! - `fn_start`/`fn_end` and `if_start`/`if_end` nest properly, and every
//!   `if_start` and its `if_end` refer to each other
//! - the function table matches the blocks in the stream

use liam_types::FnIdx;

use crate::error::SlotPos;
use crate::{Bytecode, InstrIdx, Instruction, Opcode, Slot, VerifyError};

/// Operand kind expected in a slot.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Expect {
    Unused,
    Value,
    Instr,
    Fn,
    Local,
    Name,
}

/// Expected `(high, low)` operand kinds for each opcode.
fn layout(opcode: Opcode) -> (Expect, Expect) {
    match opcode {
        Opcode::LoadInt | Opcode::LoadBool => (Expect::Value, Expect::Unused),
        Opcode::LoadLocal => (Expect::Local, Expect::Unused),
        Opcode::LoadFn | Opcode::Call => (Expect::Fn, Expect::Unused),
        Opcode::Add | Opcode::IfStart => (Expect::Instr, Expect::Instr),
        Opcode::StoreLocal => (Expect::Local, Expect::Instr),
        Opcode::FnStart => (Expect::Name, Expect::Fn),
        Opcode::FnEnd => (Expect::Unused, Expect::Unused),
        Opcode::Return | Opcode::IfEnd => (Expect::Instr, Expect::Unused),
    }
}

fn matches_expect(slot: Slot, expect: Expect) -> bool {
    matches!(
        (slot, expect),
        (Slot::Unused, Expect::Unused)
            | (Slot::Value(_), Expect::Value)
            | (Slot::Instr(_), Expect::Instr)
            | (Slot::Fn(_), Expect::Fn)
            | (Slot::Local(_), Expect::Local)
            | (Slot::Name(_), Expect::Name)
    )
}

impl Bytecode {
    /// Check the structural invariants of this stream.
    #[tracing::instrument(level = "debug", skip_all, fields(instructions = self.len()))]
    pub fn verify(&self) -> Result<(), VerifyError> {
        let mut open: Vec<(Opcode, InstrIdx)> = Vec::new();
        let mut blocks: Vec<(InstrIdx, InstrIdx)> = Vec::new();

        for (at, ins) in self.iter() {
            self.verify_operands(at, ins)?;

            match ins.opcode {
                Opcode::FnStart => {
                    if let Some(&(_, outer)) = open.last() {
                        return Err(VerifyError::UnclosedMarker { at: outer });
                    }
                    open.push((Opcode::FnStart, at));
                }
                Opcode::FnEnd => match open.pop() {
                    Some((Opcode::FnStart, start)) => blocks.push((start, at)),
                    _ => {
                        return Err(VerifyError::UnbalancedMarker {
                            at,
                            opcode: ins.opcode,
                        })
                    }
                },
                Opcode::IfStart => {
                    if open.is_empty() {
                        return Err(VerifyError::OutsideFunction {
                            at,
                            opcode: ins.opcode,
                        });
                    }
                    self.verify_if_link(at, ins)?;
                    open.push((Opcode::IfStart, at));
                }
                Opcode::IfEnd => match open.pop() {
                    Some((Opcode::IfStart, start)) if ins.high == Slot::Instr(start) => {}
                    Some((Opcode::IfStart, _)) => return Err(VerifyError::BrokenIfLink { at }),
                    _ => {
                        return Err(VerifyError::UnbalancedMarker {
                            at,
                            opcode: ins.opcode,
                        })
                    }
                },
                opcode => {
                    if open.is_empty() {
                        return Err(VerifyError::OutsideFunction { at, opcode });
                    }
                }
            }
        }

        if let Some(&(_, at)) = open.last() {
            return Err(VerifyError::UnclosedMarker { at });
        }
        self.verify_function_table(&blocks)?;

        tracing::debug!(functions = blocks.len(), "bytecode verified");
        Ok(())
    }

    fn verify_operands(&self, at: InstrIdx, ins: &Instruction) -> Result<(), VerifyError> {
        let (high, low) = layout(ins.opcode);
        for (pos, slot, expect) in [(SlotPos::High, ins.high, high), (SlotPos::Low, ins.low, low)] {
            if !matches_expect(slot, expect) {
                return Err(if slot.is_unused() {
                    VerifyError::UnpatchedSlot {
                        at,
                        opcode: ins.opcode,
                        pos,
                    }
                } else {
                    VerifyError::BadOperand {
                        at,
                        opcode: ins.opcode,
                        pos,
                    }
                });
            }

            match slot {
                Slot::Instr(target) => {
                    let Some(found) = self.get(target) else {
                        return Err(VerifyError::InstrOutOfRange { at, target });
                    };
                    // Markers link to markers; everything else consumes values.
                    let links_marker = matches!(
                        (ins.opcode, pos),
                        (Opcode::IfStart, SlotPos::Low) | (Opcode::IfEnd, SlotPos::High)
                    );
                    if !links_marker && !found.opcode.produces_value() {
                        return Err(VerifyError::NotAValue {
                            at,
                            opcode: ins.opcode,
                            target,
                            found: found.opcode,
                        });
                    }
                }
                Slot::Fn(idx) if idx.index() >= self.functions().len() => {
                    return Err(VerifyError::UnknownFunction {
                        at,
                        index: idx.raw(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// An `if_start` must name an `if_end` that names it back.
    fn verify_if_link(&self, at: InstrIdx, ins: &Instruction) -> Result<(), VerifyError> {
        let linked = ins
            .low
            .as_instr()
            .and_then(|end| self.get(end))
            .is_some_and(|end| end.opcode == Opcode::IfEnd && end.high == Slot::Instr(at));
        if linked {
            Ok(())
        } else {
            Err(VerifyError::BrokenIfLink { at })
        }
    }

    fn verify_function_table(&self, blocks: &[(InstrIdx, InstrIdx)]) -> Result<(), VerifyError> {
        if blocks.len() != self.functions().len() {
            let index = u32::try_from(blocks.len().min(self.functions().len())).unwrap_or(u32::MAX);
            return Err(VerifyError::FunctionTableMismatch { index });
        }
        for (i, (entry, &(start, end))) in self.functions().iter().zip(blocks).enumerate() {
            let index = u32::try_from(i).unwrap_or(u32::MAX);
            let idx = FnIdx::from_raw(index);
            let marker_ok = self.function_block(idx).is_some_and(|block| {
                block.first().is_some_and(|first| {
                    first.high == Slot::Name(entry.name) && first.low == Slot::Fn(idx)
                }) && block.last().is_some_and(|last| last.opcode == Opcode::FnEnd)
            });
            if entry.start != start || entry.end != end || !marker_ok {
                return Err(VerifyError::FunctionTableMismatch { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
