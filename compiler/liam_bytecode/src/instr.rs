//! Instruction model: an opcode plus two operand slots.

use std::fmt;

use liam_ir::{Name, StringInterner};
use liam_types::FnIdx;

/// Instruction opcodes.
///
/// Value-producing instructions come first, then statements and markers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    // Values
    LoadInt,
    LoadBool,
    LoadLocal,
    LoadFn,
    Add,
    Call,

    // Statements and markers
    StoreLocal,
    FnStart,
    FnEnd,
    Return,
    IfStart,
    IfEnd,
}

impl Opcode {
    /// Mnemonic used in listings.
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::LoadInt => "number_lit",
            Opcode::LoadBool => "bool_lit",
            Opcode::LoadLocal => "load_local",
            Opcode::LoadFn => "load_fn",
            Opcode::Add => "binary_add",
            Opcode::Call => "call",
            Opcode::StoreLocal => "store_local",
            Opcode::FnStart => "fn_start",
            Opcode::FnEnd => "fn_end",
            Opcode::Return => "return",
            Opcode::IfStart => "if_start",
            Opcode::IfEnd => "if_end",
        }
    }

    /// Whether this instruction produces a value other instructions can
    /// refer to.
    pub const fn produces_value(self) -> bool {
        matches!(
            self,
            Opcode::LoadInt
                | Opcode::LoadBool
                | Opcode::LoadLocal
                | Opcode::LoadFn
                | Opcode::Add
                | Opcode::Call
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of an instruction in the stream.
///
/// Assigned when the instruction is appended and never changes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct InstrIdx(u32);

impl InstrIdx {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for InstrIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for InstrIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// An operand slot.
///
/// Absence is explicit; no payload value is reserved to mean "unused".
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Slot {
    #[default]
    Unused,
    /// Literal operand.
    Value(u64),
    /// Another instruction in the stream.
    Instr(InstrIdx),
    /// A function, by signature-table index.
    Fn(FnIdx),
    /// A local, by its slot within the enclosing function.
    Local(u32),
    /// An interned name.
    Name(Name),
}

impl Slot {
    pub const fn is_unused(self) -> bool {
        matches!(self, Slot::Unused)
    }

    pub const fn as_instr(self) -> Option<InstrIdx> {
        match self {
            Slot::Instr(idx) => Some(idx),
            _ => None,
        }
    }

    pub const fn as_fn(self) -> Option<FnIdx> {
        match self {
            Slot::Fn(idx) => Some(idx),
            _ => None,
        }
    }

    /// Render for listings.
    pub fn render(self, interner: &StringInterner) -> String {
        match self {
            Slot::Unused => "_".to_owned(),
            Slot::Value(value) => value.to_string(),
            Slot::Instr(idx) => idx.to_string(),
            Slot::Fn(idx) => format!("fn{}", idx.raw()),
            Slot::Local(slot) => format!("%{slot}"),
            Slot::Name(name) => interner.lookup(name).to_owned(),
        }
    }
}

/// One fixed-width instruction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub high: Slot,
    pub low: Slot,
}

impl Instruction {
    pub const fn new(opcode: Opcode, high: Slot, low: Slot) -> Self {
        Instruction { opcode, high, low }
    }

    /// An instruction with both slots unused, to be patched later.
    pub const fn reserved(opcode: Opcode) -> Self {
        Instruction {
            opcode,
            high: Slot::Unused,
            low: Slot::Unused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slot_accessors() {
        let at = InstrIdx::from_raw(4);
        assert_eq!(Slot::Instr(at).as_instr(), Some(at));
        assert_eq!(Slot::Value(4).as_instr(), None);
        assert_eq!(Slot::Fn(FnIdx::from_raw(1)).as_fn(), Some(FnIdx::from_raw(1)));
        assert!(Slot::default().is_unused());
    }

    #[test]
    fn slot_rendering() {
        let interner = StringInterner::new();
        let main = interner.intern("main");
        assert_eq!(Slot::Unused.render(&interner), "_");
        assert_eq!(Slot::Value(42).render(&interner), "42");
        assert_eq!(Slot::Instr(InstrIdx::from_raw(3)).render(&interner), "@3");
        assert_eq!(Slot::Fn(FnIdx::from_raw(0)).render(&interner), "fn0");
        assert_eq!(Slot::Local(1).render(&interner), "%1");
        assert_eq!(Slot::Name(main).render(&interner), "main");
    }

    #[test]
    fn reserved_instruction_is_unpatched() {
        let ins = Instruction::reserved(Opcode::Return);
        assert!(ins.high.is_unused() && ins.low.is_unused());
        assert_eq!(Opcode::Add.name(), "binary_add");
        assert!(Opcode::Call.produces_value());
        assert!(!Opcode::IfEnd.produces_value());
    }
}
