//! IR builder and verifier errors.

use liam_ir::{BinaryOp, ExprId, Span};

use crate::{InstrIdx, Opcode};

/// IR building failure. The first one aborts the build.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("operator `{op}` has no instruction yet")]
    UnsupportedOperator { op: BinaryOp, span: Span },

    #[error("{construct} cannot be lowered yet")]
    UnsupportedConstruct {
        construct: &'static str,
        span: Span,
    },

    /// The typed module has no usable type for an expression the builder
    /// depends on. Only happens if the module did not come from the checker.
    #[error("expression {expr:?} has no usable type")]
    UntypedExpression { expr: ExprId, span: Span },

    /// The function's symbol table has no entry for a local.
    #[error("local `{name}` was not resolved")]
    UnresolvedLocal { name: String, span: Span },
}

impl BuildError {
    pub fn span(&self) -> Span {
        match self {
            BuildError::UnsupportedOperator { span, .. }
            | BuildError::UnsupportedConstruct { span, .. }
            | BuildError::UntypedExpression { span, .. }
            | BuildError::UnresolvedLocal { span, .. } => *span,
        }
    }

    /// Whether this error marks a feature the builder does not lower yet.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            BuildError::UnsupportedOperator { .. } | BuildError::UnsupportedConstruct { .. }
        )
    }
}

/// Which operand slot of an instruction.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SlotPos {
    High,
    Low,
}

impl std::fmt::Display for SlotPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SlotPos::High => "high",
            SlotPos::Low => "low",
        })
    }
}

/// Structural defect found by [`Bytecode::verify`](crate::Bytecode::verify).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum VerifyError {
    #[error("{at}: {pos} slot of `{opcode}` is unpatched")]
    UnpatchedSlot {
        at: InstrIdx,
        opcode: Opcode,
        pos: SlotPos,
    },

    #[error("{at}: {pos} slot of `{opcode}` has the wrong operand kind")]
    BadOperand {
        at: InstrIdx,
        opcode: Opcode,
        pos: SlotPos,
    },

    #[error("{at}: instruction reference {target} is out of range")]
    InstrOutOfRange { at: InstrIdx, target: InstrIdx },

    #[error("{at}: `{opcode}` must refer to a value, found `{found}` at {target}")]
    NotAValue {
        at: InstrIdx,
        opcode: Opcode,
        target: InstrIdx,
        found: Opcode,
    },

    #[error("{at}: function index {index} is not in the function table")]
    UnknownFunction { at: InstrIdx, index: u32 },

    #[error("{at}: `{opcode}` outside of a function body")]
    OutsideFunction { at: InstrIdx, opcode: Opcode },

    #[error("{at}: `{opcode}` does not close a matching marker")]
    UnbalancedMarker { at: InstrIdx, opcode: Opcode },

    #[error("{at}: if_start and if_end do not refer to each other")]
    BrokenIfLink { at: InstrIdx },

    #[error("marker opened at {at} is never closed")]
    UnclosedMarker { at: InstrIdx },

    #[error("function table entry {index} does not match the instruction stream")]
    FunctionTableMismatch { index: u32 },
}
