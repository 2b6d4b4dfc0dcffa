//! Type checking errors.
//!
//! Checking stops at the first error. Names and types are rendered to text
//! when the error is built so that it can be reported without the interner.

use liam_ir::Span;

/// A type checking failure.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TypeCheckError {
    #[error("undeclared type `{name}`")]
    UndeclaredType { name: String, span: Span },

    #[error("local `{name}` is already declared in this function")]
    DuplicateLocal { name: String, span: Span },

    #[error("identifier `{name}` not found")]
    UnknownIdentifier { name: String, span: Span },

    #[error("mismatched types in {context}: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        context: &'static str,
        expected: String,
        found: String,
        span: Span,
    },

    #[error("can only call fn types, found `{found}`")]
    NotCallable { found: String, span: Span },

    #[error("condition must be a bool, found `{found}`")]
    NonBooleanCondition { found: String, span: Span },

    #[error("`{name}` is already declared")]
    DuplicateItem { name: String, span: Span },

    #[error("{construct} is not supported here")]
    UnsupportedConstruct {
        construct: &'static str,
        span: Span,
    },
}

impl TypeCheckError {
    pub fn span(&self) -> Span {
        match self {
            TypeCheckError::UndeclaredType { span, .. }
            | TypeCheckError::DuplicateLocal { span, .. }
            | TypeCheckError::UnknownIdentifier { span, .. }
            | TypeCheckError::TypeMismatch { span, .. }
            | TypeCheckError::NotCallable { span, .. }
            | TypeCheckError::NonBooleanCondition { span, .. }
            | TypeCheckError::DuplicateItem { span, .. }
            | TypeCheckError::UnsupportedConstruct { span, .. } => *span,
        }
    }

    /// Whether this error marks a language feature the checker does not
    /// handle yet, as opposed to a genuine error in the program.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TypeCheckError::UnsupportedConstruct { .. })
    }
}
