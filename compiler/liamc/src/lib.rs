//! Liam compiler driver.
//!
//! Runs the phases in order and reports the first error:
//!
//! ```text
//! source ─lex─▶ tokens ─parse─▶ AST ─check─▶ TypedModule ─build─▶ Bytecode ─verify?─▶
//! ```
//!
//! [`dump_ast`] stops after parsing, or after checking, and renders the tree.

mod tracing_setup;

use liam_bytecode::{BuildError, Bytecode, VerifyError};
use liam_ir::{ExprArena, Module, Span, StringInterner, TokenList};
use liam_parse::{LexError, ParseError};
use liam_types::{TypeCheckError, TypedModule};

pub use tracing_setup::init_tracing;

/// Driver configuration.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileOptions {
    /// Re-check the structural invariants of the emitted bytecode.
    pub verify: bool,
}

/// The first error from any phase.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("type error: {0}")]
    Type(#[from] TypeCheckError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("verify error: {0}")]
    Verify(#[from] VerifyError),
}

impl CompileError {
    /// Source location of the error, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(err) => err.span(),
            CompileError::Parse(err) => Some(err.span()),
            CompileError::Type(err) => Some(err.span()),
            CompileError::Build(err) => Some(err.span()),
            CompileError::Verify(_) => None,
        }
    }

    /// Render as `line:col: message` when the error has a location.
    pub fn render(&self, source: &str) -> String {
        match self.span() {
            Some(span) => format!("{}: {self}", span.line_col(source)),
            None => self.to_string(),
        }
    }
}

/// A parsed source unit.
pub struct Parsed {
    pub interner: StringInterner,
    pub module: Module,
    pub arena: ExprArena,
}

/// A parsed and type-checked source unit.
pub struct Checked {
    pub interner: StringInterner,
    pub module: Module,
    pub arena: ExprArena,
    pub typed: TypedModule,
}

/// A fully compiled source unit.
pub struct Compilation {
    pub checked: Checked,
    pub bytecode: Bytecode,
}

/// Lex a source unit.
pub fn lex(source: &str) -> Result<TokenList, CompileError> {
    Ok(liam_parse::lex(source)?)
}

/// Lex and parse a source unit.
pub fn parse(source: &str) -> Result<Parsed, CompileError> {
    let interner = StringInterner::new();
    let tokens = liam_parse::lex(source)?;
    let output = liam_parse::parse(&tokens, source, &interner)?;
    Ok(Parsed {
        interner,
        module: output.module,
        arena: output.arena,
    })
}

/// Lex, parse and type check a source unit.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check(source: &str) -> Result<Checked, CompileError> {
    let Parsed {
        interner,
        module,
        arena,
    } = parse(source)?;
    let typed = liam_types::check_module(&module, &arena, &interner)?;
    tracing::debug!(names = interner.len(), "interned");
    Ok(Checked {
        interner,
        module,
        arena,
        typed,
    })
}

/// Render the AST of a source unit as an indented tree.
///
/// With `with_types`, the source must also type check, and every node the
/// checker resolved is annotated with its type.
pub fn dump_ast(source: &str, with_types: bool) -> Result<String, CompileError> {
    if with_types {
        let checked = check(source)?;
        return Ok(liam_types::dump_module(
            &checked.module,
            &checked.arena,
            &checked.interner,
            Some(&checked.typed),
        ));
    }
    let parsed = parse(source)?;
    Ok(liam_types::dump_module(
        &parsed.module,
        &parsed.arena,
        &parsed.interner,
        None,
    ))
}

/// Run the whole pipeline on a source unit.
#[tracing::instrument(level = "debug", skip_all, fields(verify = options.verify))]
pub fn compile(source: &str, options: &CompileOptions) -> Result<Compilation, CompileError> {
    let checked = check(source)?;
    let bytecode = liam_bytecode::build(&checked.typed, &checked.arena, &checked.interner)?;
    if options.verify {
        bytecode.verify()?;
    }
    Ok(Compilation { checked, bytecode })
}
