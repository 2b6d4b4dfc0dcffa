//! Front end for the Liam compiler.
//!
//! Turns source text into the flat AST consumed by `liam_types`:
//!
//! ```text
//! &str ──lex()──▶ TokenList ──parse()──▶ ParseOutput { module, arena }
//! ```
//!
//! Both phases stop at the first error.

mod lexer;
mod parser;

pub use lexer::{lex, LexError};
pub use parser::{parse, ParseError, ParseOutput};
