//! Property-based tests for the compiler pipeline.
//!
//! Generates programs with arbitrarily nested `if`/block statements and
//! checks that:
//! 1. Every `if_start` and its `if_end` refer to each other
//! 2. Every call refers to the block of the function it names
//! 3. Compiling the same text twice gives the same stream

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use std::fmt::Write as _;

use liam_bytecode::{Opcode, Slot};
use liamc::{compile, CompileOptions};
use proptest::prelude::*;

const VERIFY: CompileOptions = CompileOptions { verify: true };

// -- Program Generation --

#[derive(Clone, Debug)]
enum GenStmt {
    Return(u64),
    ReturnSum(u64, u64),
    Let(u64),
    Call,
    If(bool, Vec<GenStmt>),
    Block(Vec<GenStmt>),
}

impl GenStmt {
    fn if_count(&self) -> usize {
        match self {
            GenStmt::If(_, body) => 1 + body.iter().map(GenStmt::if_count).sum::<usize>(),
            GenStmt::Block(body) => body.iter().map(GenStmt::if_count).sum(),
            _ => 0,
        }
    }
}

fn stmt_strategy() -> impl Strategy<Value = GenStmt> {
    let leaf = prop_oneof![
        any::<u32>().prop_map(|n| GenStmt::Return(u64::from(n))),
        (any::<u32>(), any::<u32>())
            .prop_map(|(a, b)| GenStmt::ReturnSum(u64::from(a), u64::from(b))),
        any::<u32>().prop_map(|n| GenStmt::Let(u64::from(n))),
        Just(GenStmt::Call),
    ];
    leaf.prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            (any::<bool>(), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(cond, body)| GenStmt::If(cond, body)),
            prop::collection::vec(inner, 0..4).prop_map(GenStmt::Block),
        ]
    })
}

/// Bodies for one to four functions.
fn program_strategy() -> impl Strategy<Value = Vec<Vec<GenStmt>>> {
    prop::collection::vec(prop::collection::vec(stmt_strategy(), 0..5), 1..5)
}

struct Renderer {
    out: String,
    locals: usize,
    functions: usize,
    current: usize,
}

impl Renderer {
    fn stmt(&mut self, stmt: &GenStmt) {
        match stmt {
            GenStmt::Return(n) => {
                let _ = write!(self.out, "return {n}; ");
            }
            GenStmt::ReturnSum(a, b) => {
                let _ = write!(self.out, "return {a} + {b}; ");
            }
            GenStmt::Let(n) => {
                // Counter keeps every local name unique within the function.
                let _ = write!(self.out, "let v{}: int = {n}; ", self.locals);
                self.locals += 1;
            }
            GenStmt::Call => {
                let callee = (self.current + 1) % self.functions;
                let _ = write!(self.out, "f{callee}(); ");
            }
            GenStmt::If(cond, body) => {
                let _ = write!(self.out, "if {cond} {{ ");
                for inner in body {
                    self.stmt(inner);
                }
                self.out.push_str("} ");
            }
            GenStmt::Block(body) => {
                self.out.push_str("{ ");
                for inner in body {
                    self.stmt(inner);
                }
                self.out.push_str("} ");
            }
        }
    }
}

fn render(program: &[Vec<GenStmt>]) -> String {
    let mut renderer = Renderer {
        out: String::new(),
        locals: 0,
        functions: program.len(),
        current: 0,
    };
    for (i, body) in program.iter().enumerate() {
        renderer.current = i;
        renderer.locals = 0;
        let _ = write!(renderer.out, "fn f{i}() int {{ ");
        for stmt in body {
            renderer.stmt(stmt);
        }
        renderer.out.push_str("return 0; }\n");
    }
    renderer.out
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn if_markers_always_link(program in program_strategy()) {
        let source = render(&program);
        let compiled = compile(&source, &VERIFY).unwrap();
        let code = &compiled.bytecode;

        let expected_ifs: usize = program.iter().flatten().map(GenStmt::if_count).sum();
        let mut starts = 0;
        let mut ends = 0;
        for (idx, ins) in code.iter() {
            match ins.opcode {
                Opcode::IfStart => {
                    starts += 1;
                    let end = ins.low.as_instr().unwrap();
                    let end_ins = code.get(end).unwrap();
                    prop_assert_eq!(end_ins.opcode, Opcode::IfEnd);
                    prop_assert_eq!(end_ins.high, Slot::Instr(idx));
                    prop_assert!(idx < end);
                }
                Opcode::IfEnd => ends += 1,
                _ => {}
            }
        }
        prop_assert_eq!(starts, expected_ifs);
        prop_assert_eq!(ends, expected_ifs);
    }

    #[test]
    fn calls_target_their_blocks(program in program_strategy()) {
        let source = render(&program);
        let compiled = compile(&source, &VERIFY).unwrap();
        let code = &compiled.bytecode;

        prop_assert_eq!(code.functions().len(), program.len());
        for ins in code.instructions().iter().filter(|i| i.opcode == Opcode::Call) {
            let idx = ins.high.as_fn().unwrap();
            let entry = code.function(idx).unwrap();
            prop_assert_eq!(code.get(entry.start).unwrap().low, Slot::Fn(idx));
        }
    }

    #[test]
    fn compilation_is_deterministic(program in program_strategy()) {
        let source = render(&program);
        let first = compile(&source, &VERIFY).unwrap();
        let second = compile(&source, &VERIFY).unwrap();
        prop_assert_eq!(first.bytecode, second.bytecode);
    }
}
