//! End-to-end tests: source text through every phase.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use liam_bytecode::{BuildError, InstrIdx, Opcode, Slot};
use liam_types::{FnIdx, Type, TypeCheckError};
use liamc::{check, compile, dump_ast, CompileError, CompileOptions, Compilation};
use pretty_assertions::assert_eq;

const VERIFY: CompileOptions = CompileOptions { verify: true };

fn compile_ok(source: &str) -> Compilation {
    match compile(source, &VERIFY) {
        Ok(compiled) => compiled,
        Err(err) => panic!("expected success, got {}", err.render(source)),
    }
}

fn type_error(source: &str) -> TypeCheckError {
    match compile(source, &VERIFY) {
        Err(CompileError::Type(err)) => err,
        Err(other) => panic!("expected a type error, got {other}"),
        Ok(_) => panic!("expected a type error, compiled fine"),
    }
}

/// Follow a value slot to the instruction that produces it.
fn operand(compiled: &Compilation, slot: Slot) -> (Opcode, Slot, Slot) {
    let target = slot.as_instr().expect("instruction operand");
    let ins = compiled.bytecode.get(target).expect("in range");
    (ins.opcode, ins.high, ins.low)
}

#[test]
fn add_and_main_end_to_end() {
    let compiled = compile_ok(
        "
        fn add() int { return 1 + 2; }
        fn main() bool { return true; }
        ",
    );
    let code = &compiled.bytecode;
    let names: Vec<&str> = code
        .functions()
        .iter()
        .map(|f| compiled.checked.interner.lookup(f.name))
        .collect();
    assert_eq!(names, vec!["add", "main"]);

    // add: return -> binary_add(1, 2)
    let add = code.function_block(FnIdx::from_raw(0)).unwrap();
    let ret = add.iter().find(|i| i.opcode == Opcode::Return).unwrap();
    let (opcode, lhs, rhs) = operand(&compiled, ret.high);
    assert_eq!(opcode, Opcode::Add);
    assert_eq!(operand(&compiled, lhs), (Opcode::LoadInt, Slot::Value(1), Slot::Unused));
    assert_eq!(operand(&compiled, rhs), (Opcode::LoadInt, Slot::Value(2), Slot::Unused));

    // main: return -> bool_lit(true)
    let main = code.function_block(FnIdx::from_raw(1)).unwrap();
    let ret = main.iter().find(|i| i.opcode == Opcode::Return).unwrap();
    assert_eq!(operand(&compiled, ret.high), (Opcode::LoadBool, Slot::Value(1), Slot::Unused));
}

#[test]
fn forward_reference_checks_and_builds() {
    let compiled = compile_ok(
        "
        fn main() int { return later(); }
        fn later() int { return 5; }
        ",
    );
    assert_eq!(compiled.checked.typed.signatures.len(), 2);
}

#[test]
fn struct_forward_reference() {
    let checked = check(
        "
        fn origin() Point { return origin(); }
        struct Point {}
        ",
    )
    .unwrap();
    let point = checked.interner.intern("Point");
    let sig = checked.typed.signatures.get(FnIdx::from_raw(0)).unwrap();
    assert_eq!(sig.return_type, Type::Struct(point));
}

#[test]
fn duplicate_local_rejected() {
    let err = type_error("fn f() int { let a: int = 1; let a: int = 2; return a; }");
    assert!(matches!(err, TypeCheckError::DuplicateLocal { .. }));
}

#[test]
fn unknown_identifier_rejected() {
    let err = type_error("fn f() int { return nope; }");
    assert!(matches!(err, TypeCheckError::UnknownIdentifier { .. }));
}

#[test]
fn if_condition_type() {
    let err = type_error("fn f() int { if 5 { return 1; } return 2; }");
    assert!(matches!(err, TypeCheckError::NonBooleanCondition { .. }));
    compile_ok("fn f() int { if true { return 1; } return 2; }");
}

#[test]
fn binary_operand_types() {
    let err = type_error("fn f() int { return true + 1; }");
    assert!(matches!(err, TypeCheckError::TypeMismatch { .. }));
    compile_ok("fn f() int { return 1 + 2; }");
}

#[test]
fn call_well_formedness() {
    let err = type_error("fn f() int { return 5(); }");
    assert!(matches!(err, TypeCheckError::NotCallable { .. }));

    let checked = check("fn g() bool { return true; } fn f() bool { return g(); }").unwrap();
    assert_eq!(checked.typed.signatures.len(), 2);
}

#[test]
fn call_sites_use_assigned_index() {
    let compiled = compile_ok(
        "
        fn a() int { return c(); }
        fn b() int { return a() + c(); }
        fn c() int { return b(); }
        ",
    );
    let typed = &compiled.checked.typed;
    let interner = &compiled.checked.interner;
    let index_of = |name: &str| typed.signatures.lookup(interner.intern(name)).unwrap();

    let calls: Vec<Slot> = compiled
        .bytecode
        .instructions()
        .iter()
        .filter(|i| i.opcode == Opcode::Call)
        .map(|i| i.high)
        .collect();
    assert_eq!(
        calls,
        vec![
            Slot::Fn(index_of("c")),
            Slot::Fn(index_of("a")),
            Slot::Fn(index_of("c")),
            Slot::Fn(index_of("b")),
        ]
    );
    // Each function block starts with its own index.
    for (idx, _) in typed.signatures.iter() {
        let entry = compiled.bytecode.function(idx).unwrap();
        let start = compiled.bytecode.get(entry.start).unwrap();
        assert_eq!(start.low, Slot::Fn(idx));
    }
}

#[test]
fn every_if_is_closed() {
    let compiled = compile_ok(
        "
        fn f() int {
            if true {
                if true { if false { return 1; } }
                { if true { return 2; } }
            }
            if false { return 3; }
            return 4;
        }
        ",
    );
    let code = &compiled.bytecode;
    let mut starts = 0;
    for (idx, ins) in code.iter() {
        if ins.opcode != Opcode::IfStart {
            continue;
        }
        starts += 1;
        let end: InstrIdx = ins.low.as_instr().unwrap();
        let end_ins = code.get(end).unwrap();
        assert_eq!(end_ins.opcode, Opcode::IfEnd);
        assert_eq!(end_ins.high, Slot::Instr(idx));
    }
    assert_eq!(starts, 5);
}

#[test]
fn identical_input_identical_output() {
    let source = "
        struct S {}
        fn s() S { return s(); }
        fn f() int { let x: int = 1; if true { return x + f(); } return 0; }
    ";
    let first = compile_ok(source);
    let second = compile_ok(source);
    assert_eq!(first.bytecode, second.bytecode);
}

#[test]
fn unsupported_operator_is_a_build_error() {
    let err = compile("fn f() int { return 3 - 1; }", &VERIFY).err().unwrap();
    assert!(matches!(
        err,
        CompileError::Build(ref build) if build.is_unsupported()
    ));
    assert!(matches!(err, CompileError::Build(BuildError::UnsupportedOperator { .. })));
}

#[test]
fn lex_and_parse_errors_surface_first() {
    assert!(matches!(
        compile("fn f() int { return 1 % 2; }", &VERIFY),
        Err(CompileError::Lex(_))
    ));
    assert!(matches!(
        compile("fn f() int { return 1 }", &VERIFY),
        Err(CompileError::Parse(_))
    ));
}

#[test]
fn errors_render_with_line_and_column() {
    let source = "fn f() int {\n    return missing;\n}\n";
    let err = compile(source, &VERIFY).err().unwrap();
    assert_eq!(
        err.render(source),
        "2:12: type error: identifier `missing` not found"
    );
}

#[test]
fn verification_is_optional() {
    let source = "fn f() int { return 1; }";
    let plain = compile(source, &CompileOptions::default()).unwrap();
    let verified = compile_ok(source);
    assert_eq!(plain.bytecode, verified.bytecode);
}

#[test]
fn deeply_nested_groups_compile() {
    const DEPTH: usize = 100_000;
    let source = format!(
        "fn f() int {{ return {}1{}; }}",
        "(".repeat(DEPTH),
        ")".repeat(DEPTH)
    );
    let compiled = compile_ok(&source);
    // Groups lower to their inner value.
    let block = compiled.bytecode.function_block(FnIdx::from_raw(0)).unwrap();
    let ret = block.iter().find(|i| i.opcode == Opcode::Return).unwrap();
    assert_eq!(operand(&compiled, ret.high), (Opcode::LoadInt, Slot::Value(1), Slot::Unused));
    assert_eq!(compiled.bytecode.len(), 4);
}

#[test]
fn deeply_nested_ifs_compile() {
    const DEPTH: usize = 20_000;
    let source = format!(
        "fn f() int {{ {} return 1; {} return 0; }}",
        "if true { ".repeat(DEPTH),
        "} ".repeat(DEPTH)
    );
    let compiled = compile_ok(&source);
    let count = |opcode: Opcode| {
        compiled
            .bytecode
            .instructions()
            .iter()
            .filter(|i| i.opcode == opcode)
            .count()
    };
    assert_eq!(count(Opcode::IfStart), DEPTH);
    assert_eq!(count(Opcode::IfEnd), DEPTH);
}

#[test]
fn long_addition_chain_compiles() {
    const TERMS: usize = 50_000;
    let source = format!("fn f() int {{ return 1{}; }}", " + 1".repeat(TERMS - 1));
    let compiled = compile_ok(&source);
    let adds = compiled
        .bytecode
        .instructions()
        .iter()
        .filter(|i| i.opcode == Opcode::Add)
        .count();
    assert_eq!(adds, TERMS - 1);
}

#[test]
fn ast_dump_with_and_without_types() {
    let source = "fn f() int { return 1 + 2; }";
    assert_eq!(
        dump_ast(source, false).unwrap(),
        "\
<fn> f
  | return type
    - <type> int
  | body
    - <return>
      - <binary> +
        - <int> 1
        - <int> 2
"
    );
    let typed = dump_ast(source, true).unwrap();
    assert!(typed.starts_with("<fn> f : fn f() int\n"));
    assert!(typed.contains("      - <binary> + : int\n"));
}

#[test]
fn ast_dump_without_types_skips_checking() {
    let source = "fn f() int { return nope; }";
    assert!(dump_ast(source, false).is_ok());
    assert!(matches!(dump_ast(source, true), Err(CompileError::Type(_))));
}
