use liam_ir::{Name, StringInterner};
use liam_types::FnIdx;
use pretty_assertions::assert_eq;

use crate::error::SlotPos;
use crate::{Bytecode, FnEntry, InstrIdx, Instruction, Opcode, Slot, VerifyError};

fn at(raw: u32) -> InstrIdx {
    InstrIdx::from_raw(raw)
}

fn ins(opcode: Opcode, high: Slot, low: Slot) -> Instruction {
    Instruction::new(opcode, high, low)
}

fn fn_start(name: Name, idx: u32) -> Instruction {
    ins(Opcode::FnStart, Slot::Name(name), Slot::Fn(FnIdx::from_raw(idx)))
}

fn fn_end() -> Instruction {
    Instruction::reserved(Opcode::FnEnd)
}

/// One function `f` wrapping `body`, with a matching function table.
fn single_fn(name: Name, body: Vec<Instruction>) -> Bytecode {
    let mut code = vec![fn_start(name, 0)];
    code.extend(body);
    code.push(fn_end());
    let end = at(u32::try_from(code.len() - 1).unwrap_or(0));
    Bytecode::new(
        code,
        vec![FnEntry {
            name,
            start: at(0),
            end,
        }],
    )
}

fn name() -> Name {
    StringInterner::new().intern("f")
}

#[test]
fn well_formed_if() {
    let code = single_fn(
        name(),
        vec![
            ins(Opcode::IfStart, Slot::Instr(at(2)), Slot::Instr(at(3))),
            ins(Opcode::LoadBool, Slot::Value(1), Slot::Unused),
            ins(Opcode::IfEnd, Slot::Instr(at(1)), Slot::Unused),
        ],
    );
    assert_eq!(code.verify(), Ok(()));
}

#[test]
fn unpatched_return() {
    let code = single_fn(name(), vec![Instruction::reserved(Opcode::Return)]);
    assert_eq!(
        code.verify(),
        Err(VerifyError::UnpatchedSlot {
            at: at(1),
            opcode: Opcode::Return,
            pos: SlotPos::High,
        })
    );
}

#[test]
fn wrong_operand_kind() {
    let code = single_fn(
        name(),
        vec![ins(Opcode::LoadInt, Slot::Instr(at(0)), Slot::Unused)],
    );
    assert!(matches!(code.verify(), Err(VerifyError::BadOperand { .. })));
}

#[test]
fn dangling_instruction_reference() {
    let code = single_fn(
        name(),
        vec![ins(Opcode::Return, Slot::Instr(at(40)), Slot::Unused)],
    );
    assert_eq!(
        code.verify(),
        Err(VerifyError::InstrOutOfRange {
            at: at(1),
            target: at(40),
        })
    );
}

#[test]
fn return_of_a_marker() {
    let code = single_fn(
        name(),
        vec![ins(Opcode::Return, Slot::Instr(at(0)), Slot::Unused)],
    );
    assert!(matches!(
        code.verify(),
        Err(VerifyError::NotAValue {
            found: Opcode::FnStart,
            ..
        })
    ));
}

#[test]
fn call_of_unknown_function() {
    let code = single_fn(
        name(),
        vec![ins(Opcode::Call, Slot::Fn(FnIdx::from_raw(3)), Slot::Unused)],
    );
    assert_eq!(
        code.verify(),
        Err(VerifyError::UnknownFunction { at: at(1), index: 3 })
    );
}

#[test]
fn if_end_pointing_elsewhere() {
    let code = single_fn(
        name(),
        vec![
            ins(Opcode::IfStart, Slot::Instr(at(2)), Slot::Instr(at(3))),
            ins(Opcode::LoadBool, Slot::Value(1), Slot::Unused),
            ins(Opcode::IfEnd, Slot::Instr(at(2)), Slot::Unused),
        ],
    );
    assert_eq!(code.verify(), Err(VerifyError::BrokenIfLink { at: at(1) }));
}

/// A table entry for `f`, so `fn_start` operands pass.
fn entry(name: Name) -> Vec<FnEntry> {
    vec![FnEntry {
        name,
        start: at(0),
        end: at(0),
    }]
}

#[test]
fn if_start_not_linked_to_if_end() {
    let f = name();
    let code = Bytecode::new(
        vec![
            fn_start(f, 0),
            ins(Opcode::IfStart, Slot::Instr(at(2)), Slot::Instr(at(1))),
            ins(Opcode::LoadBool, Slot::Value(1), Slot::Unused),
        ],
        entry(f),
    );
    assert_eq!(code.verify(), Err(VerifyError::BrokenIfLink { at: at(1) }));
}

#[test]
fn unclosed_function() {
    let f = name();
    let code = Bytecode::new(
        vec![fn_start(f, 0), ins(Opcode::LoadInt, Slot::Value(1), Slot::Unused)],
        entry(f),
    );
    assert_eq!(code.verify(), Err(VerifyError::UnclosedMarker { at: at(0) }));
}

#[test]
fn stray_fn_end() {
    let code = Bytecode::new(vec![fn_end()], vec![]);
    assert_eq!(
        code.verify(),
        Err(VerifyError::UnbalancedMarker {
            at: at(0),
            opcode: Opcode::FnEnd,
        })
    );
}

#[test]
fn instruction_outside_function() {
    let code = Bytecode::new(vec![ins(Opcode::LoadInt, Slot::Value(1), Slot::Unused)], vec![]);
    assert!(matches!(
        code.verify(),
        Err(VerifyError::OutsideFunction { .. })
    ));
}

#[test]
fn nested_function_block() {
    let f = name();
    let code = Bytecode::new(vec![fn_start(f, 0), fn_start(f, 0)], entry(f));
    assert_eq!(code.verify(), Err(VerifyError::UnclosedMarker { at: at(0) }));
}

#[test]
fn function_table_must_match_blocks() {
    let f = name();
    let code = Bytecode::new(vec![fn_start(f, 0), fn_end()], vec![]);
    assert!(matches!(
        code.verify(),
        Err(VerifyError::UnknownFunction { .. })
    ));

    let code = Bytecode::new(
        vec![fn_start(f, 0), fn_end()],
        vec![FnEntry {
            name: f,
            start: at(0),
            end: at(0),
        }],
    );
    assert_eq!(
        code.verify(),
        Err(VerifyError::FunctionTableMismatch { index: 0 })
    );
}

#[test]
fn empty_stream_is_valid() {
    assert_eq!(Bytecode::default().verify(), Ok(()));
}
