//! IR builder: typed module to flat instruction stream.
//!
//! Functions are emitted in signature-table order, each as a block
//! delimited by `fn_start`/`fn_end`. Nested control flow is linearized by
//! reserving an instruction first and patching its slots once the operand
//! is known:
//!
//! ```text
//! @k    if_start   @k+1  @m     ← high: condition, low: matching if_end
//! @k+1  bool_lit   1     _
//! ...              (scope)
//! @m    if_end     @k    _      ← high: matching if_start
//! ```
//!
//! Types are never re-checked here. The builder only reads the recorded
//! types it needs to pick an instruction.

use liam_ir::{BinaryOp, ExprArena, ExprId, ExprKind, StmtId, StmtKind, StringInterner};
use liam_stack::ensure_sufficient_stack;
use liam_types::{FnIdx, SymbolTable, Type, TypedModule};

use crate::{BuildError, Bytecode, FnEntry, InstrIdx, Instruction, Opcode, Slot};

/// Lower a typed module to bytecode.
///
/// Stops at the first construct that has no lowering.
#[tracing::instrument(level = "debug", skip_all, fields(functions = typed.signatures.len()))]
pub fn build(
    typed: &TypedModule,
    arena: &ExprArena,
    interner: &StringInterner,
) -> Result<Bytecode, BuildError> {
    let mut builder = IrBuilder::new(typed, arena, interner);
    for func in &typed.functions {
        builder.build_function(func.idx, func.decl, &func.symbols)?;
    }
    tracing::debug!(
        instructions = builder.code.len(),
        "IR build complete"
    );
    Ok(Bytecode::new(builder.code, builder.functions))
}

struct IrBuilder<'a> {
    typed: &'a TypedModule,
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    code: Vec<Instruction>,
    functions: Vec<FnEntry>,
}

impl<'a> IrBuilder<'a> {
    fn new(typed: &'a TypedModule, arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        IrBuilder {
            typed,
            arena,
            interner,
            code: Vec::new(),
            functions: Vec::with_capacity(typed.functions.len()),
        }
    }

    // === Stream primitives ===

    /// Append an instruction and return its permanent index.
    fn push(&mut self, ins: Instruction) -> InstrIdx {
        let raw = u32::try_from(self.code.len())
            .unwrap_or_else(|_| panic!("instruction stream exceeded u32::MAX entries"));
        let idx = InstrIdx::from_raw(raw);
        tracing::trace!(at = raw, opcode = ins.opcode.name(), "emit");
        self.code.push(ins);
        idx
    }

    /// Append an instruction whose slots are filled in later.
    fn reserve(&mut self, opcode: Opcode) -> InstrIdx {
        self.push(Instruction::reserved(opcode))
    }

    fn patch_high(&mut self, at: InstrIdx, slot: Slot) {
        self.code[at.index()].high = slot;
    }

    fn patch_low(&mut self, at: InstrIdx, slot: Slot) {
        self.code[at.index()].low = slot;
    }

    // === Functions ===

    fn build_function(
        &mut self,
        idx: FnIdx,
        decl: StmtId,
        symbols: &SymbolTable,
    ) -> Result<(), BuildError> {
        let arena = self.arena;
        let stmt = arena.get_stmt(decl);
        let StmtKind::Fn { name, ref body, .. } = stmt.kind else {
            return Err(BuildError::UnsupportedConstruct {
                construct: stmt.kind.describe(),
                span: stmt.span,
            });
        };

        let start = self.push(Instruction::new(
            Opcode::FnStart,
            Slot::Name(name),
            Slot::Fn(idx),
        ));
        for &inner in body {
            self.build_stmt(inner, symbols)?;
        }
        let end = self.push(Instruction::reserved(Opcode::FnEnd));

        tracing::trace!(
            name = self.interner.lookup(name),
            start = start.raw(),
            end = end.raw(),
            "built function"
        );
        self.functions.push(FnEntry { name, start, end });
        Ok(())
    }

    // === Statements ===

    fn build_stmt(&mut self, id: StmtId, symbols: &SymbolTable) -> Result<(), BuildError> {
        ensure_sufficient_stack(|| self.build_stmt_inner(id, symbols))
    }

    fn build_stmt_inner(&mut self, id: StmtId, symbols: &SymbolTable) -> Result<(), BuildError> {
        let arena = self.arena;
        let stmt = arena.get_stmt(id);
        match stmt.kind {
            StmtKind::Expr(expr) => {
                self.build_expr(expr, symbols)?;
            }
            StmtKind::Scope(ref stmts) => {
                for &inner in stmts {
                    self.build_stmt(inner, symbols)?;
                }
            }
            StmtKind::Return(expr) => {
                let ret = self.reserve(Opcode::Return);
                let value = self.build_expr(expr, symbols)?;
                self.patch_high(ret, Slot::Instr(value));
            }
            StmtKind::If {
                cond,
                scope: ref stmts,
            } => {
                let if_start = self.reserve(Opcode::IfStart);
                let cond_value = self.build_expr(cond, symbols)?;
                self.patch_high(if_start, Slot::Instr(cond_value));
                for &inner in stmts {
                    self.build_stmt(inner, symbols)?;
                }
                let if_end = self.reserve(Opcode::IfEnd);
                self.patch_low(if_start, Slot::Instr(if_end));
                self.patch_high(if_end, Slot::Instr(if_start));
            }
            StmtKind::Let { name, init, .. } => {
                let value = self.build_expr(init, symbols)?;
                let local = symbols
                    .get(name)
                    .ok_or_else(|| BuildError::UnresolvedLocal {
                        name: self.interner.lookup(name).to_owned(),
                        span: stmt.span,
                    })?;
                self.push(Instruction::new(
                    Opcode::StoreLocal,
                    Slot::Local(local.slot),
                    Slot::Instr(value),
                ));
            }
            StmtKind::Fn { .. } | StmtKind::Struct { .. } => {
                return Err(BuildError::UnsupportedConstruct {
                    construct: stmt.kind.describe(),
                    span: stmt.span,
                });
            }
        }
        Ok(())
    }

    // === Expressions ===

    /// Emit an expression and return the index of the instruction that
    /// produces its value.
    fn build_expr(&mut self, id: ExprId, symbols: &SymbolTable) -> Result<InstrIdx, BuildError> {
        ensure_sufficient_stack(|| self.build_expr_inner(id, symbols))
    }

    fn build_expr_inner(
        &mut self,
        id: ExprId,
        symbols: &SymbolTable,
    ) -> Result<InstrIdx, BuildError> {
        let arena = self.arena;
        let expr = arena.get_expr(id);
        match expr.kind {
            ExprKind::Number(value) => Ok(self.push(Instruction::new(
                Opcode::LoadInt,
                Slot::Value(value),
                Slot::Unused,
            ))),
            ExprKind::Bool(value) => Ok(self.push(Instruction::new(
                Opcode::LoadBool,
                Slot::Value(u64::from(value)),
                Slot::Unused,
            ))),
            ExprKind::Ident(name) => match self.typed.expr_type(id) {
                Some(Type::Fn(idx)) => Ok(self.push(Instruction::new(
                    Opcode::LoadFn,
                    Slot::Fn(idx),
                    Slot::Unused,
                ))),
                Some(_) => {
                    let local = symbols
                        .get(name)
                        .ok_or_else(|| BuildError::UnresolvedLocal {
                            name: self.interner.lookup(name).to_owned(),
                            span: expr.span,
                        })?;
                    Ok(self.push(Instruction::new(
                        Opcode::LoadLocal,
                        Slot::Local(local.slot),
                        Slot::Unused,
                    )))
                }
                None => Err(BuildError::UntypedExpression {
                    expr: id,
                    span: expr.span,
                }),
            },
            ExprKind::Group(inner) => self.build_expr(inner, symbols),
            ExprKind::Binary { op, lhs, rhs } => {
                let opcode = match op {
                    BinaryOp::Add => Opcode::Add,
                    BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                        return Err(BuildError::UnsupportedOperator {
                            op,
                            span: expr.span,
                        });
                    }
                };
                let at = self.reserve(opcode);
                let left = self.build_expr(lhs, symbols)?;
                self.patch_high(at, Slot::Instr(left));
                let right = self.build_expr(rhs, symbols)?;
                self.patch_low(at, Slot::Instr(right));
                Ok(at)
            }
            ExprKind::Call { callee } => {
                // The callee's recorded type names the function directly.
                let Some(Type::Fn(idx)) = self.typed.expr_type(callee) else {
                    return Err(BuildError::UntypedExpression {
                        expr: callee,
                        span: arena.get_expr(callee).span,
                    });
                };
                Ok(self.push(Instruction::new(Opcode::Call, Slot::Fn(idx), Slot::Unused)))
            }
        }
    }
}
