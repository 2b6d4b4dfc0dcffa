use super::*;
use pretty_assertions::assert_eq;

#[test]
fn arena_ids_follow_allocation_order() {
    let mut arena = ExprArena::new();
    let one = arena.alloc_expr(Expr::new(ExprKind::Number(1), Span::new(0, 1)));
    let two = arena.alloc_expr(Expr::new(ExprKind::Number(2), Span::new(4, 5)));
    let sum = arena.alloc_expr(Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: one,
            rhs: two,
        },
        Span::new(0, 5),
    ));

    assert_eq!(one.index(), 0);
    assert_eq!(two.index(), 1);
    assert_eq!(sum.index(), 2);
    assert_eq!(arena.expr_count(), 3);
    assert_eq!(
        arena.get_expr(sum).kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: one,
            rhs: two
        }
    );
}

#[test]
fn statements_and_type_exprs_have_independent_id_spaces() {
    let mut arena = ExprArena::new();
    let int = Name::from_raw(1);
    let ty = arena.alloc_type_expr(TypeExpr::new(TypeExprKind::Ident(int), Span::new(9, 12)));
    let lit = arena.alloc_expr(Expr::new(ExprKind::Number(0), Span::new(22, 23)));
    let ret = arena.alloc_stmt(Stmt::new(StmtKind::Return(lit), Span::new(15, 24)));

    assert_eq!(ty.index(), 0);
    assert_eq!(ret.index(), 0);
    assert_eq!(arena.type_expr_count(), 1);
    assert_eq!(arena.stmt_count(), 1);
    assert_eq!(arena.get_stmt(ret).kind.describe(), "return statement");
}

#[test]
fn binary_op_symbols() {
    assert_eq!(BinaryOp::Add.to_string(), "+");
    assert_eq!(BinaryOp::Sub.as_symbol(), "-");
    assert_eq!(BinaryOp::Mul.as_symbol(), "*");
    assert_eq!(BinaryOp::Div.as_symbol(), "/");
}

#[test]
fn id_debug_names_the_table() {
    assert_eq!(format!("{:?}", ExprId::new(3)), "ExprId(3)");
    assert_eq!(format!("{:?}", StmtId::new(0)), "StmtId(0)");
    assert_eq!(format!("{:?}", TypeExprId::new(7)), "TypeExprId(7)");
}
