use super::*;
use liam_ir::Name;
use pretty_assertions::assert_eq;

#[test]
fn unrecorded_nodes_have_no_type() {
    let table = ExprTypes::with_len(3);
    assert_eq!(table.get(ExprId::new(0)), None);
    assert_eq!(table.get(ExprId::new(10)), None);
    assert_eq!(table.resolved_count(), 0);
}

#[test]
fn record_grows_the_table() {
    let mut table = ExprTypes::new();
    table.record(ExprId::new(4), Type::Int);
    table.record(ExprId::new(1), Type::Bool);

    assert_eq!(table.get(ExprId::new(4)), Some(Type::Int));
    assert_eq!(table.get(ExprId::new(1)), Some(Type::Bool));
    assert_eq!(table.get(ExprId::new(2)), None);
    assert_eq!(table.resolved_count(), 2);
}

#[test]
fn type_expr_table_is_separate() {
    let mut table = TypeExprTypes::default();
    let person = Type::Struct(Name::from_raw(3));
    table.record(TypeExprId::new(0), person);
    assert_eq!(table.get(TypeExprId::new(0)), Some(person));
    assert_eq!(table.clone(), table);
}
