//! Expression access on calls, property accesses and statements.

use katachi::traits::{ExpressionedNode, NamedNode};
use katachi::{
    AstNode, CallExpression, ExpressionStatement, PropertyAccessExpression, SourceFile,
    SyntaxKind,
};

fn first<T: AstNode>(file: &SourceFile, kind: SyntaxKind) -> T {
    let node = file
        .root()
        .first_descendant_by_kind_or_throw(file, kind)
        .unwrap();
    T::cast_or_throw(file, node.id()).unwrap()
}

#[test]
fn dynamic_import_expression_is_the_import_keyword() {
    let file = SourceFile::from_text("expr.ts", "import(x)").unwrap();
    let call: CallExpression = first(&file, SyntaxKind::CallExpression);

    assert_eq!(call.expression(&file).unwrap().text(&file).unwrap(), "import");
}

#[test]
fn super_property_access_expression_is_super() {
    let file = SourceFile::from_text("expr.ts", "super.x").unwrap();
    let access: PropertyAccessExpression = first(&file, SyntaxKind::PropertyAccessExpression);

    assert_eq!(access.expression(&file).unwrap().text(&file).unwrap(), "super");
}

#[test]
fn method_call_expression_is_the_member_access() {
    let file = SourceFile::from_text("expr.ts", "console.log(1, 2);\n").unwrap();
    let call: CallExpression = first(&file, SyntaxKind::CallExpression);

    let callee = call.expression(&file).unwrap();
    assert_eq!(callee.text(&file).unwrap(), "console.log");
    assert_eq!(callee.kind(&file).unwrap(), SyntaxKind::PropertyAccessExpression);
    assert_eq!(call.arguments(&file).unwrap().len(), 2);

    let access = callee
        .downcast::<PropertyAccessExpression>(&file)
        .unwrap()
        .unwrap();
    assert_eq!(access.name(&file).unwrap(), "log");
}

#[test]
fn replacing_a_callee_keeps_the_call_handle() {
    let mut file = SourceFile::from_text("expr.ts", "run(task);\n").unwrap();
    let call: CallExpression = first(&file, SyntaxKind::CallExpression);

    call.set_expression(&mut file, "queue.push").unwrap();

    assert_eq!(file.text(), "queue.push(task);\n");
    assert!(call.is_valid(&file));
    assert_eq!(call.expression(&file).unwrap().text(&file).unwrap(), "queue.push");
}

#[test]
fn statement_expression_can_be_replaced() {
    let mut file = SourceFile::from_text("expr.ts", "a = 1;\nb();\n").unwrap();
    let statement: ExpressionStatement = first(&file, SyntaxKind::ExpressionStatement);

    statement.set_expression(&mut file, "a += 2").unwrap();

    assert_eq!(file.text(), "a += 2;\nb();\n");
}
