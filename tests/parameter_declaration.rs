//! Parameter queries through function declarations.

use katachi::traits::{DeclarationNamedNode, InitializerExpressionableNode, NamedNode, TypedNode};
use katachi::{MorphError, SourceFile};
use rstest::rstest;

#[rstest]
#[case::required("function f(a: string) {}", false, false)]
#[case::question_mark("function f(a?: string) {}", true, false)]
#[case::with_initializer("function f(a = 1) {}", true, false)]
#[case::rest("function f(...a: number[]) {}", true, true)]
fn optional_and_rest_parameters(
    #[case] text: &str,
    #[case] optional: bool,
    #[case] rest: bool,
) {
    let file = SourceFile::from_text("params.ts", text).unwrap();
    let f = file.function("f").unwrap().unwrap();
    let parameter = f.parameter(&file, "a").unwrap().unwrap();

    assert_eq!(parameter.is_optional(&file).unwrap(), optional);
    assert_eq!(parameter.is_rest_parameter(&file).unwrap(), rest);
}

#[test]
fn parameters_are_listed_in_order() {
    let file = SourceFile::from_text("params.ts", "function f(a, b: number, c = 2) {}\n").unwrap();
    let f = file.function("f").unwrap().unwrap();

    let names: Vec<_> = f
        .parameters(&file)
        .unwrap()
        .iter()
        .map(|p| p.name(&file).unwrap())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);

    let b = f.parameter(&file, "b").unwrap().unwrap();
    assert_eq!(b.type_text(&file).unwrap().as_deref(), Some("number"));
    let c = f.parameter(&file, "c").unwrap().unwrap();
    assert!(c.has_initializer(&file).unwrap());
}

#[test]
fn destructured_parameter_has_no_plain_name() {
    let file = SourceFile::from_text("params.ts", "function f({ x, y }: Point) {}\n").unwrap();
    let f = file.function("f").unwrap().unwrap();
    let parameter = f.parameters(&file).unwrap()[0];

    assert!(parameter.is_binding_pattern(&file).unwrap());
    assert_eq!(parameter.binding_text(&file).unwrap(), "{ x, y }");
    assert!(matches!(
        parameter.name(&file),
        Err(MorphError::NotFound { .. })
    ));
}

#[test]
fn adding_a_type_to_an_untyped_parameter() {
    let mut file = SourceFile::from_text("params.ts", "function f(a, b) {}\n").unwrap();
    let f = file.function("f").unwrap().unwrap();
    let a = f.parameter(&file, "a").unwrap().unwrap();

    a.set_type(&mut file, "string").unwrap();

    assert_eq!(file.text(), "function f(a: string, b) {}\n");
}
