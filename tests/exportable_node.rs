//! Export and default-export behavior of top-level declarations.

use katachi::traits::{ExportableNode, ModifierableNode};
use katachi::{AstNode, ClassDeclaration, MorphError, SourceFile, SyntaxKind};
use rstest::rstest;

fn source(text: &str) -> SourceFile {
    SourceFile::from_text("exportable.ts", text).unwrap()
}

fn first_class(file: &SourceFile) -> ClassDeclaration {
    let node = file
        .root()
        .first_descendant_by_kind_or_throw(file, SyntaxKind::ClassDeclaration)
        .unwrap();
    node.downcast::<ClassDeclaration>(file).unwrap().unwrap()
}

#[test]
fn default_exported_class_reports_default_keyword() {
    let file = source("export default class Foo {}");
    let foo = first_class(&file);

    assert!(foo.has_default_keyword(&file).unwrap());
    assert!(foo.is_default_export(&file).unwrap());
    assert!(!foo.is_named_export(&file).unwrap());
}

#[test]
fn named_exported_class_is_not_default() {
    let file = source("export class Foo {}");
    let foo = first_class(&file);

    assert!(foo.is_named_export(&file).unwrap());
    assert!(!foo.is_default_export(&file).unwrap());
}

#[rstest]
#[case::exported_at_top_level("export class A {}", true)]
#[case::default_keyword_present("export default class A {}", false)]
#[case::no_export_keyword("class A {}", false)]
#[case::nested_in_namespace("namespace N { export class A {} }", false)]
fn is_named_export_truth_table(#[case] text: &str, #[case] expected: bool) {
    let file = source(text);
    let class = first_class(&file);
    assert_eq!(class.is_named_export(&file).unwrap(), expected);
}

#[test]
fn set_is_exported_false_strips_both_keywords() {
    let mut file = source("export default class Foo {}");
    let foo = first_class(&file);

    foo.set_is_exported(&mut file, false).unwrap();

    assert_eq!(file.text(), "class Foo {}");
    assert!(!foo.has_export_keyword(&file).unwrap());
    assert!(!foo.is_default_export(&file).unwrap());
}

#[test]
fn new_default_export_replaces_the_old_one() {
    let mut file = source("export default class A {}\nclass B {}\n");
    let a = file.class_or_throw("A").unwrap();
    let b = file.class_or_throw("B").unwrap();

    b.set_is_default_export(&mut file, true).unwrap();

    assert_eq!(file.text(), "class A {}\nexport default class B {}\n");
    assert!(!a.is_default_export(&file).unwrap());
    assert!(b.is_default_export(&file).unwrap());
    let defaults = file
        .classes()
        .unwrap()
        .into_iter()
        .filter(|class| class.is_default_export(&file).unwrap())
        .count();
    assert_eq!(defaults, 1);
}

#[test]
fn set_is_default_export_twice_is_idempotent() {
    let mut file = source("class Foo {}\n");
    let foo = first_class(&file);

    foo.set_is_default_export(&mut file, true).unwrap();
    let edits = file.edit_count();
    foo.set_is_default_export(&mut file, true).unwrap();

    assert_eq!(file.text(), "export default class Foo {}\n");
    assert_eq!(file.edit_count(), edits);
    assert_eq!(foo.modifiers(&file).unwrap().len(), 2);
}

#[test]
fn default_export_requires_top_level_parent() {
    let mut file = source("namespace N { export class A {} }");
    let class = first_class(&file);

    let result = class.set_is_default_export(&mut file, true);

    assert!(matches!(result, Err(MorphError::InvalidOperation { .. })));
    assert_eq!(file.text(), "namespace N { export class A {} }");
}

#[test]
fn removed_export_keyword_handle_becomes_invalid() {
    let mut file = source("export class Foo {}\n");
    let foo = first_class(&file);
    let keyword = foo.export_keyword_or_throw(&file).unwrap();

    foo.set_is_exported(&mut file, false).unwrap();

    assert_eq!(file.text(), "class Foo {}\n");
    assert!(!foo.has_export_keyword(&file).unwrap());
    assert!(!keyword.is_valid(&file));
    let err = keyword.text(&file).unwrap_err();
    assert!(err.is_invalid_node());
}
