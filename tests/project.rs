//! Projects configured from a settings file.

use std::io::Write;

use katachi::config::load_settings;
use katachi::traits::ExportableNode;
use katachi::{AliasResolution, MorphError, Project, ReparseStrategy, Settings};
use tempfile::NamedTempFile;

const ALIASED_DEFAULT: &str = "class Foo {}\nimport Bar = Foo;\nexport default Bar;\n";

fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn settings_are_loaded_from_toml() {
    let config = settings_file("alias-resolution = \"single-hop\"\nreparse = \"full\"\n");

    let settings = load_settings(config.path()).unwrap();

    assert_eq!(settings.alias_resolution, AliasResolution::SingleHop);
    assert_eq!(settings.reparse, ReparseStrategy::Full);
    insta::assert_snapshot!(
        serde_json::to_string(&settings).unwrap(),
        @r#"{"dialect":"typescript","alias-resolution":"single-hop","reparse":"full"}"#
    );
}

#[test]
fn invalid_settings_file_is_a_config_error() {
    let config = settings_file("alias-resolution = \"sometimes\"\n");

    let result = load_settings(config.path());

    assert!(matches!(result, Err(MorphError::Config { .. })));
}

#[test]
fn single_hop_stops_at_the_first_alias() {
    let config = settings_file("alias-resolution = \"single-hop\"\n");
    let mut project = Project::with_settings(load_settings(config.path()).unwrap());
    let file = project.create_source_file("alias.ts", ALIASED_DEFAULT).unwrap();

    let foo = file.class_or_throw("Foo").unwrap();

    assert!(!foo.is_default_export(file).unwrap());
}

#[test]
fn transitive_resolution_reaches_the_class() {
    let mut project = Project::with_settings(Settings::default());
    let file = project.create_source_file("alias.ts", ALIASED_DEFAULT).unwrap();

    let foo = file.class_or_throw("Foo").unwrap();

    assert!(foo.is_default_export(file).unwrap());
}

#[test]
fn files_edited_through_the_project_stay_registered() {
    let mut project = Project::new();
    project
        .create_source_file("a.ts", "class A {}\n")
        .unwrap();

    let file = project.source_file_mut("a.ts").unwrap();
    let a = file.class_or_throw("A").unwrap();
    a.set_is_exported(file, true).unwrap();

    let file = project.source_file_or_throw("a.ts").unwrap();
    assert_eq!(file.text(), "export class A {}\n");
    assert_eq!(file.edit_count(), 1);
}
