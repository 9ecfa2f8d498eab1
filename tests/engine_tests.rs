//! End-to-end tests for the default Rust engine, alone and driven by `process::run`.

use std::fs;
use std::path::Path;

use gentests::engine::{EngineError, EngineOptions, GeneratorConfig};
use gentests::{Generator, Options, RustTestGenerator};
use regex::Regex;

const MATH: &str = r#"
pub fn add(a: i32, b: i32) -> i32 {
    a + b
}

pub fn sub(a: i32, b: i32) -> i32 {
    a - b
}

fn main() {}
"#;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn run(paths: &[&Path], options: &Options) -> String {
    let mut out = Vec::new();
    gentests::process::run(&mut out, paths, options, &RustTestGenerator::new()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn generates_one_result_per_source_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);

    let tests = RustTestGenerator::new()
        .generate(&dir.path().join("math.rs"), &EngineOptions::default())
        .unwrap();

    assert_eq!(tests.len(), 1);
    let test = &tests[0];
    assert_eq!(test.path, dir.path().join("math_tests.rs"));
    let names: Vec<&str> = test.functions.iter().map(|f| f.test_name()).collect();
    assert_eq!(names, vec!["test_add", "test_sub"]);

    let output = String::from_utf8(test.output.clone()).unwrap();
    assert!(output.starts_with("// Generated by gentests v"));
    assert!(output.contains("use super::*;"));
    assert!(!output.contains("test_main"));
    syn::parse_file(&output).expect("generated file must parse");
}

#[test]
fn version_header_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);

    let generator = RustTestGenerator::with_config(GeneratorConfig::new().with_version_header(false));
    let tests = generator.generate(dir.path(), &EngineOptions::default()).unwrap();
    let output = String::from_utf8(tests[0].output.clone()).unwrap();
    assert!(output.starts_with("use super::*;\n\n"));
}

#[test]
fn directory_skips_files_without_matches() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);
    write(dir.path(), "private.rs", "fn hidden() -> u8 { 1 }\n");

    let options = EngineOptions {
        exported: true,
        ..Default::default()
    };
    let tests = RustTestGenerator::new().generate(dir.path(), &options).unwrap();

    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].path, dir.path().join("math_tests.rs"));
}

#[test]
fn only_filter_applies_to_names() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);

    let options = EngineOptions {
        only: Some(Regex::new("^sub$").unwrap()),
        ..Default::default()
    };
    let tests = RustTestGenerator::new().generate(dir.path(), &options).unwrap();
    let names: Vec<&str> = tests[0].functions.iter().map(|f| f.test_name()).collect();
    assert_eq!(names, vec!["test_sub"]);
}

#[test]
fn existing_tests_are_kept_and_extended() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);
    let existing = "use super::*;\n\n#[test]\nfn test_add() {\n    assert_eq!(add(1, 2), 3);\n}\n";
    write(dir.path(), "math_tests.rs", existing);

    let tests = RustTestGenerator::new()
        .generate(dir.path(), &EngineOptions::default())
        .unwrap();

    let names: Vec<&str> = tests[0].functions.iter().map(|f| f.test_name()).collect();
    assert_eq!(names, vec!["test_sub"]);
    let output = String::from_utf8(tests[0].output.clone()).unwrap();
    assert!(output.starts_with(existing));
    assert!(output.contains("fn test_sub()"));
    syn::parse_file(&output).expect("merged file must parse");
}

#[test]
fn parse_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.rs", "fn broken() -> {}\n");
    let src = dir.path().join("broken.rs");

    let err = RustTestGenerator::new()
        .generate(&src, &EngineOptions::default())
        .unwrap_err();
    assert!(matches!(err, EngineError::Parse { .. }));
    assert!(err.to_string().starts_with(&format!("{}:1:", src.display())), "{err}");
}

#[test]
fn directory_without_sources_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "README.md", "# nothing here\n");

    let err = RustTestGenerator::new()
        .generate(dir.path(), &EngineOptions::default())
        .unwrap_err();
    assert_eq!(err.to_string(), format!("No source files found at {}", dir.path().display()));
}

#[test]
fn write_mode_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);
    let src = dir.path().join("math.rs");
    let dest = dir.path().join("math_tests.rs");
    let options = Options::new().with_all_funcs(true).with_write_output(true);

    let expected = RustTestGenerator::new()
        .generate(&src, &EngineOptions::default())
        .unwrap()
        .remove(0)
        .output;

    let out = run(&[src.as_path()], &options);
    assert_eq!(out, "Generated test_add\nGenerated test_sub\n");
    assert_eq!(fs::read(&dest).unwrap(), expected);

    // Every function is covered now, so a second run has nothing to add.
    let out = run(&[src.as_path()], &options);
    assert_eq!(out, format!("No tests generated for {}\n", src.display()));
    assert_eq!(fs::read(&dest).unwrap(), expected);
}

#[test]
fn stream_mode_leaves_the_filesystem_alone() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);
    let src = dir.path().join("math.rs");

    let out = run(&[src.as_path()], &Options::new().with_all_funcs(true));

    assert!(out.starts_with("Generated test_add\nGenerated test_sub\n// Generated by gentests v"));
    assert!(!dir.path().join("math_tests.rs").exists());
}

#[test]
fn mixed_batch_reports_each_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "math.rs", MATH);
    write(dir.path(), "empty.rs", "fn main() {}\n");
    let missing = dir.path().join("missing.rs");
    let empty = dir.path().join("empty.rs");
    let math = dir.path().join("math.rs");

    let options = Options::new().with_exported_funcs(true).with_write_output(true);
    let out = run(&[missing.as_path(), empty.as_path(), math.as_path()], &options);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 4, "{out}");
    assert!(lines[0].starts_with(&format!("{}: ", missing.display())));
    assert_eq!(lines[1], format!("No tests generated for {}", empty.display()));
    assert_eq!(lines[2], "Generated test_add");
    assert_eq!(lines[3], "Generated test_sub");
}

#[test]
fn failed_and_empty_paths_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.rs", "fn main() {}\n");
    let missing = dir.path().join("a.rs");
    let empty = dir.path().join("b.rs");

    let options = Options::new().with_all_funcs(true).with_write_output(true);
    let out = run(&[missing.as_path(), empty.as_path()], &options);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2, "{out}");
    assert!(lines[0].starts_with(&format!("{}: ", missing.display())));
    assert_eq!(lines[1], format!("No tests generated for {}", empty.display()));

    let mut entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["b.rs"]);
}
