use phpns::config::ConvertConfig;
use phpns::convert::{convert, ConversionReport};
use std::fs;
use std::path::Path;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn run(source: &Path, target: &Path) -> ConversionReport {
    convert(source, target, &ConvertConfig::default(), |_| {}).unwrap()
}

#[test]
fn class_file_gains_namespace_and_qualified_builtins() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(
        source.path(),
        "src/widgets/Widget.php",
        "<?php\n\nfinal class Widget extends Exception {\n  public function make() {\n    return new Widget();\n  }\n}\n",
    );

    let report = run(source.path(), target.path());

    assert_eq!(
        read(target.path(), "src/Facebook/Libphutil/Widget.php"),
        "<?php\n\nnamespace Facebook\\Libphutil;\n\nfinal class Widget extends \\Exception {\n  public function make() {\n    return new \\Facebook\\Libphutil\\Widget();\n  }\n}\n"
    );
    assert_eq!(report.copied, 1);
    assert!(report.functions.is_empty());
    assert_eq!(read(target.path(), "src/function_mapping.txt"), "");
}

#[test]
fn function_file_becomes_container_class() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(
        source.path(),
        "src/utils/strings.php",
        "<?php\n\nfunction phutil_split($text) {\n  return explode(',', $text);\n}\n",
    );
    write(
        source.path(),
        "src/parser/Parser.php",
        "<?php\n\nclass Parser {\n  public function parse($s) {\n    return phutil_split($s);\n  }\n}\n",
    );

    let report = run(source.path(), target.path());

    assert_eq!(
        read(target.path(), "src/Facebook/Libphutil/Functions/strings.php"),
        "<?php\n\nnamespace Facebook\\Libphutil\\Functions;\n\nclass strings {\n  \n  static function phutil_split($text) {\n    return explode(',', $text);\n  }\n  \n}\n"
    );
    assert_eq!(
        read(target.path(), "src/Facebook/Libphutil/Parser.php"),
        "<?php\n\nnamespace Facebook\\Libphutil;\n\nclass Parser {\n  public function parse($s) {\n    return \\Facebook\\Libphutil\\Functions\\strings::phutil_split($s);\n  }\n}\n"
    );
    assert_eq!(
        read(target.path(), "src/function_mapping.txt"),
        "phutil_split() ....................... \\Facebook\\Libphutil\\Functions\\strings::phutil_split\n"
    );
    assert_eq!(report.function_files.len(), 1);
    assert_eq!(report.class_files.len(), 1);
}

#[test]
fn only_boundary_framed_references_are_rewritten() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/Widget.php", "<?php\n\nclass Widget {}\n");
    write(
        source.path(),
        "src/Factory.php",
        "<?php\n\nclass Factory {\n  public function a() {\n    // Widgets stay\n    $f = new WidgetFactory();\n    $m = MyWidget::make();\n    $w = new Widget();\n    $c = 'Widget';\n    return Widget::create();\n  }\n}\n",
    );

    run(source.path(), target.path());

    let factory = read(target.path(), "src/Facebook/Libphutil/Factory.php");
    assert!(factory.contains("// Widgets stay"));
    assert!(factory.contains("new WidgetFactory();"));
    assert!(factory.contains("$m = MyWidget::make();"));
    assert!(factory.contains("$w = new \\Facebook\\Libphutil\\Widget();"));
    assert!(factory.contains("$c = '\\Facebook\\Libphutil\\Widget';"));
    assert!(factory.contains("return \\Facebook\\Libphutil\\Widget::create();"));
    assert!(factory.contains("class Factory {"));
}

#[test]
fn duplicate_function_names_resolve_to_last_file() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/a.php", "<?php\n\nfunction helper() {\n  return 1;\n}\n");
    write(source.path(), "src/b.php", "<?php\n\nfunction helper() {\n  return 2;\n}\n");
    write(
        source.path(),
        "src/User.php",
        "<?php\n\nclass User {\n  public function go() {\n    return helper();\n  }\n}\n",
    );

    run(source.path(), target.path());

    assert_eq!(
        read(target.path(), "src/function_mapping.txt"),
        "helper() ....................... \\Facebook\\Libphutil\\Functions\\a::helper\n\
         helper() ....................... \\Facebook\\Libphutil\\Functions\\b::helper\n"
    );
    let user = read(target.path(), "src/Facebook/Libphutil/User.php");
    assert!(user.contains("return \\Facebook\\Libphutil\\Functions\\b::helper();"));

    let a = read(target.path(), "src/Facebook/Libphutil/Functions/a.php");
    assert!(a.contains("class a {"));
    assert!(a.contains("static function helper() {"));
}

#[test]
fn files_without_declarations_are_skipped() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/bootstrap.php", "<?php\n\nrequire_once 'x.php';\n");
    write(source.path(), "src/__tests__/WidgetTest.php", "<?php\n\nclass WidgetTest {}\n");

    let mut lines = Vec::new();
    let report = convert(source.path(), target.path(), &ConvertConfig::default(), |e| {
        lines.push(e.to_string())
    })
    .unwrap();

    assert_eq!(report.skipped, vec!["bootstrap.php"]);
    assert_eq!(report.copied, 0);
    assert!(!target.path().join("src/Facebook/Libphutil/bootstrap.php").exists());
    assert!(!target.path().join("src/Facebook/Libphutil/WidgetTest.php").exists());
    assert_eq!(lines[1], "Skipping bootstrap.php");
    assert_eq!(lines[2], "0 files copied to new location.");
    assert_eq!(lines.last().map(String::as_str), Some("Done."));
}

#[test]
fn custom_namespace_changes_layout() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/Widget.php", "<?php\n\nclass Widget {}\n");
    write(source.path(), "src/util.php", "<?php\n\nfunction tidy() {}\n");

    let config = ConvertConfig::default().with_namespace("\\Acme\\Kit\\");
    convert(source.path(), target.path(), &config, |_| {}).unwrap();

    assert!(read(target.path(), "src/Acme/Kit/Widget.php").contains("namespace Acme\\Kit;"));
    assert!(read(target.path(), "src/Acme/Kit/Functions/util.php")
        .contains("namespace Acme\\Kit\\Functions;"));
}

#[test]
fn rerunning_over_output_is_not_idempotent() {
    let source = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    write(source.path(), "src/Widget.php", "<?php\n\nclass Widget {}\n");
    write(source.path(), "src/utils.php", "<?php\n\nfunction tidy() {}\n");

    run(source.path(), first.path());
    run(first.path(), second.path());

    let widget = read(second.path(), "src/Facebook/Libphutil/Widget.php");
    assert_eq!(widget.matches("namespace Facebook\\Libphutil;").count(), 2);

    // The container class makes the former function file class-bearing.
    assert!(second.path().join("src/Facebook/Libphutil/utils.php").exists());
    assert!(!second
        .path()
        .join("src/Facebook/Libphutil/Functions/utils.php")
        .exists());
}

#[test]
fn unparsable_files_are_skipped_and_the_run_continues() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/Widget.php", "<?php\n\nclass Widget {}\n");
    write(source.path(), "src/Broken.php", "<?php\n$x = 'open;\nclass Broken {}\n");
    fs::write(
        source.path().join("src/Bad.php"),
        b"<?php\n$x = \"caf\xe9;\nclass Bad {}\n",
    )
    .unwrap();

    let report = run(source.path(), target.path());

    assert_eq!(report.skipped, vec!["Bad.php", "Broken.php"]);
    assert!(!target.path().join("src/Facebook/Libphutil/Bad.php").exists());
    assert!(!target.path().join("src/Facebook/Libphutil/Broken.php").exists());
    assert_eq!(
        read(target.path(), "src/Facebook/Libphutil/Widget.php"),
        "<?php\n\nnamespace Facebook\\Libphutil;\n\nclass Widget {}\n"
    );
}

#[test]
fn non_utf8_source_is_converted_byte_for_byte() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/Widget.php", "<?php\n\nclass Widget {}\n");
    fs::write(
        source.path().join("src/Latin.php"),
        b"<?php\n// caf\xe9\nclass Latin extends Widget {}\n",
    )
    .unwrap();

    let report = run(source.path(), target.path());

    assert!(report.skipped.is_empty());
    assert_eq!(report.copied, 2);
    assert_eq!(
        fs::read(target.path().join("src/Facebook/Libphutil/Latin.php")).unwrap(),
        b"<?php\n\nnamespace Facebook\\Libphutil;\n// caf\xe9\nclass Latin extends \\Facebook\\Libphutil\\Widget {}\n"
            .to_vec()
    );
}

#[test]
fn attribute_before_class_keeps_file_class_bearing() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "src/Marker.php", "<?php\n#[Attribute] class Marker {}\n");

    let report = run(source.path(), target.path());

    assert!(report.skipped.is_empty());
    assert_eq!(
        read(target.path(), "src/Facebook/Libphutil/Marker.php"),
        "<?php\n\nnamespace Facebook\\Libphutil;\n#[\\Attribute] class Marker {}\n"
    );
}
