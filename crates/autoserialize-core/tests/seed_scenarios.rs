//! End-to-end seed scenarios (§8): AST dump lines in, rendered source text
//! out, exercising the whole Dump-line → AstNode → ScopeWalker → Generator
//! pipeline in one pass rather than each stage in isolation.

use autoserialize_core::dispatch;
use autoserialize_core::generator::{self, GenMode};
use autoserialize_core::{ast_builder, walker};

fn build_and_walk(lines: &[&str]) -> autoserialize_core::ImplementationGeneratorSet {
    let owned: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    let tree = ast_builder::build(owned).expect("non-empty dump yields a tree");
    walker::walk_unit(&tree)
}

/// S1: a single marked record in the global scope.
#[test]
fn s1_single_record_end_to_end() {
    let set = build_and_walk(&[
        "TranslationUnitDecl 0x1 <<invalid sloc>>",
        "|-CXXRecordDecl 0x2 <line:1:1> line:1:8 class Point definition",
        "| |-FieldDecl 0x3 <col:5> x 'int'",
        "| |-FieldDecl 0x4 <col:5> y 'float'",
        "| `-public 'AutoReflect'",
    ]);

    let generator = set.generators.get("Point").expect("Point generator");
    assert!(set.non_template_types.contains("Point"));

    let rendered = generator::render(generator, GenMode::Regular);
    assert!(rendered.contains("void Serialize(Serializer& Ser, char const* Name, Point const& Val)"));
    assert!(rendered.contains("SerializeFields(Ser, Val);"));
    assert!(rendered.contains("Serialize(Ser, \"x\", Val.x);"));
    assert!(rendered.contains("Serialize(Ser, \"y\", Val.y);"));
}

/// S2: the same record nested two namespaces deep.
#[test]
fn s2_nested_namespace_end_to_end() {
    let set = build_and_walk(&[
        "TranslationUnitDecl 0x1 <<invalid sloc>>",
        "|-NamespaceDecl 0x2 <line:1:1> line:1:11 A",
        "| `-NamespaceDecl 0x3 <line:1:1> line:1:11 B",
        "|   |-CXXRecordDecl 0x4 <line:2:1> line:2:8 class Point definition",
        "|   | |-FieldDecl 0x5 <col:5> x 'int'",
        "|   | `-public 'AutoReflect'",
    ]);

    assert!(set.generators.contains_key("A::B::Point"));
    assert!(set.non_template_types.contains("A::B::Point"));
    let rendered = generator::include_guard_macro("A::B::Point");
    assert_eq!(rendered, "A__B__Point_IMPL");
}

/// S3: a templated record keys with its instantiation suffix and is
/// excluded from dynamic dispatch.
#[test]
fn s3_templated_record_end_to_end() {
    let set = build_and_walk(&[
        "TranslationUnitDecl 0x1 <<invalid sloc>>",
        "|-ClassTemplateDecl 0x2 <line:1:1> line:1:29 Box",
        "| |-TemplateTypeParmDecl 0x3 <col:11, col:20> col:20 typename depth 0 index 0 T",
        "| `-CXXRecordDecl 0x4 <line:1:22> line:1:29 class Box definition",
        "|   |-FieldDecl 0x5 <col:5> value 'T'",
        "|   `-public 'AutoReflect'",
    ]);

    let generator = set.generators.get("Box<T>").expect("Box<T> generator");
    assert!(!set.non_template_types.contains("Box<T>"));

    let rendered = generator::render(generator, GenMode::Regular);
    assert!(rendered.starts_with("template<typename T>\ninline void Serialize"));
}

/// S4: an enum-typed field rewrites through its recorded underlying type.
#[test]
fn s4_enum_rewrite_end_to_end() {
    let set = build_and_walk(&[
        "TranslationUnitDecl 0x1 <<invalid sloc>>",
        "|-EnumDecl 0x2 <line:1:1> line:1:30 referenced class TheBlooper 'unsigned char'",
        "|-CXXRecordDecl 0x3 <line:2:1> line:2:8 class Widget definition",
        "| |-FieldDecl 0x4 <col:5> h 'TheBlooper'",
        "| `-public 'AutoReflect'",
    ]);

    let generator = set.generators.get("Widget").expect("Widget generator");
    let rendered = generator::render(generator, GenMode::Regular);
    assert!(rendered.contains("static_cast<unsigned char>(Val.h)"));
    assert!(rendered.contains("*reinterpret_cast<unsigned char*>(&Val.h)"));
}

/// §8.7: dynamic-dispatch closure — every non-template name the walker
/// found becomes a branch in all four dispatch functions.
#[test]
fn s7_dynamic_dispatch_closure_end_to_end() {
    let set = build_and_walk(&[
        "TranslationUnitDecl 0x1 <<invalid sloc>>",
        "|-NamespaceDecl 0x2 <line:1:1> line:1:11 A",
        "| `-CXXRecordDecl 0x3 <line:2:1> line:2:8 class Point definition",
        "|   |-FieldDecl 0x4 <col:5> x 'int'",
        "|   `-public 'AutoReflect'",
    ]);

    let rendered = dispatch::render(&set.non_template_types);
    for name in &set.non_template_types {
        assert!(rendered.contains(&format!("\"{name}\"")));
        assert!(rendered.contains(&format!("typeid({name})")));
    }
    assert!(rendered.contains("throw UnknownType"));
    assert!(rendered.contains("throw UnsupportedType"));
}
