use std::rc::Rc;

use moonbite_parser::ast::{Stmt, TypeLiteral};
use moonbite_parser::typecheck::ty::ParameterStack;
use moonbite_parser::{parse, ErrorKind, Type, Typechecker};

fn definition_literal(source: &str) -> TypeLiteral {
    let ast = parse(source, "main.mb").expect("parsing should succeed");
    match ast.definitions.into_iter().next() {
        Some(Stmt::TypeDefinition { definition, .. }) => definition,
        other => panic!("expected type definition, found {:?}", other),
    }
}

fn comptime_checker() -> Typechecker {
    let mut checker = Typechecker::new();
    checker.set_comptime_builtins();
    checker
}

fn builtin(checker: &Typechecker, name: &str) -> Rc<Type> {
    Rc::clone(checker.lookup(name).expect("builtin should be registered"))
}

#[test]
fn a_union_multiplies_its_sides() {
    let mut checker = comptime_checker();
    let literal = definition_literal("package main\ntype Small uint8 | uint16");
    let union = checker
        .resolve_type_literal(&literal, None)
        .expect("resolution should succeed");

    // uint8 is 19 and uint16 is 23
    assert_eq!(union.base, 437);
    assert!(union.accepts(&builtin(&checker, "uint8")));
    assert!(union.accepts(&builtin(&checker, "uint16")));
    assert!(!union.accepts(&builtin(&checker, "int32")));
}

#[test]
fn an_intersection_requires_every_side() {
    let mut checker = comptime_checker();
    let literal = definition_literal("package main\ntype Both iterable & uint32");
    let both = checker
        .resolve_type_literal(&literal, None)
        .expect("resolution should succeed");

    // rune extends uint32 but not iterable
    assert!(!both.accepts(&builtin(&checker, "rune")));
    // string extends iterable but not uint32
    assert!(!both.accepts(&builtin(&checker, "string")));
}

#[test]
fn assignability_is_reflexive_and_transitive() {
    let mut checker = comptime_checker();
    let uint8 = builtin(&checker, "uint8");
    assert!(uint8.accepts(&uint8));

    let child = checker.extend(&uint8, Vec::new(), ParameterStack::new());
    let grandchild = checker.extend(&child, Vec::new(), ParameterStack::new());
    assert!(uint8.accepts(&child));
    assert!(child.accepts(&grandchild));
    assert!(uint8.accepts(&grandchild));
    assert!(!grandchild.accepts(&uint8));
}

#[test]
fn siblings_get_coprime_factors() {
    let mut checker = comptime_checker();
    let parent = builtin(&checker, "bool");
    let first = checker.extend(&parent, Vec::new(), ParameterStack::new());
    let second = checker.extend(&parent, Vec::new(), ParameterStack::new());

    let first_factor = first.base / parent.base;
    let second_factor = second.base / parent.base;
    assert_ne!(first_factor, second_factor);
    assert_ne!(first_factor % second_factor, 0);
    assert_ne!(second_factor % first_factor, 0);
    assert!(!first.accepts(&second));
    assert!(!second.accepts(&first));
}

#[test]
fn any_accepts_everything() {
    let checker = comptime_checker();
    let any = builtin(&checker, "any");
    assert_eq!(any.base, 1);
    assert!(any.accepts(&builtin(&checker, "uint8")));
    assert!(any.accepts(&builtin(&checker, "string")));
    assert!(!builtin(&checker, "uint8").accepts(&any));
}

#[test]
fn duplicate_definitions_are_rejected() {
    let mut checker = comptime_checker();
    let ast = parse(
        "package main\ntype Count int32\ntype Count int64",
        "main.mb",
    )
    .expect("parsing should succeed");
    let error = checker.check(&ast).expect_err("redefinition should fail");
    assert_eq!(error.kind, ErrorKind::TypeError);
    assert!(error.reason.contains("Count"));
}

#[test]
fn too_many_generic_arguments_are_rejected() {
    let mut checker = Typechecker::new();
    checker.set_runtime_builtins();
    let ast = parse("package main\ntype Names List<string, bool>", "main.mb")
        .expect("parsing should succeed");
    let error = checker.check(&ast).expect_err("arity mismatch should fail");
    assert_eq!(error.kind, ErrorKind::TypeError);
    assert!(error.reason.contains("argument"));
}

#[test]
fn missing_generic_arguments_are_rejected() {
    let mut checker = Typechecker::new();
    checker.set_runtime_builtins();
    let ast = parse("package main\ntype Names List", "main.mb")
        .expect("parsing should succeed");
    let error = checker.check(&ast).expect_err("open slot should fail");
    assert_eq!(error.kind, ErrorKind::TypeError);
    assert!(error.reason.contains("argument"));
}

#[test]
fn filled_slots_need_no_further_arguments() {
    let mut checker = Typechecker::new();
    checker.set_runtime_builtins();
    // String's element slot is bound to rune; an alias of a fully applied
    // type carries no open slots either
    let ast = parse(
        "package main\ntype Names List<string>\ntype Text String\ntype Labels Names",
        "main.mb",
    )
    .expect("parsing should succeed");
    checker.check(&ast).expect("definitions should succeed");

    let list = Rc::clone(checker.lookup("List").expect("builtin should be registered"));
    let labels = Rc::clone(checker.lookup("Labels").expect("alias should be registered"));
    assert!(list.accepts(&labels));
}

#[test]
fn duplicate_struct_fields_are_rejected() {
    let mut checker = comptime_checker();
    let literal = definition_literal(
        "package main\ntype Point {\nx int32;\nx int64;\n}",
    );
    let error = checker
        .resolve_type_literal(&literal, None)
        .expect_err("duplicate field should fail");
    assert_eq!(error.kind, ErrorKind::TypeError);
    assert!(error.reason.contains("x"));
}

#[test]
fn unknown_types_are_rejected() {
    let mut checker = comptime_checker();
    let literal = definition_literal("package main\ntype Alias Missing");
    let error = checker
        .resolve_type_literal(&literal, None)
        .expect_err("unknown name should fail");
    assert_eq!(error.kind, ErrorKind::TypeError);
    assert!(error.reason.contains("Missing"));
}

#[test]
fn generic_definitions_bind_arguments_by_position() {
    let mut checker = Typechecker::new();
    checker.set_runtime_builtins();
    let ast = parse("package main\ntype Names List<string>", "main.mb")
        .expect("parsing should succeed");
    checker.check(&ast).expect("definition should succeed");

    let names = builtin(&checker, "Names");
    let list = builtin(&checker, "List");
    assert!(list.accepts(&names));
    assert!(!names.accepts(&list));
}

#[test]
fn typed_literals_descend_from_their_target() {
    let mut checker = comptime_checker();
    let literal = definition_literal("package main\ntype Five int32(5)");
    let five = checker
        .resolve_type_literal(&literal, None)
        .expect("resolution should succeed");
    assert!(builtin(&checker, "int32").accepts(&five));
    assert!(!five.accepts(&builtin(&checker, "int32")));
}
