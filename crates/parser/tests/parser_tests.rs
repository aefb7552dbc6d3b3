use moonbite_parser::ast::{Expr, Stmt};
use moonbite_parser::{parse, Ast, ErrorKind};

fn parse_file(source: &str) -> Ast {
    parse(source, "main.mb").expect("parsing should succeed")
}

fn first_value(ast: &Ast) -> &Expr {
    match ast.definitions.first() {
        Some(Stmt::Declaration {
            value: Some(value), ..
        }) => value,
        other => panic!("expected an initialized declaration, found {:?}", other),
    }
}

#[test]
fn parses_a_bare_package() {
    let ast = parse_file("package main");
    assert_eq!(ast.package_name(), "main");
    assert!(ast.uses.is_empty());
    assert!(ast.definitions.is_empty());
}

#[test]
fn parses_uses_with_and_without_alias() {
    let ast = parse_file("package main\nuse \"os\"\nuse \"binary\" as bin");
    assert_eq!(ast.uses.len(), 2);
    match &ast.uses[0] {
        Stmt::Use {
            resource, alias, ..
        } => {
            assert_eq!(resource, "os");
            assert!(alias.is_none());
        }
        other => panic!("expected use statement, found {:?}", other),
    }
    match &ast.uses[1] {
        Stmt::Use {
            resource,
            alias: Some(alias),
            ..
        } => {
            assert_eq!(resource, "binary");
            assert_eq!(alias.value, "bin");
        }
        other => panic!("expected aliased use statement, found {:?}", other),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let ast = parse_file("package main\nconst test = 2 + 3 * 5");
    match first_value(&ast) {
        Expr::ArithmeticExpression {
            operator, right, ..
        } => {
            assert_eq!(operator, "+");
            match right.as_ref() {
                Expr::ArithmeticExpression { operator, .. } => assert_eq!(operator, "*"),
                other => panic!("expected nested product, found {:?}", other),
            }
        }
        other => panic!("expected arithmetic expression, found {:?}", other),
    }
}

#[test]
fn grouping_overrides_precedence() {
    let ast = parse_file("package main\nconst test = (2 + 3) * 5");
    match first_value(&ast) {
        Expr::ArithmeticExpression {
            operator, left, ..
        } => {
            assert_eq!(operator, "*");
            match left.as_ref() {
                Expr::GroupExpression { expression, .. } => match expression.as_ref() {
                    Expr::ArithmeticExpression { operator, .. } => assert_eq!(operator, "+"),
                    other => panic!("expected grouped sum, found {:?}", other),
                },
                other => panic!("expected group expression, found {:?}", other),
            }
        }
        other => panic!("expected arithmetic expression, found {:?}", other),
    }
}

#[test]
fn parsing_is_deterministic() {
    let source = "package main\n// answer\nconst test = [1, 2, 3]\nfun main() {\n\tif (test != 0) {\n\t\treturn\n\t}\n}";
    let first = parse_file(source).to_json().expect("serialization should succeed");
    let second = parse_file(source).to_json().expect("serialization should succeed");
    assert_eq!(first, second);
}

#[test]
fn hidden_marks_the_definition() {
    let ast = parse_file("package main\nhidden fun helper() {\n}\nhidden const secret = 1");
    match &ast.definitions[0] {
        Stmt::UnboundFunDefinition { hidden, .. } => assert!(*hidden),
        other => panic!("expected fun definition, found {:?}", other),
    }
    match &ast.definitions[1] {
        Stmt::Declaration { hidden, .. } => assert!(*hidden),
        other => panic!("expected declaration, found {:?}", other),
    }
}

#[test]
fn hidden_is_rejected_inside_a_block() {
    let error = parse("package main\nfun main() {\nhidden var x = 1\n}", "main.mb")
        .expect_err("hidden inside a block should fail");
    assert_eq!(error.kind, ErrorKind::SyntaxError);
    assert!(error.reason.contains("hidden"));
}

#[test]
fn context_sensitive_statements_need_their_context() {
    let cases = [
        ("package main\nfun main() {\nthis\n}", "this"),
        ("package main\nfun main() {\nyield 1\n}", "yield"),
        ("package main\nfun main() {\nbreak\n}", "break"),
        ("package main\nfun main() {\ncontinue\n}", "continue"),
        ("package main\nconst x = .", "."),
    ];
    for (source, what) in cases {
        let error = parse(source, "main.mb").expect_err(what);
        assert_eq!(error.kind, ErrorKind::SyntaxError, "source: {}", source);
        assert!(
            error.reason.contains(what),
            "reason {:?} should mention {:?}",
            error.reason,
            what
        );
    }
}

#[test]
fn caret_may_not_follow_an_expression() {
    let error = parse("package main\nconst x = 1 ^", "main.mb")
        .expect_err("caret after an expression should fail");
    assert_eq!(error.kind, ErrorKind::SyntaxError);
    assert!(error.reason.contains("^"));
}

#[test]
fn or_fallback_requires_a_call_target() {
    let ast = parse_file("package main\nconst x = read() or 0");
    match first_value(&ast) {
        Expr::OrExpression { target, .. } => assert!(target.is_call()),
        other => panic!("expected or expression, found {:?}", other),
    }

    let error = parse("package main\nconst x = 1 or 0", "main.mb")
        .expect_err("or after a non-call should fail");
    assert_eq!(error.kind, ErrorKind::SyntaxError);
}

#[test]
fn yield_inside_a_generator_body_parses() {
    let ast = parse_file("package main\nconst g = gen fun() {\nyield 1\n}");
    match first_value(&ast) {
        Expr::GenFunExpression { function, .. } => match function.as_ref() {
            Expr::AnonymousFunExpression { body, .. } => {
                assert!(matches!(body[0], Stmt::Yield { .. }));
            }
            other => panic!("expected anonymous fun, found {:?}", other),
        },
        other => panic!("expected gen expression, found {:?}", other),
    }
}

#[test]
fn match_self_is_valid_inside_a_match_predicate() {
    let ast = parse_file(
        "package main\nconst label = match (5) {\n(. > 3) {\n1\n}\nbase {\n2\n}\n}",
    );
    match first_value(&ast) {
        Expr::MatchExpression { blocks, base, .. } => {
            assert_eq!(blocks.len(), 1);
            assert!(base.is_some());
            match &blocks[0].predicate {
                Expr::ComparisonExpression { left, .. } => {
                    assert!(matches!(left.as_ref(), Expr::MatchSelfExpression { .. }));
                }
                other => panic!("expected comparison predicate, found {:?}", other),
            }
        }
        other => panic!("expected match expression, found {:?}", other),
    }
}

#[test]
fn instance_literals_accept_generic_arguments() {
    let ast = parse_file("package main\nconst p = Pair<int32> { left: 1, right: 2 }");
    match first_value(&ast) {
        Expr::InstanceLiteral {
            generics, members, ..
        } => {
            assert_eq!(generics.len(), 1);
            assert_eq!(members.len(), 2);
            assert_eq!(members[0].name.value, "left");
        }
        other => panic!("expected instance literal, found {:?}", other),
    }
}

#[test]
fn a_comparison_is_not_mistaken_for_generics() {
    let ast = parse_file("package main\nconst smaller = a < b");
    match first_value(&ast) {
        Expr::ComparisonExpression { operator, .. } => assert_eq!(operator, "<"),
        other => panic!("expected comparison, found {:?}", other),
    }
}

#[test]
fn defer_and_warn_stay_usable_as_identifiers() {
    let ast = parse_file("package main\nconst defer = 1\nconst warn = 2");
    assert_eq!(ast.definitions.len(), 2);
    for definition in &ast.definitions {
        assert!(matches!(definition, Stmt::Declaration { .. }));
    }
}

#[test]
fn defer_statement_wraps_the_deferred_call() {
    let ast = parse_file("package main\nfun main() {\ndefer close()\n}");
    match &ast.definitions[0] {
        Stmt::UnboundFunDefinition { body, .. } => match &body[0] {
            Stmt::Defer { value, .. } => assert!(value.is_call()),
            other => panic!("expected defer statement, found {:?}", other),
        },
        other => panic!("expected fun definition, found {:?}", other),
    }
}

#[test]
fn comments_are_collected_alongside_the_tree() {
    let ast = parse_file("package main\n// the answer\nconst test = 42");
    assert_eq!(ast.comments.len(), 1);
    assert_eq!(ast.comments[0].text, " the answer");
    assert!(!ast.comments[0].multiline);
}

#[test]
fn a_declaration_needs_a_type_or_a_value() {
    let error = parse("package main\nvar dangling", "main.mb")
        .expect_err("bare declaration should fail");
    assert_eq!(error.kind, ErrorKind::SyntaxError);
    assert!(error.reason.contains("dangling"));
}

#[test]
fn bound_functions_carry_their_receiver() {
    let ast = parse_file("package main\nfun for Point scale(factor int32) {\n}");
    match &ast.definitions[0] {
        Stmt::BoundFunDefinition { signature, .. } => {
            assert_eq!(signature.signature.name.value, "scale");
        }
        other => panic!("expected bound fun definition, found {:?}", other),
    }
}
