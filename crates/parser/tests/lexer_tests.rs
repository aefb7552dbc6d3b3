use moonbite_parser::{lex, ErrorKind, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source, "main.mb")
        .expect("lexing should succeed")
        .into_iter()
        .map(|token| token.kind)
        .filter(|kind| !kind.is_skippable())
        .collect()
}

#[test]
fn raw_fields_reproduce_the_source() {
    let source = "package main\n\n// entry point\nfun main() {\n\tvar greeting = \"hi \\\"there\\\"\"\n\tfor (greeting != `multi\nline`) {\n\t\tgreeting += 'x'\n\t}\n}\n";
    let tokens = lex(source, "main.mb").expect("lexing should succeed");
    let rebuilt: String = tokens.iter().map(|token| token.raw.as_str()).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn positions_never_move_backwards() {
    let source = "package main\nconst answer = 40 + 2\n// done\n";
    let tokens = lex(source, "main.mb").expect("lexing should succeed");
    for pair in tokens.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        let line_advanced = next.location.start.line > previous.location.start.line;
        let column_advanced = next.location.start.line == previous.location.start.line
            && next.location.start.column >= previous.location.start.column;
        assert!(
            line_advanced || column_advanced,
            "token at {} follows token at {}",
            next.location,
            previous.location
        );
    }
}

#[test]
fn number_literals_follow_the_leading_zero_rule() {
    for valid in ["0", "0.5", "500", "5.0e8", "5.0e+8"] {
        let tokens = lex(valid, "main.mb").expect("lexing should succeed");
        assert_eq!(tokens[0].kind, TokenKind::Number, "source {:?}", valid);
    }
    for invalid in ["05", "007"] {
        let error = lex(invalid, "main.mb").expect_err("leading zero should fail");
        assert_eq!(error.kind, ErrorKind::SyntaxError);
        assert!(error.reason.contains("number"), "reason: {}", error.reason);
    }
}

#[test]
fn a_dangling_exponent_stays_out_of_the_number() {
    // `1.5e` is a float followed by an identifier
    assert_eq!(
        kinds("1.5e"),
        vec![TokenKind::Number, TokenKind::Ident, TokenKind::Eof]
    );
    assert_eq!(
        kinds("1.5e3"),
        vec![TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn string_escapes_are_applied_to_the_literal_only() {
    let tokens = lex("\"a\\\"b\"", "main.mb").expect("lexing should succeed");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].literal, "a\"b");
    assert_eq!(tokens[0].raw, "\"a\\\"b\"");
}

#[test]
fn unterminated_strings_and_comments_fail() {
    let error = lex("\"open", "main.mb").expect_err("unterminated string should fail");
    assert!(error.reason.contains("unterminated string"));

    let error = lex("/* open", "main.mb").expect_err("unterminated comment should fail");
    assert!(error.reason.contains("unterminated comment"));
}

#[test]
fn runes_hold_exactly_one_character() {
    let tokens = lex("'é'", "main.mb").expect("lexing should succeed");
    assert_eq!(tokens[0].kind, TokenKind::Rune);
    assert_eq!(tokens[0].literal, "é");

    let error = lex("'ab'", "main.mb").expect_err("two characters should fail");
    assert!(error.reason.contains("rune"));
}

#[test]
fn comparison_operators_share_a_kind_and_keep_their_literal() {
    let tokens = lex("a <= b", "main.mb").expect("lexing should succeed");
    let operator = tokens
        .iter()
        .find(|token| token.kind == TokenKind::ComparisonOperator)
        .expect("expected a comparison operator");
    assert_eq!(operator.literal, "<=");
}

#[test]
fn soft_keywords_lex_as_identifiers() {
    assert_eq!(
        kinds("warn defer"),
        vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn multiline_strings_count_their_line_breaks() {
    let tokens = lex("`one\ntwo\nthree`", "main.mb").expect("lexing should succeed");
    assert_eq!(tokens[0].kind, TokenKind::MultilineString);
    assert_eq!(tokens[0].newlines, 2);
}
