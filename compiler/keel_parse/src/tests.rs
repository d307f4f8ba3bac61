#![allow(clippy::unwrap_used, clippy::expect_used)]

use keel_diagnostic::ErrorCode;
use keel_ir::{Expr, ExprKind, Name, Position};

use super::*;

fn parse_ok(source: &str) -> Vec<Expr> {
    parse("test.kl", source, &PrecedenceTable::standard())
        .unwrap()
        .statements
}

/// Statements rendered as s-expressions, one per line.
fn sexpr(source: &str) -> String {
    parse_ok(source)
        .iter()
        .map(|stmt| format!("{stmt:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_err(source: &str) -> ParseError {
    parse("test.kl", source, &PrecedenceTable::standard()).unwrap_err()
}

mod operators {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tight_binds_inside_loose() {
        assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(sexpr("1 * 2 + 3"), "(+ (* 1 2) 3)");
    }

    #[test]
    fn equal_precedence_associates_left() {
        assert_eq!(sexpr("a - b - c"), "(- (- a b) c)");
        assert_eq!(sexpr("a / b * c"), "(* (/ a b) c)");
    }

    #[test]
    fn looser_operators_nest_outside() {
        assert_eq!(sexpr("x = a + b == c"), "(= x (== (+ a b) c))");
        assert_eq!(sexpr("a == b + c * d"), "(== a (+ b (* c d)))");
    }

    #[test]
    fn application_binds_between_bands() {
        assert_eq!(sexpr("x = f y + 1"), "(= x (+ (f y) 1))");
        assert_eq!(sexpr("f x * 2 y"), "(f (* x 2) y)");
    }

    #[test]
    fn infix_call_positions() {
        let stmts = parse_ok("a + b");
        let ExprKind::Call { callee, args } = &stmts[0].kind else {
            panic!("expected call, got {:?}", stmts[0]);
        };
        assert_eq!(callee.kind, ExprKind::Ref(Name::new("+")));
        assert_eq!((callee.pos.line, callee.pos.column), (1, 3));
        assert_eq!(stmts[0].pos.column, 1);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn trailing_operator_continues_on_next_line() {
        assert_eq!(sexpr("x = 1 +\n  2\ny"), "(= x (+ 1 2))\ny");
    }

    #[test]
    fn leading_operator_rejected() {
        let err = parse_err("+ 1");
        assert!(matches!(
            err,
            ParseError::MisplacedOperator {
                place: Misplacement::Leading,
                ..
            }
        ));
        assert_eq!(err.code(), ErrorCode::E1005);
    }

    #[test]
    fn trailing_operator_at_end_of_input_rejected() {
        assert!(matches!(
            parse_err("1 +"),
            ParseError::MisplacedOperator {
                place: Misplacement::Trailing,
                ..
            }
        ));
    }

    #[test]
    fn adjacent_operators_rejected() {
        // `+ *` lexes as two symbols only when separated.
        let err = parse_err("1 + * 2");
        let ParseError::MisplacedOperator { symbol, place, pos } = err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(symbol.as_str(), "*");
        assert_eq!(place, Misplacement::Adjacent);
        assert_eq!(pos.column, 5);
    }

    #[test]
    fn unknown_operator_rejected() {
        let err = parse_err("a |> b");
        assert_eq!(
            err,
            ParseError::UnknownOperator {
                pos: Position::new("test.kl".into(), 1, 3),
                symbol: Name::new("|>"),
            }
        );
        assert_eq!(err.code(), ErrorCode::E1004);
    }

    #[test]
    fn custom_table_changes_grouping() {
        let table = PrecedenceTable::new(&[&["*"]], &[&["+"]]).unwrap();
        let program = parse("test.kl", "1 + 2 * 3", &table).unwrap();
        assert_eq!(format!("{:?}", program.statements[0]), "(* (+ 1 2) 3)");
    }
}

mod structure {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn implicit_application() {
        assert_eq!(sexpr("println x 1"), "(println x 1)");
        assert_eq!(sexpr("f (g x) y"), "(f (g x) y)");
        assert_eq!(sexpr("{ x } 1"), "({ x } 1)");
    }

    #[test]
    fn non_callable_head_rejected() {
        let err = parse_err("1 2");
        assert!(matches!(err, ParseError::NotCallable { .. }));
        assert_eq!(err.code(), ErrorCode::E1006);
        assert!(err.to_string().contains("can only call ident, block or call"));
    }

    #[test]
    fn parentheses() {
        assert_eq!(sexpr("()"), "()");
        assert_eq!(sexpr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(sexpr("f ()"), "(f ())");
        assert!(matches!(
            parse_err("(a\nb)"),
            ParseError::MultipleStatements { .. }
        ));
    }

    #[test]
    fn blocks_hold_statements() {
        assert_eq!(sexpr("{\n  x = 5\n\n  x\n}"), "{ (= x 5); x }");
        assert_eq!(sexpr("{}"), "{ }");
    }

    #[test]
    fn blank_lines_and_comments_produce_no_statements() {
        assert_eq!(sexpr("\n\n# comment\na\n\nb\n"), "a\nb");
        assert!(parse_ok("").is_empty());
    }

    #[test]
    fn list_literal_elements() {
        let stmts = parse_ok("[1 2 3]");
        let ExprKind::List(elements) = &stmts[0].kind else {
            panic!("expected list");
        };
        assert_eq!(elements.len(), 3);
        assert_eq!(sexpr("[1, 'a, \"s\"\n  (f x)]"), r#"[1 'a "s" (f x)]"#);
    }

    #[test]
    fn list_elements_do_not_resolve_operators() {
        let err = parse_err("[1 + 2]");
        assert!(matches!(err, ParseError::ExpectedValue { .. }));
        assert_eq!(sexpr("[(1 + 2)]"), "[(+ 1 2)]");
    }

    #[test]
    fn stray_closing_bracket() {
        let err = parse_err("a )");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.position().map(|p| p.column), Some(3));
    }

    #[test]
    fn mismatched_closing_bracket() {
        assert!(matches!(
            parse_err("(a ]"),
            ParseError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn premature_end_of_input() {
        let err = parse_err("{ x = 1\n");
        assert!(matches!(err, ParseError::PrematureEnd { .. }));
        assert_eq!(err.code(), ErrorCode::E1003);
        assert!(matches!(parse_err("[1 2"), ParseError::PrematureEnd { .. }));
    }

    #[test]
    fn lex_errors_pass_through() {
        let err = parse_err("x = \"abc");
        assert!(matches!(err, ParseError::Lex(_)));
        assert_eq!(err.code(), ErrorCode::E0001);
        assert_eq!(err.position().map(|p| p.column), Some(5));
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let depth = 5_000;
        let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(sexpr(&source), "x");
    }

    #[test]
    fn deep_list_nesting_parses_and_drops() {
        let depth = 100_000;
        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let statements = parse_ok(&source);
        assert_eq!(statements.len(), 1);
        drop(statements);
    }

    #[test]
    fn program_keeps_path() {
        let program = parse("dir/main.kl", "a", &PrecedenceTable::standard()).unwrap();
        assert_eq!(&*program.path, "dir/main.kl");
    }
}

mod operator_parser {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(column: u32) -> Position {
        Position::detached(1, column)
    }

    #[test]
    fn empty_run_is_unit() {
        let table = PrecedenceTable::standard();
        let expr = OperatorParser::new(Vec::new(), &table, at(4))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(expr, Expr::unit(at(4)));
    }

    #[test]
    fn single_operand_is_itself() {
        let table = PrecedenceTable::standard();
        let x = Expr::reference("x", at(1));
        let expr = OperatorParser::new(vec![RunItem::Expr(x.clone())], &table, at(1))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(expr, x);
    }
}

mod precedence {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn standard_levels() {
        let table = PrecedenceTable::standard();
        assert_eq!(table.get("*"), Some(1));
        assert_eq!(table.get("+"), Some(-1));
        assert_eq!(table.get("=="), Some(-2));
        assert_eq!(table.get("="), Some(-3));
        assert_eq!(table.get("|>"), None);
        assert_eq!(table.symbols().count(), 13);
    }

    #[test]
    fn duplicate_across_lists_rejected() {
        let err = PrecedenceTable::new(&[&["+"]], &[&["*", "+"]]).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateOperator {
                symbol: Name::new("+")
            }
        );
        assert_eq!(err.code(), ErrorCode::E1008);
        assert!(err.position().is_none());
    }

    fn symbol() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["+", "-", "*", "/", "==", "<", "=", "++", "&&", "|>"])
            .prop_map(String::from)
    }

    fn bands() -> impl Strategy<Value = Vec<Vec<String>>> {
        prop::collection::vec(prop::collection::vec(symbol(), 0..4), 0..4)
    }

    proptest! {
        #[test]
        fn construction_fails_iff_symbol_repeats(lower in bands(), higher in bands()) {
            let all: Vec<&str> = lower
                .iter()
                .chain(&higher)
                .flatten()
                .map(String::as_str)
                .collect();
            let mut unique = all.clone();
            unique.sort_unstable();
            unique.dedup();
            let has_duplicate = unique.len() != all.len();

            let lower_refs: Vec<Vec<&str>> =
                lower.iter().map(|b| b.iter().map(String::as_str).collect()).collect();
            let higher_refs: Vec<Vec<&str>> =
                higher.iter().map(|b| b.iter().map(String::as_str).collect()).collect();
            let lower_slices: Vec<&[&str]> = lower_refs.iter().map(Vec::as_slice).collect();
            let higher_slices: Vec<&[&str]> = higher_refs.iter().map(Vec::as_slice).collect();

            let result = PrecedenceTable::new(&lower_slices, &higher_slices);
            prop_assert_eq!(result.is_err(), has_duplicate);
            if let Ok(table) = result {
                for (i, band) in lower.iter().enumerate() {
                    for sym in band {
                        prop_assert_eq!(table.get(sym), Some(-i32::try_from(i).unwrap() - 1));
                    }
                }
                for (i, band) in higher.iter().enumerate() {
                    for sym in band {
                        prop_assert_eq!(table.get(sym), Some(i32::try_from(i).unwrap() + 1));
                    }
                }
            }
        }
    }
}
