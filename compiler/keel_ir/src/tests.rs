use pretty_assertions::assert_eq;

use super::*;

fn at(column: u32) -> Position {
    Position::detached(1, column)
}

#[test]
fn infix_call_renders_as_sexpr() {
    let two_times_three = Expr::call(
        Expr::reference("*", at(7)),
        vec![
            Expr::new(ExprKind::Number(2.into()), at(5)),
            Expr::new(ExprKind::Number(3.into()), at(9)),
        ],
        at(5),
    );
    let sum = Expr::call(
        Expr::reference("+", at(3)),
        vec![Expr::new(ExprKind::Number(1.into()), at(1)), two_times_three],
        at(1),
    );

    assert_eq!(format!("{sum:?}"), "(+ 1 (* 2 3))");
}

#[test]
fn lists_blocks_and_literals_render() {
    let list = Expr::new(
        ExprKind::List(vec![
            Expr::new(ExprKind::Atom(Name::new("a")), at(2)),
            Expr::new(ExprKind::Str("hi".into()), at(5)),
            Expr::unit(at(10)),
        ]),
        at(1),
    );
    assert_eq!(format!("{list:?}"), r#"['a "hi" ()]"#);

    let block = Expr::new(
        ExprKind::Block(vec![Expr::reference("x", at(3)), Expr::reference("y", at(6))]),
        at(1),
    );
    assert_eq!(format!("{block:?}"), "{ x; y }");
    assert_eq!(format!("{:?}", Expr::new(ExprKind::Block(vec![]), at(1))), "{ }");
}

#[test]
fn only_refs_blocks_and_calls_are_callable() {
    assert!(Expr::reference("f", at(1)).is_callable());
    assert!(Expr::new(ExprKind::Block(vec![]), at(1)).is_callable());
    assert!(Expr::call(Expr::reference("f", at(1)), vec![], at(1)).is_callable());
    assert!(!Expr::new(ExprKind::List(vec![]), at(1)).is_callable());
    assert!(!Expr::new(ExprKind::Number(1.into()), at(1)).is_callable());
}

#[test]
fn names_order_by_string() {
    let mut names = vec![Name::new("b"), Name::new("a"), Name::new("ab")];
    names.sort();
    let sorted: Vec<&str> = names.iter().map(Name::as_str).collect();
    assert_eq!(sorted, vec!["a", "ab", "b"]);
}

#[test]
fn position_displays_path_line_column() {
    let pos = Position::new("main.kl".into(), 3, 14);
    assert_eq!(pos.to_string(), "main.kl:3:14");
}

#[test]
fn token_kind_display_is_user_facing() {
    assert_eq!(TokenKind::Close(Bracket::Paren).to_string(), "`)`");
    assert_eq!(TokenKind::Symbol(Name::new("+")).to_string(), "operator `+`");
    assert_eq!(TokenKind::Eol.to_string(), "end of line");
}

fn nested_lists(depth: usize) -> Expr {
    let mut expr = Expr::new(ExprKind::Number(1.into()), at(1));
    for _ in 0..depth {
        expr = Expr::new(ExprKind::List(vec![expr]), at(1));
    }
    expr
}

#[test]
fn deep_tree_drops_without_overflow() {
    let tree = nested_lists(200_000);
    drop(tree);

    let mut call = Expr::reference("f", at(1));
    for _ in 0..200_000 {
        call = Expr::call(call, vec![Expr::unit(at(3))], at(1));
    }
    drop(call);
}

#[test]
fn deep_tree_renders() {
    let rendered = format!("{:?}", nested_lists(50_000));
    assert_eq!(rendered.len(), 100_001);
    assert!(rendered.starts_with("[[[") && rendered.ends_with("1]]]"));
}
