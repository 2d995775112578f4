//! End-to-end parses of small programs and queries

use anneal_parser::{parse_program, parse_query, Node, NodeKind, Parser};

#[test]
fn test_fact() {
    let program = parse_program("likes(john, mary).").unwrap();
    assert_eq!(program.children().len(), 1);

    let clause = &program.children()[0];
    assert!(clause.is_fact());
    assert_eq!(
        clause.to_sexpr(),
        r#"(Clause (Predicate (Atom "likes") (TermList (Atom "john") (Atom "mary"))))"#
    );
}

#[test]
fn test_rule() {
    let program = parse_program("likes(john, X) :- likes(mary, X).").unwrap();
    let clause = &program.children()[0];
    assert!(clause.is_rule());

    let head = clause.child(0).unwrap();
    assert_eq!(head.kind(), NodeKind::Predicate);
    assert_eq!(head.text(), Some("likes(john, X)"));

    let body = clause.child(1).unwrap();
    assert_eq!(body.kind(), NodeKind::PredicateList);
    assert_eq!(body.children().len(), 1);
    assert_eq!(body.children()[0].text(), Some("likes(mary, X)"));
}

#[test]
fn test_query() {
    let query = parse_query("?- likes(john, X).").unwrap();
    assert_eq!(query.kind(), NodeKind::Query);
    assert_eq!(query.children().len(), 1);

    let body = query.child(0).unwrap();
    assert_eq!(body.kind(), NodeKind::PredicateList);
    assert_eq!(body.children().len(), 1);
    assert_eq!(body.children()[0].kind(), NodeKind::Predicate);
}

#[test]
fn test_query_without_terminator() {
    let query = parse_query("?- X > 2, foo(X)").unwrap();
    assert_eq!(query.child(0).unwrap().children().len(), 2);
}

#[test]
fn test_arithmetic_predicate() {
    let relation = Parser::new("N is 2 + 3 * 4.").parse_predicate().unwrap().unwrap();
    assert_eq!(relation.kind(), NodeKind::Relation);

    let [left, op, right] = relation.children() else {
        panic!("relation has three children");
    };
    assert_eq!(left.text(), Some("N"));
    assert_eq!(op.kind(), NodeKind::RelationOp);
    assert_eq!(op.text(), Some("is"));
    assert_eq!(right.kind(), NodeKind::AdditiveExpr);
    assert_eq!(right.children()[0].int(), Some(2));
    assert_eq!(right.children()[2].kind(), NodeKind::MultiplicativeExpr);
}

#[test]
fn test_nested_block_comment_is_skipped() {
    let plain = parse_program("likes(john, mary).").unwrap();
    let commented =
        parse_program("/* outer /* inner */ still outer */\nlikes(john, mary).").unwrap();
    assert_eq!(plain.to_sexpr(), commented.to_sexpr());
}

#[test]
fn test_family_program() {
    let source = r#"
% Family relations
parent(tom, bob).
parent(bob, ann).
parent(bob, 'Pat Smith').

/* X is a grandparent of Z
   when X is a parent of some Y who is a parent of Z */
grandparent(X, Z) :-
    parent(X, Y),
    parent(Y, Z).

older(X, Y) :- age(X, A), age(Y, B), A > B.
age(tom, 70).
adult(X) :- age(X, A), A >= 18.
halt.
"#;
    let program = parse_program(source).unwrap();
    assert_eq!(program.children().len(), 8);

    let facts = program.children().iter().filter(|c| c.is_fact()).count();
    let rules = program.children().iter().filter(|c| c.is_rule()).count();
    assert_eq!((facts, rules), (5, 3));

    let older = &program.children()[4];
    let body = older.child(1).unwrap();
    assert_eq!(body.children().len(), 3);
    assert_eq!(body.children()[2].kind(), NodeKind::Relation);
}

#[test]
fn test_arithmetic_program() {
    let source = "double(X, Y) :- Y is X * 2.\n\
                  average(A, B, M) :- M is (A) / 2.\n\
                  diff(A, B, D) :- D is A - B, D /= 0.";
    let program = parse_program(source).unwrap();
    assert_eq!(program.children().len(), 3);

    let average_body = program.children()[1].child(1).unwrap();
    let relation = &average_body.children()[0];
    let quotient = relation.child(2).unwrap();
    assert_eq!(quotient.kind(), NodeKind::MultiplicativeExpr);
    assert_eq!(quotient.child(0).unwrap().kind(), NodeKind::PrimaryExpr);
}

#[test]
fn test_positions() {
    let program = parse_program("a.\n  b(X) :-\n    c(X).").unwrap();
    let second = &program.children()[1];
    assert_eq!((second.location().line, second.location().column), (2, 3));

    let call = second.child(1).unwrap().child(0).unwrap();
    assert_eq!((call.location().line, call.location().column), (3, 5));

    let variable: &Node = call.child(1).unwrap().child(0).unwrap();
    assert_eq!((variable.location().line, variable.location().column), (3, 7));
}

#[test]
fn test_program_surrounding_skip() {
    let program = parse_program("\n\n  % leading\n a. /* trailing */ \n\n").unwrap();
    assert_eq!(program.children().len(), 1);
    assert_eq!(program.location().offset, 0);
}

#[test]
fn test_dump_of_query() {
    let query = parse_query("?- p(1)").unwrap();
    let expected = concat!(
        "Query \"?- p(1)\" @1:1\n",
        "  PredicateList \"p(1)\" @1:4\n",
        "    Predicate \"p(1)\" @1:4\n",
        "      Atom \"p\" @1:4\n",
        "      TermList \"1\" @1:6\n",
        "        Numeral 1 @1:6\n",
    );
    assert_eq!(query.dump(), expected);
}
