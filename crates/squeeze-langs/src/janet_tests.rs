use squeeze_compiler::{EmitError, Error, Golfer};
use squeeze_core::build::*;
use squeeze_core::{NodeRef, OpCode};

use crate::janet;

fn emit(program: &NodeRef) -> String {
    Golfer::new(janet()).emit_only(program).unwrap()
}

fn x() -> NodeRef {
    ident("x")
}

fn lt(a: NodeRef, b: NodeRef) -> NodeRef {
    op(OpCode::Lt, vec![a, b])
}

#[test]
fn golfs_arithmetic_and_last_print() {
    let p = program(println(op(OpCode::Add, vec![int(1), int(2)])));

    let compiled = Golfer::new(janet()).compile_detailed(&p).unwrap();

    insta::assert_snapshot!(compiled.text, @"(prin 3)");
    assert_eq!(emit(&p), "(print(+ 1 2))");
}

#[test]
fn text_literals_pick_the_shortest_quoting() {
    let cases = ["a\"b", "`", "", "\n", " "];

    let out: Vec<String> = cases
        .into_iter()
        .map(|s| emit(&program(print(text(s)))))
        .collect();

    assert_eq!(
        out,
        [
            "(prin `a\"b`)",
            "(prin \"`\")",
            "(prin \"\")",
            "(prin \"\\n\")",
            "(prin \" \")",
        ]
    );
}

#[test]
fn integer_literals_pick_the_shortest_base() {
    let p = program(block(vec![
        print(int(255)),
        print(int(1_000_000_000_000i64)),
        print(int(-4096)),
    ]));

    insta::assert_snapshot!(emit(&p), @"(prin 255)(prin 36rcre66i9s)(prin -4096)");
}

#[test]
fn loops() {
    let body = block(vec![print(ident("i")), print(text(" "))]);
    let p = program(block(vec![
        for_range(Some(ident("i")), int(0), int(10), int(1), body),
        for_range(Some(ident("i")), int(0), int(10), int(2), print(ident("i"))),
        for_range(None, int(0), int(3), int(1), print(int(1))),
        for_each(Some(ident("c")), text("ab"), print(ident("c"))),
        while_(lt(x(), int(3)), assignment(x(), op(OpCode::Add, vec![x(), int(1)]))),
    ]));

    insta::assert_snapshot!(emit(&p), @r#"(for i 0 10(prin i)(prin " "))(loop[i :range[0 10 2]](prin i))(for _ 0 3(prin 1))(each c "ab"(prin c))(while(< x 3)(set x(+ x 1)))"#);
}

#[test]
fn conditionals() {
    let chain = if_(
        lt(x(), int(1)),
        block(vec![print(int(1)), print(int(2))]),
        Some(if_(lt(x(), int(2)), print(int(3)), Some(print(int(4))))),
    );
    assert_eq!(
        emit(&program(chain)),
        "(cond(< x 1)(do(prin 1)(prin 2))(< x 2)(prin 3)(prin 4))"
    );

    assert_eq!(emit(&program(if_(x(), print(int(1)), None))), "(if x(prin 1))");

    let ternary = print(conditional(x(), int(1), int(2)));
    assert_eq!(emit(&program(ternary)), "(prin(if x 1 2))");
}

#[test]
fn collections() {
    let get = print(op(OpCode::ListGet, vec![list(vec![int(1), int(2)]), int(0)]));
    assert_eq!(emit(&program(get)), "(prin(in @[1 2]0))");

    let literal = print(table(vec![(text("a"), int(1))]));
    assert_eq!(emit(&program(literal)), r#"(prin @{"a" 1})"#);

    let lookup = print(op(
        OpCode::TableGet,
        vec![
            table(vec![(text("a"), int(1)), (text("b"), int(2))]),
            ident("k"),
        ],
    ));
    assert_eq!(
        emit(&program(lookup)),
        r#"(prin(in @[1 2](index-of k @["a" "b"])))"#
    );
}

#[test]
fn slices() {
    let slice = |low: i64, step: i64| {
        program(print(range_index_call(ident("xs"), int(low), int(3), int(step))))
    };

    assert_eq!(emit(&slice(0, 1)), "(prin(take 3 xs))");
    assert_eq!(emit(&slice(1, 1)), "(prin(slice xs 1 3))");

    let err = Golfer::new(janet()).emit_only(&slice(0, 2)).unwrap_err();
    assert_eq!(
        err,
        Error::NoViableCandidate {
            language: "janet".to_owned(),
            rejected: 1,
        }
    );
}

#[test]
fn declarations() {
    let p = program(block(vec![
        var_declaration(assignment(x(), int(1))),
        assignment(x(), int(2)),
    ]));
    assert_eq!(emit(&p), "(var x 1)(set x 2)");

    let bad = program(var_declaration(int(1)));
    assert!(Golfer::new(janet()).emit_only(&bad).is_err());
}

#[test]
fn infix_nodes_are_unsupported() {
    let p = program(print(binary_op(OpCode::Add, "+", 10, false, int(1), int(2))));

    let err = Golfer::new(janet()).compile(&p).unwrap_err();

    assert_eq!(err, Error::Emit(EmitError::Unsupported { kind: "BinaryOp" }));
}
