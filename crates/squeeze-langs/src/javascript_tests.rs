use squeeze_compiler::{Error, Golfer};
use squeeze_core::build::*;
use squeeze_core::{NodeRef, OpCode};

use crate::javascript;

fn emit(program: &NodeRef) -> String {
    Golfer::new(javascript()).emit_only(program).unwrap()
}

fn a() -> NodeRef {
    ident("a")
}

fn b() -> NodeRef {
    ident("b")
}

fn x() -> NodeRef {
    ident("x")
}

fn bin(code: OpCode, l: NodeRef, r: NodeRef) -> NodeRef {
    op(code, vec![l, r])
}

#[test]
fn golfs_lowered_arithmetic() {
    let p = program(println(bin(OpCode::Add, int(1), int(2))));

    let compiled = Golfer::new(javascript()).compile_detailed(&p).unwrap();

    insta::assert_snapshot!(compiled.text, @"print(3)");
    assert_eq!(compiled.history, ["fold_constants"]);
    assert_eq!(emit(&p), "print(1+2)");
}

#[test]
fn compound_assignment() {
    let p = program(block(vec![
        assignment(x(), bin(OpCode::Add, x(), int(1))),
        print(x()),
    ]));

    let text = Golfer::new(javascript()).compile(&p).unwrap();

    assert_eq!(text, "x+=1;write(x)");
}

#[test]
fn parenthesizes_by_precedence() {
    let cases = [
        bin(OpCode::Mul, bin(OpCode::Add, a(), b()), x()),
        bin(OpCode::Add, a(), bin(OpCode::Mul, b(), x())),
        bin(OpCode::Sub, a(), bin(OpCode::Sub, b(), x())),
        bin(OpCode::Pow, bin(OpCode::Pow, a(), b()), x()),
        bin(OpCode::Pow, a(), bin(OpCode::Pow, b(), x())),
        bin(OpCode::Pow, op(OpCode::Neg, vec![a()]), int(2)),
        bin(OpCode::Pow, int(-2), int(2)),
        bin(OpCode::Add, conditional(x(), int(1), int(2)), int(3)),
    ];

    let out: Vec<String> = cases.into_iter().map(|e| emit(&program(print(e)))).collect();

    insta::assert_snapshot!(out.join("\n"), @r"
    write((a+b)*x)
    write(a+b*x)
    write(a-(b-x))
    write((a**b)**x)
    write(a**b**x)
    write((-a)**2)
    write((-2)**2)
    write((x?1:2)+3)
    ");
}

#[test]
fn repeated_signs_are_spaced() {
    let p = program(block(vec![
        print(bin(OpCode::Sub, a(), op(OpCode::Neg, vec![b()]))),
        print(bin(OpCode::Sub, a(), int(-1))),
        print(bin(OpCode::Add, a(), int(-1))),
    ]));

    insta::assert_snapshot!(emit(&p), @"write(a- -b);write(a- -1);write(a+-1)");
}

#[test]
fn integer_division() {
    let known = program(print(bin(OpCode::Div, a(), int(2))));
    let unknown = program(print(bin(OpCode::Div, a(), b())));

    assert_eq!(emit(&known), "write(Math.trunc(a/2))");
    assert_eq!(emit(&unknown), "write(Math.floor(a/b))");
}

#[test]
fn modulo() {
    let known = program(print(bin(OpCode::Mod, a(), int(3))));
    let unknown = program(print(bin(OpCode::Mod, a(), b())));

    assert_eq!(emit(&known), "write(a%3)");
    assert_eq!(emit(&unknown), "write((a%b+b)%b)");
}

#[test]
fn literals() {
    let p = program(block(vec![
        print(int(255)),
        print(int(1_000_000_000_000i64)),
        print(text("a\"b")),
        print(text("it's")),
    ]));

    insta::assert_snapshot!(emit(&p), @r#"write(255);write(0xe8d4a51000);write('a"b');write("it's")"#);
}

#[test]
fn loops() {
    let body = block(vec![print(ident("i")), print(text(" "))]);
    let p = program(block(vec![
        for_range(Some(ident("i")), int(0), int(10), int(1), body),
        for_range(Some(ident("i")), int(0), int(10), int(2), print(ident("i"))),
        for_range(None, int(0), int(3), int(1), print(int(1))),
        for_each(Some(ident("c")), text("ab"), print(ident("c"))),
        while_(
            bin(OpCode::Lt, x(), int(3)),
            assignment(x(), bin(OpCode::Add, x(), int(1))),
        ),
    ]));

    insta::assert_snapshot!(emit(&p), @r#"for(i=0;i<10;i++){write(i);write(" ")};for(i=0;i<10;i+=2)write(i);for(_=0;_<3;_++)write(1);for(c of"ab")write(c);while(x<3)x=x+1"#);
}

#[test]
fn conditionals() {
    let chain = if_(
        bin(OpCode::Lt, x(), int(1)),
        block(vec![print(int(1)), print(int(2))]),
        Some(if_(
            bin(OpCode::Lt, x(), int(2)),
            print(int(3)),
            Some(print(int(4))),
        )),
    );
    assert_eq!(
        emit(&program(chain)),
        "if(x<1){write(1);write(2)}else if(x<2)write(3);else write(4)"
    );

    assert_eq!(emit(&program(if_(x(), print(int(1)), None))), "if(x)write(1)");

    let ternary = print(conditional(x(), int(1), int(2)));
    assert_eq!(emit(&program(ternary)), "write(x?1:2)");
}

#[test]
fn inner_if_without_else_keeps_its_braces() {
    let wrapped = if_(
        a(),
        block(vec![if_(b(), print(int(1)), None)]),
        Some(print(int(2))),
    );
    assert_eq!(emit(&program(wrapped)), "if(a){if(b)write(1)}else write(2)");

    let bare = if_(a(), if_(b(), print(int(1)), None), Some(print(int(2))));
    assert_eq!(emit(&program(bare)), "if(a){if(b)write(1)}else write(2)");

    let looped = if_(
        a(),
        while_(x(), if_(b(), print(int(1)), None)),
        Some(print(int(2))),
    );
    assert_eq!(
        emit(&program(looped)),
        "if(a){while(x)if(b)write(1)}else write(2)"
    );

    let closed = if_(a(), if_(b(), print(int(1)), Some(print(int(2)))), Some(print(int(3))));
    assert_eq!(
        emit(&program(closed)),
        "if(a)if(b)write(1);else write(2);else write(3)"
    );
}

#[test]
fn braced_loop_before_else_takes_no_semicolon() {
    let p = program(if_(
        a(),
        while_(
            bin(OpCode::Lt, x(), int(3)),
            block(vec![print(int(1)), print(int(2))]),
        ),
        Some(print(int(3))),
    ));
    assert_eq!(emit(&p), "if(a)while(x<3){write(1);write(2)}else write(3)");

    let table_assignment = program(if_(
        a(),
        assignment(x(), table(vec![(text("a"), int(1))])),
        Some(print(int(2))),
    ));
    assert_eq!(emit(&table_assignment), r#"if(a)x={"a":1};else write(2)"#);
}

#[test]
fn collections() {
    let items = || list(vec![int(1), int(2)]);

    let get = print(op(OpCode::ListGet, vec![items(), int(0)]));
    assert_eq!(emit(&program(get)), "write([1,2][0])");

    let length = print(op(OpCode::ListLength, vec![items()]));
    assert_eq!(emit(&program(length)), "write([1,2].length)");

    let find = print(op(OpCode::ListFind, vec![items(), int(2)]));
    assert_eq!(emit(&program(find)), "write([1,2].indexOf(2))");

    let lookup = print(op(
        OpCode::TableGet,
        vec![table(vec![(text("a"), int(1))]), ident("k")],
    ));
    assert_eq!(emit(&program(lookup)), r#"write(({"a":1})[k])"#);

    let concat = print(op(OpCode::TextConcat, vec![text("a"), ident("s")]));
    assert_eq!(emit(&program(concat)), r#"write("a"+s)"#);
}

#[test]
fn slices() {
    let slice = |step: i64| program(print(range_index_call(ident("xs"), int(1), int(3), int(step))));

    assert_eq!(emit(&slice(1)), "write(xs.slice(1,3))");

    let err = Golfer::new(javascript()).emit_only(&slice(2)).unwrap_err();
    assert_eq!(
        err,
        Error::NoViableCandidate {
            language: "javascript".to_owned(),
            rejected: 1,
        }
    );
}

#[test]
fn declarations_assign_globals() {
    let p = program(block(vec![
        var_declaration(assignment(x(), int(1))),
        print(x()),
    ]));

    assert_eq!(emit(&p), "x=1;write(x)");
}

#[test]
fn single_statement_blocks_are_unwrapped() {
    let p = program(block(vec![print(int(1))]));

    assert_eq!(emit(&p), "write(1)");
}
