use std::sync::Arc;

use indoc::indoc;

use crate::build::*;
use crate::types::{annotate, type_in_program, type_of};
use crate::{IntRange, NodeRef, OpCode, PathFragment, Spine, Type, parse_program};

fn ty(node: &NodeRef, program: &NodeRef) -> String {
    type_in_program(node, program).to_string()
}

#[test]
fn int_range_arithmetic() {
    let a = IntRange::bounded(-2, 3);
    let b = IntRange::bounded(4, 5);

    assert_eq!(a.add(&b).to_string(), "2..8");
    assert_eq!(a.sub(&b).to_string(), "-7..-1");
    assert_eq!(a.mul(&b).to_string(), "-10..15");
    assert_eq!(a.neg().to_string(), "-3..2");
    assert_eq!(a.union(&b).to_string(), "-2..5");
}

#[test]
fn int_range_unbounded_sides() {
    let open = IntRange::at_least(1);

    assert_eq!(open.to_string(), "1..oo");
    assert_eq!(open.neg().to_string(), "-oo..-1");
    assert_eq!(open.mul(&IntRange::at_least(2)).to_string(), "2..oo");
    assert_eq!(open.mul(&IntRange::constant(0)).to_string(), "0..0");
    assert_eq!(open.union(&IntRange::unbounded()).to_string(), "-oo..oo");
    assert!(open.is_non_negative());
    assert!(!IntRange::unbounded().is_non_negative());
}

#[test]
fn constants() {
    let seven = IntRange::constant(7);
    assert!(seven.is_constant());
    assert_eq!(seven.constant_value().map(|v| v.to_string()), Some("7".into()));
    assert!(Type::Integer(seven).is_constant());
    assert!(!Type::integer(0, 1).is_constant());
    assert!(!Type::Text.is_constant());
}

#[test]
fn literal_types() {
    let program = program(block(vec![]));
    assert_eq!(ty(&int(42), &program), "integer[42..42]");
    assert_eq!(ty(&text("a"), &program), "text");
    assert_eq!(ty(&list(vec![int(1), int(5)]), &program), "list<integer[1..5]>");
    assert_eq!(
        ty(&table(vec![(text("a"), int(1)), (text("b"), int(2))]), &program),
        "table<text, integer[1..2]>"
    );
    assert_eq!(ty(&call("f", vec![]), &program), "integer[-oo..oo]");
}

#[test]
fn identifier_collects_every_assignment() {
    let program = program(block(vec![
        assignment(ident("x"), int(5)),
        assignment(ident("x"), int(10)),
        print(ident("x")),
    ]));

    assert_eq!(ty(&ident("x"), &program), "integer[5..10]");
    assert_eq!(ty(&ident("unbound"), &program), "integer[-oo..oo]");
}

#[test]
fn loop_variables() {
    let program = program(block(vec![
        for_range(Some(ident("i")), int(0), int(10), int(1), print(ident("i"))),
        for_each(
            Some(ident("s")),
            list(vec![text("a"), text("b")]),
            print(ident("s")),
        ),
    ]));

    assert_eq!(ty(&ident("i"), &program), "integer[0..9]");
    assert_eq!(ty(&ident("s"), &program), "text");
}

#[test]
fn self_referencing_assignment_terminates() {
    let program = program(block(vec![
        assignment(ident("x"), int(0)),
        assignment(ident("x"), op(OpCode::Add, vec![ident("x"), int(1)])),
    ]));

    assert_eq!(ty(&ident("x"), &program), "integer[-oo..oo]");
}

#[test]
fn mod_and_rem_ranges() {
    let program = program(block(vec![assignment(ident("x"), int(5))]));
    let x_mod = op(OpCode::Mod, vec![op(OpCode::Neg, vec![ident("x")]), int(4)]);
    let x_rem = op(OpCode::Rem, vec![op(OpCode::Neg, vec![ident("x")]), int(4)]);
    let pos_rem = op(OpCode::Rem, vec![ident("x"), int(4)]);
    let by_unknown = op(OpCode::Mod, vec![ident("x"), call("f", vec![])]);

    assert_eq!(ty(&x_mod, &program), "integer[0..3]");
    assert_eq!(ty(&x_rem, &program), "integer[-3..3]");
    assert_eq!(ty(&pos_rem, &program), "integer[0..3]");
    assert_eq!(ty(&by_unknown, &program), "integer[-oo..oo]");
}

#[test]
fn comparisons_are_boolean() {
    let program = program(block(vec![]));
    let cmp = op(OpCode::Lt, vec![int(1), int(2)]);
    assert_eq!(type_in_program(&cmp, &program), Type::Boolean);
}

#[test]
fn annotation_is_trusted() {
    let program = program(block(vec![]));
    let node = Arc::new((*int(3)).clone().with_ty(Type::integer(0, 100)));
    assert_eq!(ty(&node, &program), "integer[0..100]");
}

#[test]
fn type_of_uses_the_spine_program() {
    let root = program(block(vec![
        assignment(ident("n"), int(2)),
        print(ident("n")),
    ]));
    let spine = Spine::from_program(root)
        .child(PathFragment::Field("body"))
        .child(PathFragment::Index("children", 1))
        .child(PathFragment::Index("args", 0));

    assert_eq!(type_of(spine.node(), &spine).to_string(), "integer[2..2]");
}

#[test]
fn annotate_fills_expression_types() {
    let root = program(block(vec![print(op(OpCode::Add, vec![int(1), int(2)]))]));
    let annotated = annotate(&root);

    let types: Vec<String> = Spine::from_program(annotated)
        .visit(|s| s.node().ty.as_ref().map(|t| format!("{} {t}", s.node().name())))
        .collect();
    assert_eq!(
        types,
        [
            "Op void",
            "Op integer[3..3]",
            "Integer integer[1..1]",
            "Integer integer[2..2]",
        ]
    );
}

#[test]
fn parse_program_reads_json() {
    let json = indoc! {r#"
        {
          "kind": "Program",
          "body": {
            "kind": "Block",
            "children": [
              { "kind": "Op", "op": "print", "args": [{ "kind": "Integer", "value": 5 }] },
              {
                "kind": "Op",
                "op": "println",
                "args": [{ "kind": "Integer", "value": "123456789012345678901234567890n" }]
              }
            ]
          }
        }
    "#};

    let program = parse_program(json).unwrap();
    let values: Vec<String> = Spine::from_program(program)
        .visit(|s| s.node().as_int().map(|v| v.to_string()))
        .collect();
    assert_eq!(values, ["5", "123456789012345678901234567890"]);
}

#[test]
fn parse_program_reads_annotations() {
    let json = r#"{"kind":"Program","body":{"kind":"Identifier","name":"x","ty":{"kind":"integer","low":"0","high":null}}}"#;

    let program = parse_program(json).unwrap();
    let body = program.child(PathFragment::Field("body")).unwrap();
    assert_eq!(body.ty, Some(Type::Integer(IntRange::at_least(0))));
}

#[test]
fn parse_program_rejects_non_program_root() {
    let err = parse_program(r#"{"kind":"Block","children":[]}"#).unwrap_err();
    assert!(
        err.to_string()
            .contains("expected a Program at the root, found Block")
    );
}

#[test]
fn parse_program_rejects_unknown_kind() {
    assert!(parse_program(r#"{"kind":"Goto","label":"x"}"#).is_err());
}
