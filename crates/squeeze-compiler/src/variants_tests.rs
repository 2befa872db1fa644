use std::sync::Arc;

use squeeze_core::build::{block, int, op, print, program, variants};
use squeeze_core::{NodeRef, OpCode};

use crate::test_utils::render;
use crate::variants::expand_variants;

fn rendered(programs: &[NodeRef]) -> Vec<String> {
    programs.iter().map(|p| render(p)).collect()
}

#[test]
fn program_without_variants_is_returned_as_is() {
    let p = program(print(int(1)));

    let expanded = expand_variants(&p);

    assert_eq!(expanded.len(), 1);
    assert!(Arc::ptr_eq(&expanded[0], &p));
}

#[test]
fn cartesian_product_in_declared_order() {
    let p = program(block(vec![
        print(variants(vec![int(1), int(2)])),
        print(variants(vec![int(3), int(4), int(5)])),
    ]));

    let expanded = expand_variants(&p);

    assert_eq!(
        rendered(&expanded),
        [
            "print(1);print(3)",
            "print(1);print(4)",
            "print(1);print(5)",
            "print(2);print(3)",
            "print(2);print(4)",
            "print(2);print(5)",
        ]
    );
}

#[test]
fn nested_variants_resolve_inside_alternatives() {
    let p = program(print(variants(vec![
        op(OpCode::Neg, vec![variants(vec![int(1), int(2)])]),
        int(3),
    ])));

    let expanded = expand_variants(&p);

    assert_eq!(
        rendered(&expanded),
        ["print(neg(1))", "print(neg(2))", "print(3)"]
    );
}

#[test]
fn block_alternative_is_spliced_into_parent_block() {
    let p = program(block(vec![
        print(int(1)),
        variants(vec![block(vec![print(int(2)), print(int(3))]), print(int(4))]),
        print(int(5)),
    ]));

    let expanded = expand_variants(&p);

    assert_eq!(
        rendered(&expanded),
        ["print(1);print(2);print(3);print(5)", "print(1);print(4);print(5)"]
    );
    let squeeze_core::NodeKind::Program { body } = &expanded[0].kind else {
        panic!("expected a program");
    };
    let squeeze_core::NodeKind::Block { children } = &body.kind else {
        panic!("expected a block body");
    };
    assert_eq!(children.len(), 4);
}

#[test]
fn block_alternative_outside_a_block_is_kept() {
    let p = program(variants(vec![block(vec![print(int(1)), print(int(2))])]));

    let expanded = expand_variants(&p);

    assert_eq!(rendered(&expanded), ["print(1);print(2)"]);
}

#[test]
#[should_panic(expected = "Variants node without alternatives at /body/args[0]")]
fn empty_variants_is_a_programming_error() {
    let p = program(print(variants(vec![])));
    expand_variants(&p);
}
