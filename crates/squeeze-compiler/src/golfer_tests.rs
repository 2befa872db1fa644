use squeeze_core::build::{int, op, print, program, text, variants};
use squeeze_core::{NodeRef, OpCode};

use crate::Error;
use crate::golfer::{GolfConfig, Golfer};
use crate::phases::Phase;
use crate::plugins::arithmetic::fold_constants;
use crate::plugins::ops::map_to_calls;
use crate::test_utils::TestLang;

fn add_1_2() -> NodeRef {
    program(print(op(OpCode::Add, vec![int(1), int(2)])))
}

fn plus_phase() -> Phase {
    Phase::new(vec![map_to_calls(&[(OpCode::Add, "plus")])])
}

#[test]
fn compiles_to_shortest_text() {
    let golfer = Golfer::new(TestLang::new().golf(fold_constants()).into_lang());

    let compiled = golfer.compile_detailed(&add_1_2()).unwrap();

    assert_eq!(compiled.text, "print(3)");
    assert_eq!(compiled.variant, 0);
    assert_eq!(compiled.variants, 1);
    assert_eq!(compiled.history, ["fold_constants"]);
    assert_eq!(compiled.explored, 2);
    assert_eq!(compiled.rejected, 0);
}

#[test]
fn phases_run_before_the_search() {
    let lang = TestLang::new()
        .phase(plus_phase())
        .golf(fold_constants())
        .into_lang();

    let text = Golfer::new(lang).compile(&add_1_2()).unwrap();

    assert_eq!(text, "print(plus(1,2))");
}

#[test]
fn emit_plugins_only_touch_the_emitted_candidate() {
    let lang = TestLang::new()
        .golf(fold_constants())
        .emit_plugin(map_to_calls(&[(OpCode::Add, "plus")]))
        .into_lang();
    let golfer = Golfer::new(lang);

    assert_eq!(golfer.compile(&add_1_2()).unwrap(), "print(3)");
    assert_eq!(golfer.emit_only(&add_1_2()).unwrap(), "print(plus(1,2))");
}

#[test]
fn shortest_variant_wins() {
    let golfer = Golfer::new(TestLang::new().into_lang());
    let choice = program(print(variants(vec![text("long"), int(7)])));

    let compiled = golfer.compile_detailed(&choice).unwrap();

    assert_eq!(compiled.text, "print(7)");
    assert_eq!(compiled.variant, 1);
    assert_eq!(compiled.variants, 2);
}

#[test]
fn ties_go_to_the_first_variant() {
    let choice = program(print(variants(vec![int(1), int(2), int(3)])));

    for parallel in [false, true] {
        let golfer = Golfer::new(TestLang::new().into_lang()).with_parallel_variants(parallel);
        let compiled = golfer.compile_detailed(&choice).unwrap();
        assert_eq!(compiled.text, "print(1)");
        assert_eq!(compiled.variant, 0);
    }
}

#[test]
fn rejected_variant_is_skipped() {
    let golfer = Golfer::new(TestLang::new().into_lang());
    let choice = program(print(variants(vec![text("\""), int(1)])));

    let compiled = golfer.compile_detailed(&choice).unwrap();

    assert_eq!(compiled.text, "print(1)");
    assert_eq!(compiled.variant, 1);
    assert_eq!(compiled.rejected, 1);
}

#[test]
fn no_viable_candidate() {
    let golfer = Golfer::new(TestLang::new().into_lang());
    let quoted = program(print(text("\"")));

    let err = golfer.compile(&quoted).unwrap_err();

    assert_eq!(
        err,
        Error::NoViableCandidate {
            language: "test".to_owned(),
            rejected: 1,
        }
    );
    insta::assert_snapshot!(err, @"no viable output for test: all 1 candidates were rejected");
    assert_eq!(golfer.emit_only(&quoted).unwrap_err(), err);
}

#[test]
fn identity_language_skips_phases_and_variants() {
    let lang = TestLang::identity().phase(plus_phase()).into_lang();
    let golfer = Golfer::new(lang);

    assert_eq!(golfer.compile(&add_1_2()).unwrap(), "print(add(1,2))");

    // variants stay in place and reach the emitter unresolved
    let choice = program(print(variants(vec![int(1), int(2)])));
    let err = golfer.compile(&choice).unwrap_err();
    insta::assert_snapshot!(err, @"cannot emit node of kind Variants");
}

#[test]
fn emit_only_applies_phases_without_searching() {
    let lang = TestLang::new()
        .phase(plus_phase())
        .golf(fold_constants())
        .into_lang();
    let golfer = Golfer::new(lang);
    let nested = program(print(op(
        OpCode::Mul,
        vec![op(OpCode::Add, vec![int(1), int(2)]), int(3)],
    )));

    assert_eq!(golfer.emit_only(&nested).unwrap(), "print(mul(plus(1,2),3))");
}

#[test]
fn step_budget_is_forwarded() {
    let golfer = Golfer::new(TestLang::new().golf(fold_constants()).into_lang())
        .with_config(GolfConfig {
            max_steps: Some(0),
            ..GolfConfig::default()
        });

    let compiled = golfer.compile_detailed(&add_1_2()).unwrap();

    assert_eq!(compiled.text, "print(add(1,2))");
    assert_eq!(compiled.explored, 0);
    assert_eq!(golfer.config().max_steps, Some(0));
}
