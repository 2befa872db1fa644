use squeeze_core::build::{assignment, block, ident, int, print, println, program, text};

use super::print::{golf_last_print, println_to_print};
use crate::test_utils::{golfed, rewritten};

#[test]
fn println_appends_a_newline() {
    let p = program(println(text("hi")));

    assert_eq!(
        rewritten(&p, println_to_print().as_ref()),
        "print(text_concat(\"hi\",\"\n\"))"
    );
}

#[test]
fn last_print_switches_to_println() {
    let plugin = golf_last_print(true);

    let p = program(block(vec![print(int(1)), print(int(2))]));
    assert_eq!(golfed(&p, plugin.as_ref()), ["print(1);println(2)"]);

    let single = program(print(int(1)));
    assert_eq!(golfed(&single, plugin.as_ref()), ["println(1)"]);
}

#[test]
fn last_println_switches_to_print() {
    let plugin = golf_last_print(false);

    let p = program(block(vec![println(int(1)), println(int(2))]));
    assert_eq!(golfed(&p, plugin.as_ref()), ["println(1);print(2)"]);
}

#[test]
fn only_a_trailing_print_is_touched() {
    let plugin = golf_last_print(true);

    let p = program(block(vec![print(int(1)), assignment(ident("x"), int(1))]));
    assert!(golfed(&p, plugin.as_ref()).is_empty());
}
