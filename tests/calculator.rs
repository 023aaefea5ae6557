//! Host-level tests for the immediate-evaluate calculator.

use timer_calc::{Calculator, CalculatorEvent, DigitBuffer, Glyph, Key, Operator, format};

const ADD: Key = Key::Operator(Operator::Add);
const SUBTRACT: Key = Key::Operator(Operator::Subtract);
const MULTIPLY: Key = Key::Operator(Operator::Multiply);
const DIVIDE: Key = Key::Operator(Operator::Divide);

/// Presses `keys` in order and returns the last buffer the calculator produced.
fn run(calculator: &mut Calculator, keys: &[Key]) -> Option<DigitBuffer> {
    let mut shown = None;
    for &key in keys {
        if let (_, Some(buffer)) = calculator.handle_key(key) {
            shown = Some(buffer);
        }
    }
    shown
}

fn shows(value: f32) -> Option<DigitBuffer> {
    Some(format(value).expect("test value fits"))
}

#[test]
fn two_plus_three() {
    let mut calculator = Calculator::new();
    let shown = run(&mut calculator, &[Key::Digit(2), ADD, Key::Digit(3), Key::Equals]);
    assert_eq!(shown, shows(5.0));
    assert_eq!(calculator.accumulator(), 5.0);
    assert_eq!(calculator.pending_operator(), None);
    assert!(calculator.is_awaiting_new_operand());
}

#[test]
fn no_precedence() {
    let mut calculator = Calculator::new();
    let shown = run(
        &mut calculator,
        &[Key::Digit(2), ADD, Key::Digit(3), MULTIPLY, Key::Digit(4), Key::Equals],
    );
    assert_eq!(shown, shows(20.0));
}

#[test]
fn operator_shows_running_result() {
    let mut calculator = Calculator::new();
    let shown = run(&mut calculator, &[Key::Digit(9), SUBTRACT, Key::Digit(4), ADD]);
    assert_eq!(shown, shows(5.0));
    assert_eq!(calculator.pending_operator(), Some(Operator::Add));
}

#[test]
fn negative_results() {
    let mut calculator = Calculator::new();
    let shown = run(&mut calculator, &[Key::Digit(3), SUBTRACT, Key::Digit(8), Key::Equals]);
    let buffer = shown.expect("result shown");
    assert!(buffer.is_negative());
    assert_eq!(buffer, format(-5.0).expect("fits"));
}

#[test]
fn fractional_division() {
    let mut calculator = Calculator::new();
    let shown = run(&mut calculator, &[Key::Digit(7), DIVIDE, Key::Digit(2), Key::Equals]);
    assert_eq!(shown, shows(3.5));
}

#[test]
fn small_quotient_keeps_fraction_zeros() {
    let mut calculator = Calculator::new();
    let shown = run(
        &mut calculator,
        &[Key::Digit(1), DIVIDE, Key::Digit(2), Key::Digit(0), Key::Equals],
    )
    .expect("equals shows the result");
    assert_eq!(shown.visible(), [Glyph::Digit(5), Glyph::Digit(0), Glyph::Digit(0)]);
    assert_eq!(shown.decimal_pos(), Some(2));
    assert_eq!(Some(shown), shows(0.05));
}

#[test]
fn divide_by_zero_is_sticky_error() {
    let mut calculator = Calculator::new();
    let shown = run(&mut calculator, &[Key::Digit(5), DIVIDE, Key::Digit(0), Key::Equals]);
    assert_eq!(shown, Some(DigitBuffer::error()));
    assert!(calculator.is_error());

    assert_eq!(calculator.handle_key(ADD), (CalculatorEvent::OperatorRefused, None));
    assert_eq!(calculator.pending_operator(), None);
    assert_eq!(calculator.handle_key(Key::Equals), (CalculatorEvent::Ignored, None));
    assert!(calculator.is_error());
}

#[test]
fn digit_after_error_starts_fresh() {
    let mut calculator = Calculator::new();
    run(&mut calculator, &[Key::Digit(5), DIVIDE, Key::Digit(0), Key::Equals]);
    let (event, shown) = calculator.handle_key(Key::Digit(4));
    assert_eq!(event, CalculatorEvent::DigitEntered);
    assert_eq!(shown, shows(4.0));
    assert!(!calculator.is_error());
    assert_eq!(calculator.pending_operator(), None);

    let shown = run(&mut calculator, &[ADD, Key::Digit(1), Key::Equals]);
    assert_eq!(shown, shows(5.0));
}

#[test]
fn clear_resets_to_zero() {
    let mut calculator = Calculator::new();
    run(&mut calculator, &[Key::Digit(5), DIVIDE, Key::Digit(0), Key::Equals]);
    let (event, shown) = calculator.handle_key(Key::Clear);
    assert_eq!(event, CalculatorEvent::Cleared);
    assert_eq!(shown, Some(DigitBuffer::zero()));
    assert_eq!(calculator, Calculator::new());
}

#[test]
fn equals_after_operator_keeps_result() {
    // The second `+` already evaluated 4 + 2 and left nothing under entry, so `=` has nothing
    // new to apply; the running result stays on the display.
    let mut calculator = Calculator::new();
    let shown = run(
        &mut calculator,
        &[Key::Digit(4), ADD, Key::Digit(2), ADD, Key::Equals],
    );
    assert_eq!(shown, shows(6.0));
    assert_eq!(calculator.accumulator(), 6.0);
    assert_eq!(calculator.pending_operand(), 6.0);
    assert_eq!(calculator.pending_operator(), None);
}

#[test]
fn result_feeds_next_operation() {
    let mut calculator = Calculator::new();
    let shown = run(
        &mut calculator,
        &[Key::Digit(4), ADD, Key::Digit(2), Key::Equals, MULTIPLY, Key::Digit(3), Key::Equals],
    );
    assert_eq!(shown, shows(18.0));
}

#[test]
fn digit_entry_is_capped() {
    let mut calculator = Calculator::new();
    for _ in 0..7 {
        calculator.handle_key(Key::Digit(1));
    }
    assert_eq!(calculator.pending_operand(), 1_111_111.0);
    assert_eq!(
        calculator.handle_key(Key::Digit(1)),
        (CalculatorEvent::DigitRejected, None)
    );
    assert!(!calculator.is_error());
}

#[test]
fn overflowing_result_is_error() {
    let mut calculator = Calculator::new();
    let mut keys = vec![Key::Digit(9); 7];
    keys.extend([MULTIPLY, Key::Digit(9), Key::Equals]);
    let shown = run(&mut calculator, &keys);
    assert_eq!(shown, Some(DigitBuffer::error()));
    assert!(calculator.is_error());
}

#[test]
fn each_digit_is_rendered() {
    let mut calculator = Calculator::new();
    assert_eq!(calculator.handle_key(Key::Digit(1)).1, shows(1.0));
    assert_eq!(calculator.handle_key(Key::Digit(2)).1, shows(12.0));
    assert_eq!(calculator.handle_key(Key::Digit(3)).1, shows(123.0));
}
