//! Property-based tests for the evaluator and the session state machine

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use deskcalc::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any valid digit (0-9)
fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

fn memory_strategy() -> impl Strategy<Value = MemoryOp> {
    prop_oneof![
        Just(MemoryOp::Add),
        Just(MemoryOp::Subtract),
        Just(MemoryOp::Recall),
        Just(MemoryOp::Clear),
    ]
}

/// Generate any action a user could take
fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => digit_strategy().prop_map(Action::Digit),
        1 => Just(Action::Dot),
        2 => operation_strategy().prop_map(Action::Operator),
        1 => Just(Action::Clear),
        1 => Just(Action::Backspace),
        2 => Just(Action::Equals),
        1 => memory_strategy().prop_map(Action::Memory),
        1 => Just(Action::ToggleTheme),
        1 => Just(Action::ToggleHistory),
        1 => Just(Action::ClearHistory),
    ]
}

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Basic), Just(Variant::Extended)]
}

/// A well-formed expression: first operand, then (operator, operand) pairs.
/// Divisors are never zero.
fn expression_strategy() -> impl Strategy<Value = (u32, Vec<(Operation, u32)>)> {
    (
        0u32..10_000,
        prop::collection::vec((operation_strategy(), 1u32..10_000), 0..6),
    )
}

fn render(first: u32, rest: &[(Operation, u32)]) -> String {
    let mut text = first.to_string();
    for (op, n) in rest {
        text.push(op.symbol());
        text.push_str(&n.to_string());
    }
    text
}

/// Reference evaluation: fold each `*`/`/` run left to right, then add the
/// terms left to right.
fn reference(first: u32, rest: &[(Operation, u32)]) -> f64 {
    let mut sum = 0.0;
    let mut pending_sign = 1.0;
    let mut term = f64::from(first);
    for (op, n) in rest {
        let n = f64::from(*n);
        match op {
            Operation::Multiply => term *= n,
            Operation::Divide => term /= n,
            Operation::Add | Operation::Subtract => {
                sum += pending_sign * term;
                pending_sign = if *op == Operation::Add { 1.0 } else { -1.0 };
                term = n;
            }
        }
    }
    sum + pending_sign * term
}

fn press_text(session: &mut Session, text: &str) {
    for ch in text.chars() {
        session.apply(ch.to_string().parse().unwrap());
    }
}

// ===== Evaluator properties =====

proptest! {
    /// Well-formed expressions agree with plain f64 arithmetic
    #[test]
    fn prop_evaluator_matches_f64((first, rest) in expression_strategy()) {
        let text = render(first, &rest);
        let expected = reference(first, &rest);
        let actual = Evaluator::new().evaluate_str(&text).unwrap();
        prop_assert_eq!(actual, expected, "{}", text);
    }

    /// The session shows the formatted result and records exactly one entry
    #[test]
    fn prop_session_display_is_formatted_result((first, rest) in expression_strategy()) {
        let text = render(first, &rest);
        let mut session = Session::new(Variant::Basic);
        press_text(&mut session, &text);
        session.evaluate().unwrap();

        let expected = format_result(reference(first, &rest));
        prop_assert_eq!(session.display(), expected.as_str());
        prop_assert_eq!(session.history().len(), 1);
        prop_assert_eq!(&session.history().latest().unwrap().expression, &text);
    }

    /// Arbitrary alphabet soup never panics and never yields a non-finite value
    #[test]
    fn prop_evaluator_total_on_alphabet(text in "[0-9+\\-*/. ]{0,40}") {
        if let Ok(value) = Evaluator::new().evaluate_str(&text) {
            prop_assert!(value.is_finite());
        }
    }

    /// Anything outside the alphabet is rejected before parsing
    #[test]
    fn prop_foreign_characters_rejected(
        prefix in "[0-9+]{0,5}",
        bad in "[a-zA-Z_()^%!=]",
    ) {
        let text = format!("{prefix}{bad}");
        let first_bad = bad.chars().next().unwrap();
        prop_assert_eq!(
            Evaluator::new().evaluate_str(&text),
            Err(CalcError::InvalidExpression(first_bad))
        );
    }

    /// Formatting never introduces an exponent or leaves the buffer alphabet
    #[test]
    fn prop_format_stays_in_alphabet(value in -1e12f64..1e12f64) {
        prop_assert!(Buffer::is_valid(&format_result(value)));
        prop_assert!(Buffer::is_valid(&format_memory(value)));
    }
}

// ===== Session properties =====

proptest! {
    /// The buffer invariant holds after every action in every variant
    #[test]
    fn prop_buffer_invariant(
        variant in variant_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..80),
    ) {
        let mut session = Session::new(variant);
        for action in actions {
            session.apply(action);
            prop_assert!(Buffer::is_valid(session.display()), "{:?}", session.display());
            prop_assert!(session.history().len() <= 10);
            prop_assert_eq!(session.memory_value().is_some(), variant.has_memory());
        }
    }

    /// History never exceeds ten entries and keeps the newest
    #[test]
    fn prop_history_bound(n in 0usize..30) {
        let mut session = Session::new(Variant::Basic);
        for i in 0..n {
            session.clear();
            press_text(&mut session, &format!("{i}+0"));
            session.evaluate().unwrap();
        }
        prop_assert_eq!(session.history().len(), n.min(10));
        if n > 0 {
            let latest = session.history().latest().unwrap();
            prop_assert_eq!(&latest.result, &(n - 1).to_string());
        }
    }

    /// Clear always returns to "0", whatever came before
    #[test]
    fn prop_clear_resets(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut session = Session::new(Variant::Extended);
        session.apply_all(actions);
        session.apply(Action::Clear);
        prop_assert_eq!(session.display(), "0");
        prop_assert_eq!(session.state(), InputState::Zero);
    }

    /// Toggling twice changes nothing observable
    #[test]
    fn prop_double_toggle_is_identity(
        variant in variant_strategy(),
        actions in prop::collection::vec(action_strategy(), 0..40),
    ) {
        let mut session = Session::new(variant);
        session.apply_all(actions);
        let palette = session.palette();
        let visible = session.history_visible();
        let display = session.display().to_string();

        session.toggle_theme();
        session.toggle_theme();
        session.toggle_history();
        session.toggle_history();

        prop_assert_eq!(session.palette(), palette);
        prop_assert_eq!(session.history_visible(), visible);
        prop_assert_eq!(session.display(), display.as_str());
    }

    /// Failed evaluations never touch the history
    #[test]
    fn prop_failed_evaluation_records_nothing(
        actions in prop::collection::vec(action_strategy(), 0..40),
    ) {
        let mut session = Session::new(Variant::Basic);
        session.apply_all(actions);
        let before = session.history().len();
        if session.evaluate().is_err() {
            prop_assert_eq!(session.display(), "Error");
            prop_assert_eq!(session.history().len(), before);
        }
    }

    /// Memory recall of a number put in with M+ reproduces it
    #[test]
    fn prop_memory_add_recall(n in 0u32..1_000_000) {
        let mut session = Session::new(Variant::Extended);
        press_text(&mut session, &n.to_string());
        session.memory(MemoryOp::Add).unwrap();
        session.clear();
        session.memory(MemoryOp::Recall).unwrap();
        prop_assert_eq!(session.display(), format!("{n}.0"));
    }

    /// Every label parses back to its action
    #[test]
    fn prop_action_label_round_trip(action in action_strategy()) {
        prop_assert_eq!(action.label().parse::<Action>(), Ok(action));
    }
}

// ===== Keypad properties =====

#[cfg(feature = "tui")]
mod keypad {
    use super::*;
    use deskcalc::tui::Keypad;
    use ratatui::layout::Rect;

    proptest! {
        /// Clicking anywhere on a button face hits that button
        #[test]
        fn prop_hit_test_finds_each_button(
            variant in variant_strategy(),
            width in 30u16..120,
            height in 12u16..40,
            dx in 0u16..100,
            dy in 0u16..100,
        ) {
            let keypad = Keypad::new(variant);
            let area = Rect::new(3, 2, width, height);
            let (rows, cols) = keypad.dimensions();
            let w = (width - 2) / cols;
            let h = (height - 2) / rows;

            for btn in keypad.buttons() {
                let x = area.x + 1 + btn.col * w + dx % w;
                let y = area.y + 1 + btn.row * h + dy % h;
                let hit = keypad.hit_test(area, x, y);
                prop_assert_eq!(hit.map(|b| b.action), Some(btn.action));
            }
        }

        /// Every digit and operator has a button in both variants
        #[test]
        fn prop_keypad_covers_entry_keys(
            variant in variant_strategy(),
            d in digit_strategy(),
            op in operation_strategy(),
        ) {
            let keypad = Keypad::new(variant);
            prop_assert!(keypad.find(Action::Digit(d)).is_some());
            prop_assert!(keypad.find(Action::Operator(op)).is_some());
        }

        /// Memory buttons exist exactly in the extended keypad
        #[test]
        fn prop_memory_buttons_match_variant(variant in variant_strategy(), op in memory_strategy()) {
            let keypad = Keypad::new(variant);
            prop_assert_eq!(keypad.find(Action::Memory(op)).is_some(), variant.has_memory());
        }
    }
}

// ===== Invariant tests =====

#[test]
fn invariant_new_session_shows_zero() {
    for variant in Variant::ALL {
        let session = Session::new(variant);
        assert_eq!(session.display(), "0");
        assert_eq!(session.theme(), Theme::Light);
        assert!(session.history_visible());
        assert!(session.history().is_empty());
    }
}

#[test]
fn invariant_documented_examples() {
    let mut session = Session::new(Variant::Extended);
    press_text(&mut session, "2+2=");
    assert_eq!(session.display(), "4");
    assert_eq!(session.history().latest().unwrap().display(), "2+2 = 4");

    session.clear();
    press_text(&mut session, "5/0=");
    assert_eq!(session.display(), "Error");
    assert_eq!(session.history().len(), 1);

    session.clear();
    press_text(&mut session, "7/2=");
    assert_eq!(session.display(), "3.5");
}
