//! Property-based tests for the screen state machines.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use smartmoney::core::{State, StateHistory, StateTransition};
use smartmoney::insights::SpendingSummary;
use smartmoney::navigation::{NavigationIntent, RecordingNavigator, Route};
use smartmoney::onboarding::{OnboardingPager, OnboardingState, ONBOARDING_PAGES};
use smartmoney::session::{classify_strength, PasswordStrength, SessionStatus};
use smartmoney::transactions::{
    format_signed, parse_positive_minor, FilterKind, TransactionFilter, TransactionRecord,
    SUBSCRIPTIONS_TAG,
};
use std::sync::Arc;

prop_compose! {
    fn arbitrary_status()(variant in 0..4u8, reason in "[a-z ]{0,12}") -> SessionStatus {
        match variant {
            0 => SessionStatus::Anonymous,
            1 => SessionStatus::Authenticating,
            2 => SessionStatus::Authenticated,
            _ => SessionStatus::Error(reason),
        }
    }
}

prop_compose! {
    fn arbitrary_record()(
        label in "[A-Za-z ]{1,16}",
        subtitle in proptest::option::of("[A-Za-z ]{1,16}"),
        amount_minor in prop_oneof![-1_000_000i64..0, 1..1_000_000i64],
        tag in prop_oneof![
            Just("food".to_string()),
            Just("transport".to_string()),
            Just(SUBSCRIPTIONS_TAG.to_string()),
            Just("income".to_string()),
        ],
        day in 1..28u32,
    ) -> TransactionRecord {
        TransactionRecord {
            label,
            subtitle,
            amount_minor,
            timestamp: Utc.with_ymd_and_hms(2023, 10, day, 12, 0, 0).unwrap(),
            category_tag: tag,
        }
    }
}

fn arbitrary_filter() -> impl Strategy<Value = FilterKind> {
    prop::sample::select(FilterKind::CHIPS.to_vec())
}

proptest! {
    #[test]
    fn short_passwords_are_weak(password in "\\PC{1,5}") {
        prop_assert_eq!(classify_strength(&password), Some(PasswordStrength::Weak));
    }

    #[test]
    fn upper_and_digit_make_long_passwords_strong(
        prefix in "[a-z]{4,20}",
        upper in "[A-Z]",
        digit in "[0-9]",
    ) {
        let password = format!("{prefix}{upper}{digit}");
        prop_assert_eq!(classify_strength(&password), Some(PasswordStrength::Strong));
    }

    #[test]
    fn missing_upper_or_digit_is_medium(password in "[a-z0-9]{6,24}") {
        prop_assert_eq!(classify_strength(&password), Some(PasswordStrength::Medium));
    }

    #[test]
    fn advance_moves_one_page_until_exit(start in 0..ONBOARDING_PAGES) {
        let nav = Arc::new(RecordingNavigator::new());
        let mut pager = OnboardingPager::new(Arc::clone(&nav));
        pager.jump_to(start).unwrap();

        let next = pager.advance();

        if start + 1 < ONBOARDING_PAGES {
            prop_assert_eq!(next, OnboardingState::Page(start + 1));
            prop_assert!(nav.intents().is_empty());
        } else {
            prop_assert_eq!(next, OnboardingState::Exited);
            prop_assert_eq!(nav.intents(), vec![NavigationIntent::Push(Route::SignUp)]);
        }
    }

    #[test]
    fn skip_exits_from_any_page(start in 0..ONBOARDING_PAGES, repeats in 1..4usize) {
        let nav = Arc::new(RecordingNavigator::new());
        let mut pager = OnboardingPager::new(Arc::clone(&nav));
        pager.jump_to(start).unwrap();

        for _ in 0..repeats {
            prop_assert_eq!(pager.skip(), OnboardingState::Exited);
        }
        prop_assert!(pager.current().is_final());
        prop_assert_eq!(nav.intents().len(), 1);
    }

    #[test]
    fn pager_index_never_decreases(steps in prop::collection::vec(0..ONBOARDING_PAGES + 1, 0..12)) {
        let mut pager = OnboardingPager::new(RecordingNavigator::new());
        let mut last = 0usize;

        for target in steps {
            let _ = pager.jump_to(target);
            match pager.index() {
                Some(index) => {
                    prop_assert!(index >= last);
                    last = index;
                }
                None => break,
            }
        }
    }

    #[test]
    fn visible_is_idempotent(
        records in prop::collection::vec(arbitrary_record(), 0..20),
        filter in arbitrary_filter(),
        query in "[A-Za-z ]{0,4}",
    ) {
        let mut state = TransactionFilter::new();
        state.set_filter(filter);
        state.set_query(&query);

        prop_assert_eq!(state.visible(&records), state.visible(&records));
    }

    #[test]
    fn sign_filters_respect_sign(records in prop::collection::vec(arbitrary_record(), 0..20)) {
        let mut state = TransactionFilter::new();

        state.set_filter(FilterKind::Income);
        prop_assert!(state.visible(&records).iter().all(|r| r.amount_minor > 0));

        state.set_filter(FilterKind::Expenses);
        prop_assert!(state.visible(&records).iter().all(|r| r.amount_minor < 0));

        state.set_filter(FilterKind::AiTips);
        prop_assert!(state.visible(&records).is_empty());
    }

    #[test]
    fn visible_preserves_input_order(
        records in prop::collection::vec(arbitrary_record(), 0..20),
        filter in arbitrary_filter(),
    ) {
        let mut state = TransactionFilter::new();
        state.set_filter(filter);

        let visible = state.visible(&records);
        let positions: Vec<usize> = visible
            .iter()
            .filter_map(|v| records.iter().position(|r| std::ptr::eq(r, *v)))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn whole_and_two_digit_amounts_parse_exactly(whole in 0..10_000_000i64, cents in 0..100i64) {
        prop_assume!(whole > 0 || cents > 0);
        let text = format!("{whole}.{cents:02}");

        prop_assert_eq!(parse_positive_minor(&text, 2), Ok(whole * 100 + cents));
    }

    #[test]
    fn formatted_amounts_parse_back(minor in 1..1_000_000_000i64) {
        let rendered = format_signed(minor, "", 2);
        let digits = rendered.trim_start_matches('+').trim();

        prop_assert_eq!(parse_positive_minor(digits, 2), Ok(minor));
    }

    #[test]
    fn non_positive_amounts_are_rejected(value in -1_000_000i64..=0) {
        prop_assert!(parse_positive_minor(&value.to_string(), 2).is_err());
    }

    #[test]
    fn breakdown_sums_to_one_hundred(records in prop::collection::vec(arbitrary_record(), 1..30)) {
        let summary = SpendingSummary::from_records(&records);
        let total: u32 = summary.breakdown.iter().map(|s| u32::from(s.percent)).sum();

        if summary.expenses_minor > 0 {
            prop_assert_eq!(total, 100);
        } else {
            prop_assert!(summary.breakdown.is_empty());
        }
        prop_assert_eq!(summary.net_minor, summary.income_minor - summary.expenses_minor);
    }

    #[test]
    fn history_preserves_order(statuses in prop::collection::vec(arbitrary_status(), 1..10)) {
        let mut history = StateHistory::new();
        let mut expected_path = vec![SessionStatus::Anonymous];

        for (i, to_status) in statuses.iter().enumerate() {
            let from_status = if i == 0 {
                SessionStatus::Anonymous
            } else {
                statuses[i - 1].clone()
            };

            history = history.record(StateTransition::now(from_status, to_status.clone()));
            expected_path.push(to_status.clone());
        }

        let path = history.get_path();
        prop_assert_eq!(path.len(), expected_path.len());

        for (i, status) in path.iter().enumerate() {
            prop_assert_eq!(*status, &expected_path[i]);
        }
    }

    #[test]
    fn history_record_is_pure(from in arbitrary_status(), to in arbitrary_status()) {
        let history = StateHistory::new();

        let new_history = history.record(StateTransition::now(from, to));

        prop_assert_eq!(history.transitions().len(), 0);
        prop_assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn status_roundtrip_serialization(status in arbitrary_status()) {
        let json = serde_json::to_string(&status).unwrap();
        let deserialized: SessionStatus = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(status, deserialized);
    }
}
