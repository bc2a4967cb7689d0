//! Invariants of the dating pipeline, checked over generated dates.

use chrono::NaiveDate;
use proptest::prelude::*;

use gestation_core::dates::{days_between, shift_days, GESTATION_LENGTH_DAYS};
use gestation_core::{
    compute_gestational_timeline, AssistedTransferInput, ConceptionInput, DatingError, DatingMethod,
    EngineSettings, ImagingEstimateInput, MenstrualPeriodInput, Timeline, Trimester, DEFAULT_MILESTONES,
};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

/// Dates spread across several decades, leap years included
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| shift_days(base(), offset).unwrap())
}

fn any_method() -> impl Strategy<Value = DatingMethod> {
    prop_oneof![
        (any_date(), 15i64..=45)
            .prop_map(|(d, cycle)| DatingMethod::from(MenstrualPeriodInput::new(d).with_cycle_length(cycle))),
        any_date().prop_map(|d| DatingMethod::from(ConceptionInput::new(d))),
        (any_date(), 0i64..=42, 0i64..=6)
            .prop_map(|(d, w, days)| DatingMethod::from(ImagingEstimateInput::new(d, w, days))),
        (any_date(), prop_oneof![Just(3i64), Just(5i64)])
            .prop_map(|(d, age)| DatingMethod::from(AssistedTransferInput::new(d, age))),
    ]
}

proptest! {
    #[test]
    fn prop_lmp_and_conception_share_anchor(lmp in any_date(), cycle in 15i64..=45, after in 0i64..400) {
        let as_of = shift_days(lmp, after).unwrap();
        let lmp_method: DatingMethod = MenstrualPeriodInput::new(lmp).with_cycle_length(cycle).into();
        let from_lmp = compute_gestational_timeline(&lmp_method, as_of).unwrap();
        let conception = shift_days(lmp, 14).unwrap();
        let from_conception = compute_gestational_timeline(&ConceptionInput::new(conception).into(), as_of).unwrap();

        prop_assert_eq!(from_lmp.anchor.anchor_date, from_conception.anchor.anchor_date);
        prop_assert_eq!(from_lmp.timeline, from_conception.timeline);
        prop_assert_eq!(days_between(lmp, from_lmp.anchor.conception_date), cycle - 14);
    }

    #[test]
    fn prop_due_date_is_280_days_after_anchor(method in any_method(), after in 0i64..400) {
        let settings = EngineSettings::default();
        let anchor = method.resolve_anchor(&settings).unwrap().anchor_date;
        let as_of = shift_days(anchor, after).unwrap();
        let report = compute_gestational_timeline(&method, as_of).unwrap();

        prop_assert_eq!(days_between(anchor, report.timeline.projected_completion_date), GESTATION_LENGTH_DAYS);
    }

    #[test]
    fn prop_elapsed_days_decompose(anchor in any_date(), elapsed in 0i64..2_000) {
        let as_of = shift_days(anchor, elapsed).unwrap();
        let timeline = Timeline::calculate(anchor, as_of).unwrap();

        prop_assert_eq!(timeline.elapsed_days, elapsed);
        prop_assert!(timeline.current_day_of_week <= 6);
        prop_assert_eq!(
            i64::from(timeline.current_week) * 7 + i64::from(timeline.current_day_of_week),
            timeline.elapsed_days
        );
        prop_assert!((0.0..=100.0).contains(&timeline.percent_complete));
    }

    #[test]
    fn prop_advancing_as_of_is_monotone(anchor in any_date(), a in 0i64..400, step in 0i64..100) {
        let method: DatingMethod = MenstrualPeriodInput::new(anchor).into();
        let earlier = compute_gestational_timeline(&method, shift_days(anchor, a).unwrap()).unwrap();
        let later = compute_gestational_timeline(&method, shift_days(anchor, a + step).unwrap()).unwrap();

        prop_assert!(later.timeline.current_week >= earlier.timeline.current_week);
        prop_assert!(later.timeline.percent_complete >= earlier.timeline.percent_complete);
        prop_assert!(later.trimester >= earlier.trimester);
        for (before, after) in earlier.milestones.iter().zip(&later.milestones) {
            prop_assert!(!before.reached || after.reached);
        }
    }

    #[test]
    fn prop_day3_anchor_two_days_after_day5(transfer in any_date()) {
        let settings = EngineSettings::default();
        let day3 = AssistedTransferInput::new(transfer, 3).resolve(&settings).unwrap();
        let day5 = AssistedTransferInput::new(transfer, 5).resolve(&settings).unwrap();

        prop_assert_eq!(days_between(day5.anchor_date, day3.anchor_date), 2);
    }

    #[test]
    fn prop_anchor_after_as_of_is_rejected(method in any_method(), before in 1i64..400) {
        let settings = EngineSettings::default();
        let anchor = method.resolve_anchor(&settings).unwrap().anchor_date;
        let as_of = shift_days(anchor, -before).unwrap();

        let is_invalid_timeline = matches!(
            compute_gestational_timeline(&method, as_of),
            Err(DatingError::InvalidTimeline { .. })
        );
        prop_assert!(is_invalid_timeline);
    }

    #[test]
    fn prop_oversized_imaging_age_is_out_of_range(scan in any_date(), weeks in 43i64..10_000, days in 0i64..=6) {
        let err = ImagingEstimateInput::new(scan, weeks, days)
            .resolve(&EngineSettings::default())
            .unwrap_err();
        prop_assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn prop_milestone_list_never_truncated(anchor in any_date(), elapsed in 0i64..400) {
        let as_of = shift_days(anchor, elapsed).unwrap();
        let report = compute_gestational_timeline(&MenstrualPeriodInput::new(anchor).into(), as_of).unwrap();

        prop_assert_eq!(report.milestones.len(), DEFAULT_MILESTONES.len());
        for status in &report.milestones {
            prop_assert_eq!(status.reached, report.timeline.current_week >= status.milestone.trigger_week);
        }
    }
}

#[test]
fn trimester_boundaries() {
    assert_eq!(Trimester::from_week(13), Trimester::First);
    assert_eq!(Trimester::from_week(14), Trimester::Second);
    assert_eq!(Trimester::from_week(27), Trimester::Second);
    assert_eq!(Trimester::from_week(28), Trimester::Third);
}

#[test]
fn trimester_follows_timeline_at_boundaries() {
    let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let method: DatingMethod = MenstrualPeriodInput::new(anchor).into();
    let at = |days: i64| {
        compute_gestational_timeline(&method, shift_days(anchor, days).unwrap())
            .unwrap()
            .trimester
    };

    assert_eq!(at(13 * 7 + 6), Trimester::First);
    assert_eq!(at(14 * 7), Trimester::Second);
    assert_eq!(at(27 * 7 + 6), Trimester::Second);
    assert_eq!(at(28 * 7), Trimester::Third);
}

#[test]
fn concrete_lmp_scenario() {
    let method: DatingMethod = MenstrualPeriodInput::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .with_cycle_length(28)
        .into();
    let report = compute_gestational_timeline(&method, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap()).unwrap();

    assert_eq!(report.timeline.elapsed_days, 21);
    assert_eq!(report.timeline.current_week, 3);
    assert_eq!(report.timeline.current_day_of_week, 0);
    assert_eq!(report.trimester, Trimester::First);
    assert_eq!(report.timeline.projected_completion_date, NaiveDate::from_ymd_opt(2024, 10, 7).unwrap());
}

#[test]
fn concrete_ivf_scenario() {
    let resolved = AssistedTransferInput::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 5)
        .resolve(&EngineSettings::default())
        .unwrap();
    let timeline = Timeline::calculate(resolved.anchor_date, resolved.anchor_date).unwrap();

    assert_eq!(resolved.anchor_date, NaiveDate::from_ymd_opt(2024, 2, 11).unwrap());
    assert_eq!(timeline.projected_completion_date, NaiveDate::from_ymd_opt(2024, 11, 17).unwrap());
}
