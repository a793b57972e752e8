use cadence_core::{occurrences_in_range, occurs_on, Activity, Frequency};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn activity(start: NaiveDate, frequency: Frequency) -> Activity {
    Activity::new("routine", start, frequency)
}

#[test]
fn no_frequency_occurs_before_start_date() {
    let start = date(2024, 6, 1);
    let frequencies = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::Weekdays,
        Frequency::Weekends,
        Frequency::Unrecognized("bogus-value".to_string()),
    ];

    for frequency in frequencies {
        let subject = activity(start, frequency.clone());
        assert!(
            !occurs_on(&subject, date(2024, 5, 31)),
            "{frequency} must not occur before start"
        );
        assert!(!occurs_on(&subject, date(2023, 6, 1)));
    }
}

#[test]
fn daily_occurs_every_day_from_start() {
    let subject = activity(date(2024, 1, 1), Frequency::Daily);

    assert!(occurs_on(&subject, date(2024, 1, 1)));
    assert!(occurs_on(&subject, date(2024, 1, 2)));
    assert!(occurs_on(&subject, date(2024, 12, 31)));
}

#[test]
fn weekly_occurs_on_whole_week_offsets_only() {
    let subject = activity(date(2024, 1, 1), Frequency::Weekly);

    assert!(occurs_on(&subject, date(2024, 1, 1)));
    assert!(occurs_on(&subject, date(2024, 1, 8)));
    assert!(occurs_on(&subject, date(2024, 1, 15)));
    assert!(!occurs_on(&subject, date(2024, 1, 9)));
    assert!(!occurs_on(&subject, date(2024, 1, 14)));
}

#[test]
fn bi_weekly_occurs_every_fourteen_days() {
    let subject = activity(date(2024, 6, 1), Frequency::BiWeekly);

    assert!(occurs_on(&subject, date(2024, 6, 1)));
    assert!(!occurs_on(&subject, date(2024, 6, 8)));
    assert!(occurs_on(&subject, date(2024, 6, 15)));
    assert!(occurs_on(&subject, date(2024, 6, 29)));
}

#[test]
fn monthly_matches_day_of_month() {
    let subject = activity(date(2024, 1, 15), Frequency::Monthly);

    assert!(occurs_on(&subject, date(2024, 1, 15)));
    assert!(occurs_on(&subject, date(2024, 2, 15)));
    assert!(occurs_on(&subject, date(2025, 7, 15)));
    assert!(!occurs_on(&subject, date(2024, 2, 14)));
}

#[test]
fn monthly_started_on_31st_skips_short_months() {
    let subject = activity(date(2024, 1, 31), Frequency::Monthly);

    // February 2024 has 29 days; there is no day-31 occurrence to clamp to.
    let february = occurrences_in_range(&subject, date(2024, 2, 1), date(2024, 2, 29));
    assert!(february.is_empty());

    let first_half = occurrences_in_range(&subject, date(2024, 1, 1), date(2024, 5, 1));
    assert_eq!(first_half, vec![date(2024, 1, 31), date(2024, 3, 31)]);
}

#[test]
fn weekdays_covers_monday_through_friday() {
    // 2024-03-04 is a Monday.
    let subject = activity(date(2024, 3, 4), Frequency::Weekdays);

    let week = occurrences_in_range(&subject, date(2024, 3, 4), date(2024, 3, 10));
    assert_eq!(
        week,
        vec![
            date(2024, 3, 4),
            date(2024, 3, 5),
            date(2024, 3, 6),
            date(2024, 3, 7),
            date(2024, 3, 8),
        ]
    );
}

#[test]
fn weekends_covers_saturday_and_sunday() {
    let subject = activity(date(2024, 3, 4), Frequency::Weekends);

    let week = occurrences_in_range(&subject, date(2024, 3, 4), date(2024, 3, 10));
    assert_eq!(week, vec![date(2024, 3, 9), date(2024, 3, 10)]);
}

#[test]
fn unrecognized_frequency_never_occurs() {
    let subject = activity(
        date(2024, 1, 1),
        Frequency::parse("bogus-value"),
    );

    assert!(!occurs_on(&subject, date(2024, 1, 1)));
    assert!(!occurs_on(&subject, date(2024, 1, 2)));
    assert!(occurrences_in_range(&subject, date(2024, 1, 1), date(2024, 12, 31)).is_empty());
}

#[test]
fn range_enumeration_equals_brute_force_filter() {
    let subjects = [
        activity(date(2024, 1, 1), Frequency::Daily),
        activity(date(2024, 1, 3), Frequency::Weekly),
        activity(date(2024, 1, 5), Frequency::BiWeekly),
        activity(date(2024, 1, 31), Frequency::Monthly),
        activity(date(2024, 2, 10), Frequency::Weekdays),
        activity(date(2024, 2, 10), Frequency::Weekends),
        activity(date(2024, 1, 1), Frequency::parse("quarterly")),
    ];
    let range_start = date(2023, 12, 15);
    let range_end = date(2024, 4, 15);

    for subject in &subjects {
        let enumerated = occurrences_in_range(subject, range_start, range_end);

        let mut expected = Vec::new();
        let mut cursor = range_start;
        while cursor <= range_end {
            if occurs_on(subject, cursor) {
                expected.push(cursor);
            }
            cursor = cursor.succ_opt().unwrap();
        }

        assert_eq!(enumerated, expected, "mismatch for {}", subject.frequency);
    }
}

#[test]
fn range_bounds_are_inclusive() {
    let subject = activity(date(2024, 1, 1), Frequency::Daily);

    let single = occurrences_in_range(&subject, date(2024, 1, 5), date(2024, 1, 5));
    assert_eq!(single, vec![date(2024, 1, 5)]);

    let pair = occurrences_in_range(&subject, date(2024, 1, 5), date(2024, 1, 6));
    assert_eq!(pair, vec![date(2024, 1, 5), date(2024, 1, 6)]);
}

#[test]
fn reversed_range_yields_no_occurrences() {
    let subject = activity(date(2024, 1, 1), Frequency::Daily);

    let reversed = occurrences_in_range(&subject, date(2024, 2, 1), date(2024, 1, 1));
    assert!(reversed.is_empty());
}

#[test]
fn start_date_weekday_does_not_special_case_weekday_rules() {
    // Start on a Saturday with a weekdays rule: the start date itself is not
    // an occurrence; the following Monday is.
    let subject = activity(date(2024, 3, 9), Frequency::Weekdays);

    assert!(!occurs_on(&subject, date(2024, 3, 9)));
    assert!(!occurs_on(&subject, date(2024, 3, 10)));
    assert!(occurs_on(&subject, date(2024, 3, 11)));
}
