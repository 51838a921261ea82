use chrono::NaiveDate;
use peacehub_client::models::DayOfWeek;
use peacehub_client::view;

fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

#[test]
fn day_labels_are_monday_first() {
    assert_eq!(view::day_label(DayOfWeek::Mon), "월");
    assert_eq!(view::day_label(DayOfWeek::Sun), "일");
}

#[test]
fn time_range_uses_24_hour_clock() {
    assert_eq!(
        view::format_time_range(at(2025, 1, 8, 9, 0), at(2025, 1, 8, 11, 0)),
        "09:00-11:00"
    );
    assert_eq!(
        view::format_time_range(at(2025, 1, 8, 18, 30), at(2025, 1, 8, 20, 15)),
        "18:30-20:15"
    );
}

#[test]
fn time_range_renders_midnight_end_as_24() {
    assert_eq!(
        view::format_time_range(at(2025, 1, 8, 22, 0), at(2025, 1, 9, 0, 0)),
        "22:00-24:00"
    );
    // 00:30 is a real next-day time, not an end-of-day marker.
    assert_eq!(
        view::format_time_range(at(2025, 1, 8, 22, 0), at(2025, 1, 9, 0, 30)),
        "22:00-00:30"
    );
}

#[test]
fn task_emoji_has_fixed_fallback() {
    assert_eq!(view::task_emoji("bathroom"), "🚽");
    assert_eq!(view::task_emoji("dishes"), "🍽️");
    assert_eq!(view::task_emoji("window-washing"), "📋");
}

#[test]
fn hour_range_labels_time_of_day() {
    assert_eq!(view::format_hour_range(18, 20), "저녁 6-8시");
    assert_eq!(view::format_hour_range(9, 10), "오전 9-10시");
    assert_eq!(view::format_hour_range(15, 17), "오후 3-5시");
    assert_eq!(view::format_hour_range(22, 23), "밤 10-11시");
}

#[test]
fn month_day_string() {
    assert_eq!(
        view::format_month_day(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()),
        "1/8"
    );
    assert_eq!(
        view::format_month_day(NaiveDate::from_ymd_opt(2025, 11, 22).unwrap()),
        "11/22"
    );
}

#[test]
fn deadline_is_upcoming_sunday_cutoff() {
    // Wednesday 2025-01-08.
    let deadline = view::preference_deadline(at(2025, 1, 8, 12, 0));
    assert_eq!(deadline, at(2025, 1, 12, 23, 59) + chrono::Duration::seconds(59));
}

#[test]
fn deadline_on_sunday_jumps_a_full_week() {
    let deadline = view::preference_deadline(at(2025, 1, 12, 10, 0));
    assert_eq!(
        deadline.date(),
        NaiveDate::from_ymd_opt(2025, 1, 19).unwrap()
    );
}

#[test]
fn time_remaining_counts_days_and_hours() {
    // Wednesday noon: 4 days and ~12 hours to Sunday 23:59:59.
    assert_eq!(view::time_remaining(at(2025, 1, 8, 12, 0)), "D-4일 11시간");
    // Saturday evening.
    assert_eq!(view::time_remaining(at(2025, 1, 11, 20, 0)), "D-1일 3시간");
}
