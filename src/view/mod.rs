//! Display-string projection. Pure formatting over already-computed data;
//! nothing here errors or panics.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::models::DayOfWeek;

/// Korean single-character day label, Monday first.
pub fn day_label(day: DayOfWeek) -> &'static str {
    match day {
        DayOfWeek::Mon => "월",
        DayOfWeek::Tue => "화",
        DayOfWeek::Wed => "수",
        DayOfWeek::Thu => "목",
        DayOfWeek::Fri => "금",
        DayOfWeek::Sat => "토",
        DayOfWeek::Sun => "일",
    }
}

/// "M/D" date string.
pub fn format_month_day(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// "HH:MM-HH:MM" on a 24-hour clock. An end of exactly 00:00 renders as
/// 24:00 (the block runs to midnight).
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let end_hour = if end.hour() == 0 && end.minute() == 0 {
        24
    } else {
        end.hour()
    };

    format!(
        "{:02}:{:02}-{:02}:{:02}",
        start.hour(),
        start.minute(),
        end_hour,
        end.minute()
    )
}

/// Time-of-day bucket label for an hour.
pub fn time_of_day_label(hour: u32) -> &'static str {
    match hour {
        6..=11 => "오전",
        12..=17 => "오후",
        18..=21 => "저녁",
        _ => "밤",
    }
}

/// Hour range in the "저녁 6-8시" style used for recommended task times.
pub fn format_hour_range(start: u32, end: u32) -> String {
    let label = time_of_day_label(start);
    format!("{} {}-{}시", label, clock_hour(start), clock_hour(end))
}

fn clock_hour(hour: u32) -> u32 {
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

/// Emoji for a chore id, with a fixed fallback for unknown chores.
pub fn task_emoji(task_id: &str) -> &'static str {
    match task_id {
        "bathroom" => "🚽",
        "trash" => "🗑️",
        "vacuum" => "🧹",
        "laundry" => "👔",
        "dishes" => "🍽️",
        _ => "📋",
    }
}

/// Preference deadline: the upcoming Sunday at 23:59:59. On a Sunday the
/// deadline is the following week's Sunday.
pub fn preference_deadline(now: NaiveDateTime) -> NaiveDateTime {
    let days_until_sunday = match now.weekday() {
        Weekday::Sun => 7,
        weekday => 7 - weekday.num_days_from_sunday() as i64,
    };

    let cutoff = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (now.date() + Duration::days(days_until_sunday)).and_time(cutoff)
}

/// Remaining time until the preference deadline, as shown next to the
/// submission form.
pub fn time_remaining(now: NaiveDateTime) -> String {
    let remaining = preference_deadline(now) - now;

    if remaining <= Duration::zero() {
        return "마감됨".to_string();
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours() - days * 24;

    if days > 0 {
        format!("D-{}일 {}시간", days, hours)
    } else {
        format!("{}시간 남음", hours)
    }
}
