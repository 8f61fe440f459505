//! Date operands for date atoms.
//!
//! Accepts absolute `YYYY-MM-DD` dates and a few relative forms resolved
//! against a fixed "today": `today`, `tomorrow`, `yesterday`, weekday names
//! (next occurrence, never today) and `Nd`/`Nw`/`Nm`/`Ny` offsets, which may
//! be negative.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use todotxt_model_rs::models::DATE_FORMAT;

/// Resolves a date operand relative to `today`.
pub fn resolve_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }

    let lower = value.to_lowercase();
    match lower.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if let Some(weekday) = parse_weekday(&lower) {
        let ahead = (7 + weekday.num_days_from_monday() as i64
            - today.weekday().num_days_from_monday() as i64)
            % 7;
        let ahead = if ahead == 0 { 7 } else { ahead };
        return today.checked_add_signed(Duration::days(ahead));
    }

    parse_offset(&lower, today)
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "mo" | "mon" | "monday" => Some(Weekday::Mon),
        "tu" | "tue" | "tuesday" => Some(Weekday::Tue),
        "we" | "wed" | "wednesday" => Some(Weekday::Wed),
        "th" | "thu" | "thursday" => Some(Weekday::Thu),
        "fr" | "fri" | "friday" => Some(Weekday::Fri),
        "sa" | "sat" | "saturday" => Some(Weekday::Sat),
        "su" | "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parses `[-]N(d|w|m|y)`.
fn parse_offset(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let unit = value.chars().last()?;
    let amount: i64 = value[..value.len() - unit.len_utf8()].parse().ok()?;

    match unit {
        'd' => today.checked_add_signed(Duration::try_days(amount)?),
        'w' => today.checked_add_signed(Duration::try_weeks(amount)?),
        'm' => shift_months(today, amount),
        'y' => shift_months(today, amount.checked_mul(12)?),
        _ => None,
    }
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
