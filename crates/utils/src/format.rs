//! Presentation helpers for amounts, hours and dates.

use chrono::{DateTime, Duration, Utc};

/// Format an amount the way the dashboard shows money, e.g. `€12,345.00`.
///
/// Currencies without a known symbol are prefixed with their code.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{sign}{}{}.{:02}",
        currency_prefix(currency),
        group_thousands(cents / 100),
        cents % 100
    )
}

fn currency_prefix(currency: &str) -> String {
    match currency.to_ascii_uppercase().as_str() {
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{} ", other),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole hours, rounding half away from zero
pub fn format_whole_hours(hours: f64) -> String {
    format!("{}", hours.round() as i64)
}

/// One decimal place, formatted from the stored value.
///
/// Only exact binary ties (`x.25`, `x.75`) are rounded away from zero, so
/// `8.25` reads `8.3` while `0.15`, stored just below the tie, reads `0.1`.
pub fn format_one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    let exact_tie = quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0;
    if exact_tie {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// `15 Mar 2025`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Short relative label: "Today", "Tomorrow", "In 3 days", "2 days ago", or a date
/// once the distance exceeds a week.
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = date - now;
    let day_ms = Duration::days(1).num_milliseconds();
    let diff_ms = diff.num_milliseconds();
    // ceiling division, so anything later today counts as "in 1 day" like the web UI
    let diff_days = diff_ms.div_euclid(day_ms) + i64::from(diff_ms.rem_euclid(day_ms) != 0);

    match diff_days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=7 => format!("In {} days", diff_days),
        -7..=-2 => format!("{} days ago", -diff_days),
        _ => format_date(date),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_currency_eur() {
        assert_eq!(format_currency(12345.0, "EUR"), "€12,345.00");
        assert_eq!(format_currency(40000.5, "EUR"), "€40,000.50");
        assert_eq!(format_currency(999.999, "EUR"), "€1,000.00");
        assert_eq!(format_currency(0.0, "EUR"), "€0.00");
    }

    #[test]
    fn test_format_currency_other_codes() {
        assert_eq!(format_currency(1234567.0, "usd"), "$1,234,567.00");
        assert_eq!(format_currency(-250.0, "GBP"), "-£250.00");
        assert_eq!(format_currency(100.0, "CHF"), "CHF 100.00");
    }

    #[test]
    fn test_format_whole_hours_rounds_half_up() {
        assert_eq!(format_whole_hours(329.5), "330");
        assert_eq!(format_whole_hours(329.4), "329");
        assert_eq!(format_whole_hours(0.0), "0");
    }

    #[test]
    fn test_format_one_decimal() {
        assert_eq!(format_one_decimal(8.25), "8.3");
        assert_eq!(format_one_decimal(10.526), "10.5");
        assert_eq!(format_one_decimal(3.0), "3.0");
    }

    #[test]
    fn test_format_one_decimal_rounds_only_exact_ties_up() {
        assert_eq!(format_one_decimal(0.15), "0.1");
        assert_eq!(format_one_decimal(0.05), "0.1");
        assert_eq!(format_one_decimal(2.75), "2.8");
        assert_eq!(format_one_decimal(-8.25), "-8.3");
        assert_eq!(format_one_decimal(0.5), "0.5");
    }

    #[test]
    fn test_format_relative_date() {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(format_relative_date(now, now), "Today");
        assert_eq!(
            format_relative_date(now + Duration::hours(20), now),
            "Tomorrow"
        );
        assert_eq!(
            format_relative_date(now - Duration::days(1), now),
            "Yesterday"
        );
        assert_eq!(
            format_relative_date(now + Duration::days(3), now),
            "In 3 days"
        );
        assert_eq!(
            format_relative_date(now - Duration::days(5), now),
            "5 days ago"
        );
        assert_eq!(
            format_relative_date(now + Duration::days(30), now),
            "14 Apr 2025"
        );
    }
}
