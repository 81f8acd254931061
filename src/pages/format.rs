//! Display helpers shared by the community pages.

use time::OffsetDateTime;

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Avatar fallback letters: first letters of the first and last word, or
/// the first letter of a single word. `"U"` when there is no name.
#[must_use]
pub fn initials(name: Option<&str>) -> String {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return "U".to_string();
    };
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_char = |word: &str| word.chars().next();
    match words.as_slice() {
        [first, .., last] => first_char(first).into_iter().chain(first_char(last)).collect(),
        _ => first_char(name).map(String::from).unwrap_or_default(),
    }
}

/// Human distance between `created_at` and `now`, suffixed "ago" (past) or
/// prefixed "in" (future). An absent timestamp is still pending: "just now".
#[must_use]
pub fn relative_time(created_at: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    let Some(created_at) = created_at else {
        return "just now".to_string();
    };
    let diff = now - created_at;
    let distance = distance_in_words(diff.whole_seconds().unsigned_abs());
    if diff.is_negative() { format!("in {distance}") } else { format!("{distance} ago") }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { format!("1 {unit}") } else { format!("{n} {unit}s") }
}

fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}

fn distance_in_words(seconds: u64) -> String {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
    let minutes = round_div(seconds, 60);

    if minutes < 2 {
        return if minutes == 0 { "less than a minute".into() } else { "1 minute".into() };
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".into();
    }
    if minutes < MINUTES_IN_DAY {
        return format!("about {}", plural(round_div(minutes, MINUTES_IN_HOUR), "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".into();
    }
    if minutes < MINUTES_IN_MONTH {
        return plural(round_div(minutes, MINUTES_IN_DAY), "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return format!("about {}", plural(round_div(minutes, MINUTES_IN_MONTH), "month"));
    }

    let months = minutes / MINUTES_IN_MONTH;
    if months < 12 {
        return plural(round_div(minutes, MINUTES_IN_MONTH), "month");
    }
    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

/// First `max_chars` characters of `text`, cut at a word boundary where
/// possible and ending in an ellipsis when shortened.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end())
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
