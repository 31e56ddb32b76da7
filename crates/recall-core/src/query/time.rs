//! Time expression extraction.
//!
//! Resolves relative ("yesterday", "2 weeks ago") and absolute (ISO date)
//! phrases to half-open windows anchored at the request time. Pure:
//! identical (text, now) always yields the identical window.

use std::ops::Range;

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::TimeWindow;

/// A resolved time expression with the byte span it occupied in the
/// (lowercased) query text.
#[derive(Debug, Clone)]
pub struct TimeMatch {
    pub window: TimeWindow,
    pub span: Range<usize>,
}

static RELATIVE_AGO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,3}|a|an|one|two|three|four|five|six|seven|eight|nine|ten)\s+(hour|day|week|month)s?\s+ago\b")
        .unwrap()
});

static NAMED_DAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(yesterday|today)\b").unwrap());

static LAST_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\blast\s+(week|month)\b").unwrap());

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

/// Extract the winning time expression from lowercased query text.
///
/// When several expressions are present, the most specific (narrowest
/// resolved window) wins; ties go to the last occurrence. This is the
/// documented deterministic default for ambiguous queries.
pub fn extract_time(lower: &str, now: DateTime<Utc>) -> Option<TimeMatch> {
    pick_winner(find_all(lower, now))
}

/// Find every time expression in lowercased query text, losers included.
/// The parser strips all of their spans from the topic tokens, not just
/// the winner's.
pub fn find_all(lower: &str, now: DateTime<Utc>) -> Vec<TimeMatch> {
    let mut matches = Vec::new();

    for cap in RELATIVE_AGO.captures_iter(lower) {
        let whole = cap.get(0).unwrap();
        let n = parse_count(cap.get(1).unwrap().as_str());
        let unit = unit_duration(cap.get(2).unwrap().as_str());
        // An expression like "2 weeks ago" denotes a unit-wide window:
        // [now - 2w, now - 1w).
        let from = now - unit * n;
        matches.push(TimeMatch {
            window: TimeWindow::new(from, from + unit),
            span: whole.range(),
        });
    }

    for m in NAMED_DAY.find_iter(lower) {
        let midnight = midnight_of(now);
        let window = match m.as_str() {
            "yesterday" => TimeWindow::new(midnight - Duration::days(1), midnight),
            _ => TimeWindow::new(midnight, midnight + Duration::days(1)),
        };
        matches.push(TimeMatch {
            window,
            span: m.range(),
        });
    }

    for cap in LAST_UNIT.captures_iter(lower) {
        let whole = cap.get(0).unwrap();
        let unit = unit_duration(cap.get(1).unwrap().as_str());
        // "last week" reads as "1 week ago": the unit-wide window one
        // unit back from now.
        let from = now - unit * 2;
        matches.push(TimeMatch {
            window: TimeWindow::new(from, from + unit),
            span: whole.range(),
        });
    }

    for cap in ISO_DATE.captures_iter(lower) {
        let whole = cap.get(0).unwrap();
        let (Ok(y), Ok(m), Ok(d)) = (
            cap[1].parse::<i32>(),
            cap[2].parse::<u32>(),
            cap[3].parse::<u32>(),
        ) else {
            continue;
        };
        let Some(date) = chrono::NaiveDate::from_ymd_opt(y, m, d) else {
            continue;
        };
        let Some(from) = date.and_hms_opt(0, 0, 0) else {
            continue;
        };
        let from = from.and_utc();
        matches.push(TimeMatch {
            window: TimeWindow::new(from, from + Duration::days(1)),
            span: whole.range(),
        });
    }

    matches
}

/// Narrowest window wins; ties broken by later occurrence.
pub fn pick_winner(matches: Vec<TimeMatch>) -> Option<TimeMatch> {
    matches.into_iter().min_by(|a, b| {
        a.window
            .duration_secs()
            .cmp(&b.window.duration_secs())
            .then(b.span.start.cmp(&a.span.start))
    })
}

fn parse_count(word: &str) -> i32 {
    match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        n => n.parse().unwrap_or(1),
    }
}

fn unit_duration(unit: &str) -> Duration {
    match unit {
        "hour" => Duration::hours(1),
        "day" => Duration::days(1),
        "week" => Duration::weeks(1),
        // Calendar-agnostic 30-day month keeps resolution pure.
        _ => Duration::days(30),
    }
}

fn midnight_of(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}
