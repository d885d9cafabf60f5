//! Date macro expansion
//!
//! Expands `{{date}}` and `{{date:FORMAT}}` inside template text. FORMAT uses
//! moment-style tokens (`YYYY`, `MM`, `Do`, `HH`, ...) with the English
//! (US) locale: `w`/`gggg` weeks start on Sunday and `L`, `LL`, `LT`, ...
//! expand to the US long-date formats. Text in square brackets is copied
//! literally and anything that is not a known token passes through
//! unchanged, so a bad format never fails.

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::constants as C;

static DATE_MACRO: Lazy<Regex> =
    Lazy::new(|| Regex::new(C::DATE_MACRO_PATTERN).expect("date macro pattern compiles"));

/// Moment tokens, longest first where they share a prefix
const TOKENS: &[&str] = &[
    "YYYY", "YY", "Y", "Q", "MMMM", "MMM", "MM", "M", "DDDD", "DDD", "DD", "Do", "D", "dddd",
    "ddd", "dd", "d", "E", "e", "HH", "H", "hh", "h", "kk", "k", "mm", "m", "ss", "s", "SSS",
    "SS", "S", "A", "a", "WW", "W", "GGGG", "ww", "w", "gggg", "X", "x", "ZZ", "Z", "LTS", "LT",
    "LLLL", "LLL", "LL", "L",
];

/// Locale formats, written in the tokens above
const LOCALE_FORMATS: &[(&str, &str)] = &[
    ("LTS", "h:mm:ss A"),
    ("LT", "h:mm A"),
    ("LLLL", "dddd, MMMM D, YYYY h:mm A"),
    ("LLL", "MMMM D, YYYY h:mm A"),
    ("LL", "MMMM D, YYYY"),
    ("L", "MM/DD/YYYY"),
];

/// Expand every date macro against the current local time
///
/// The clock is read once, so every macro in `template` renders the same
/// instant.
pub fn expand(template: &str) -> String {
    expand_at(template, &Local::now())
}

/// Expand every date macro against `now`
pub fn expand_at<Tz>(template: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DATE_MACRO
        .replace_all(template, |caps: &Captures| {
            let format = caps.name("format").map_or("", |m| m.as_str());
            let format = if format.is_empty() {
                C::DEFAULT_DATE_FORMAT
            } else {
                format
            };
            format_moment(now, format)
        })
        .into_owned()
}

/// Render `dt` with a moment-style format pattern
pub fn format_moment<Tz>(dt: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str(&render_token(dt, token));
            rest = &rest[token.len()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}

fn render_token<Tz>(dt: &DateTime<Tz>, token: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (is_pm, hour12) = dt.hour12();
    match token {
        "YYYY" => format!("{:04}", dt.year()),
        "YY" => format!("{:02}", dt.year().rem_euclid(100)),
        "Y" => dt.year().to_string(),
        "Q" => (dt.month0() / 3 + 1).to_string(),
        "MMMM" => dt.format("%B").to_string(),
        "MMM" => dt.format("%b").to_string(),
        "MM" => format!("{:02}", dt.month()),
        "M" => dt.month().to_string(),
        "DDDD" => format!("{:03}", dt.ordinal()),
        "DDD" => dt.ordinal().to_string(),
        "DD" => format!("{:02}", dt.day()),
        "Do" => ordinal(dt.day()),
        "D" => dt.day().to_string(),
        "dddd" => dt.format("%A").to_string(),
        "ddd" => dt.format("%a").to_string(),
        "dd" => dt.format("%a").to_string().chars().take(2).collect(),
        "d" | "e" => dt.weekday().num_days_from_sunday().to_string(),
        "E" => dt.weekday().number_from_monday().to_string(),
        "HH" => format!("{:02}", dt.hour()),
        "H" => dt.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "kk" => format!("{:02}", hour24_from_one(dt.hour())),
        "k" => hour24_from_one(dt.hour()).to_string(),
        "mm" => format!("{:02}", dt.minute()),
        "m" => dt.minute().to_string(),
        "ss" => format!("{:02}", dt.second()),
        "s" => dt.second().to_string(),
        "SSS" => format!("{:03}", dt.timestamp_subsec_millis() % 1000),
        "SS" => format!("{:02}", dt.timestamp_subsec_millis() % 1000 / 10),
        "S" => (dt.timestamp_subsec_millis() % 1000 / 100).to_string(),
        "A" => (if is_pm { "PM" } else { "AM" }).to_string(),
        "a" => (if is_pm { "pm" } else { "am" }).to_string(),
        "WW" => format!("{:02}", dt.iso_week().week()),
        "W" => dt.iso_week().week().to_string(),
        "GGGG" => format!("{:04}", dt.iso_week().year()),
        "ww" => format!("{:02}", locale_week(dt.year(), dt.ordinal()).1),
        "w" => locale_week(dt.year(), dt.ordinal()).1.to_string(),
        "gggg" => format!("{:04}", locale_week(dt.year(), dt.ordinal()).0),
        "X" => dt.timestamp().to_string(),
        "x" => dt.timestamp_millis().to_string(),
        "ZZ" => dt.format("%z").to_string(),
        "Z" => dt.format("%:z").to_string(),
        other => match LOCALE_FORMATS.iter().find(|(token, _)| *token == other) {
            Some((_, format)) => format_moment(dt, format),
            None => other.to_string(),
        },
    }
}

/// Week-year and week number with weeks starting on Sunday
///
/// Week 1 is the week containing January 1st, so the last days of December
/// can fall into week 1 of the next year.
fn locale_week(year: i32, ordinal: u32) -> (i32, u32) {
    let jan1 = |y: i32| {
        NaiveDate::from_ymd_opt(y, 1, 1).map_or(0, |d| d.weekday().num_days_from_sunday())
    };
    let days_in_year = NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |d| d.ordinal());

    let week = (ordinal + jan1(year) - 1) / 7 + 1;
    let weeks_in_year = (days_in_year + jan1(year) - jan1(year + 1)) / 7;
    if week > weeks_in_year {
        (year + 1, 1)
    } else {
        (year, week)
    }
}

/// Hour on a 1-24 clock (moment `k`)
fn hour24_from_one(hour: u32) -> u32 {
    if hour == 0 {
        24
    } else {
        hour
    }
}

/// Day of month with an English ordinal suffix
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
