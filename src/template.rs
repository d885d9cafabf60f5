//! Template rendering
//!
//! A template is plain text with date macros and placeholder tokens. Date
//! macros are expanded first, then placeholders are substituted in one
//! left-to-right pass. Text inserted for a placeholder is never scanned
//! again, so a note title that happens to contain `{{link}}` stays literal.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::date_macro;
use crate::placeholder::{Placeholder, PlaceholderValues};

/// Render `template`, or return `input` unchanged when there is no template
pub fn render(template: Option<&str>, input: &str, values: &PlaceholderValues) -> String {
    render_at(template, input, values, &Local::now())
}

/// Render `template` with date macros pinned to `now`
pub fn render_at<Tz>(
    template: Option<&str>,
    input: &str,
    values: &PlaceholderValues,
    now: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match template {
        Some(t) if !t.is_empty() => substitute(&date_macro::expand_at(t, now), values),
        _ => input.to_string(),
    }
}

/// Replace every placeholder token in `text` with its value
pub fn substitute(text: &str, values: &PlaceholderValues) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match Placeholder::match_prefix(candidate) {
            Some(placeholder) => {
                out.push_str(values.get(placeholder));
                rest = &candidate[placeholder.token().len()..];
            }
            None => {
                // step one brace so `{{{title}}` still finds the token
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);

    out
}
