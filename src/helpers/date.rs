//! Date helper functions

use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// A Moment.js token and what it turns into
enum Token {
    /// A chrono specifier known to be valid
    Chrono(&'static str),
    /// Day of month with an English ordinal suffix (`Do`)
    Ordinal,
}

/// Supported Moment.js tokens, longest first so `DD` wins over `D`
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Chrono("%Y")),
    ("YY", Token::Chrono("%y")),
    ("MMMM", Token::Chrono("%B")),
    ("MMM", Token::Chrono("%b")),
    ("MM", Token::Chrono("%m")),
    ("M", Token::Chrono("%-m")),
    ("Do", Token::Ordinal),
    ("DDDD", Token::Chrono("%j")),
    ("DDD", Token::Chrono("%-j")),
    ("DD", Token::Chrono("%d")),
    ("D", Token::Chrono("%-d")),
    ("dddd", Token::Chrono("%A")),
    ("ddd", Token::Chrono("%a")),
];

/// Format a date using a Moment.js-compatible format string
///
/// Supports the year, month and day-of-month tokens plus `ddd`/`dddd`.
/// Anything else, including `%`, is copied as literal text, as is text
/// inside `[brackets]`.
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD/MM/YYYY") // -> "15/01/2024"
/// format_date(&date, "Do [de] MMMM") // -> "15th de January"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        match TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            Some((token, Token::Chrono(spec))) => {
                let _ = write!(out, "{}", date.format(spec));
                rest = &rest[token.len()..];
            }
            Some((token, Token::Ordinal)) => {
                let day = date.day();
                let _ = write!(out, "{}{}", day, ordinal_suffix(day));
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Format a date in ISO 8601 form
pub fn date_xml(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
