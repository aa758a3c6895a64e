//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Front-matter block of an article, as written by the author
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Front-matter with every required field present and validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl FrontMatter {
    /// Split a file into its front-matter and markdown body
    ///
    /// The block must open the file with a `---` line and be closed by another
    /// `---` line. `path` is only used for error reporting.
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let rest = content
            .strip_prefix("---")
            .ok_or_else(|| Error::front_matter(path, "file does not start with `---`"))?;
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .ok_or_else(|| Error::front_matter(path, "opening `---` must be on its own line"))?;

        let (yaml, body) = split_closing(rest)
            .ok_or_else(|| Error::front_matter(path, "missing closing `---`"))?;

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)
            .map_err(|e| Error::front_matter(path, e.to_string()))?;
        Ok((fm, body))
    }

    /// Check required fields and normalise them
    pub fn validate(self, path: &Path) -> Result<Validated> {
        let slug = self
            .slug
            .ok_or_else(|| Error::front_matter(path, "missing required field `slug`"))?;
        let slug = normalize_slug(&slug).map_err(|m| Error::front_matter(path, m))?;

        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::front_matter(path, "missing required field `title`"))?;

        let raw_date = self
            .date
            .ok_or_else(|| Error::front_matter(path, "missing required field `date`"))?;
        let date = parse_date_string(&raw_date)
            .ok_or_else(|| Error::front_matter(path, format!("unrecognised date `{raw_date}`")))?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Validated {
            slug,
            title,
            date,
            description,
        })
    }
}

/// Find the closing `---` line; returns (yaml, body)
fn split_closing(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Normalise a slug into a site path: leading `/`, no trailing `/`
pub fn normalize_slug(slug: &str) -> std::result::Result<String, String> {
    let trimmed = slug.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err("`slug` must not be empty or `/`".to_string());
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(format!("`slug` `{slug}` contains characters not allowed in a path"));
    }
    if trimmed
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Err(format!("`slug` `{slug}` has an empty or relative segment"));
    }
    Ok(format!("/{trimmed}"))
}

/// Parse a date string in various formats, keeping only the calendar date
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 keeps the author's local date, not the UTC one
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
