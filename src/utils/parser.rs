//! Parsing helpers for user input and scraped/remote text
//!
//! Pair URLs, compact counters ("12.3K"), join dates ("Joined March 2021"),
//! WHOIS timestamps and a few display formatters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use url::Url;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::COMMUNITY_LINK_MARKER;

/// Chain id and pair address extracted from a pair URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairLocator {
    pub chain: String,
    pub pair_address: String,
}

/// Parse `https?://<host>/<chain>/<pairAddress>`.
/// Query strings and extra trailing segments are ignored.
pub fn parse_pair_url(link: &str) -> AppResult<PairLocator> {
    let url = Url::parse(link.trim()).map_err(|_| AppError::invalid_url())?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::invalid_url());
    }

    let mut segments = url
        .path_segments()
        .ok_or_else(AppError::invalid_url)?
        .filter(|s| !s.is_empty());

    match (segments.next(), segments.next()) {
        (Some(chain), Some(pair)) => Ok(PairLocator {
            chain: chain.to_string(),
            pair_address: pair.to_string(),
        }),
        _ => Err(AppError::invalid_url()),
    }
}

/// Host part of a website URL ("https://www.cat.xyz/about" -> "www.cat.xyz").
/// Bare hosts without a scheme are accepted too.
pub fn extract_host(website: &str) -> Option<String> {
    let trimmed = website.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    Url::parse(&candidate)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// X/Twitter community pages are scraped with a different extractor
pub fn is_community_link(link: &str) -> bool {
    link.contains(COMMUNITY_LINK_MARKER)
}

/// Parse compact counters: "12.3K" -> 12300, "1.2M" -> 1200000, "1,234" -> 1234.
/// Returns `None` for anything unparsable.
pub fn try_parse_compact(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    let (number, multiplier) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        Some('B') | Some('b') => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    let value: f64 = number.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * multiplier).round() as u64)
}

/// Like [`try_parse_compact`] but unparsable text counts as zero
pub fn parse_compact_count(text: &str) -> u64 {
    try_parse_compact(text).unwrap_or(0)
}

/// Parse "Joined <Month> <Year>" into the first day of that month
pub fn parse_joined_date(text: &str) -> Option<NaiveDate> {
    let rest = text.trim().trim_start_matches("Joined").trim();
    let mut parts = rest.split_whitespace();
    let month = parts.next()?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::parse_from_str(&format!("01 {} {}", month, year), "%d %B %Y").ok()
}

/// Parse WHOIS timestamps. Naive forms are taken as UTC.
pub fn parse_whois_date(text: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty date".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S UTC"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(format!("Invalid isoformat string: '{}'", trimmed))
}

/// Epoch milliseconds as "%Y-%m-%d %H:%M:%S" (UTC), "N/A" when out of range
pub fn format_timestamp(ms: Option<i64>) -> String {
    ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// "0x1234567890abcdef" -> "0x1234...cdef"
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// "raydium" -> "Raydium"
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
