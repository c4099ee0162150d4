//! Direct query form, parsed without the language model.
//!
//! One or more entries separated by `;` or newlines:
//! `2025-04-25 19:00-22:00 1.5h`. The duration is optional.

use crate::slots::RawSlotQuery;

/// Returns `None` unless every entry of `text` is in direct form.
pub fn parse_direct(text: &str) -> Option<Vec<RawSlotQuery>> {
    let entries: Vec<&str> = text
        .split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();

    if entries.is_empty() {
        return None;
    }

    entries.into_iter().map(parse_entry).collect()
}

fn parse_entry(entry: &str) -> Option<RawSlotQuery> {
    let mut parts = entry.split_whitespace();
    let date = parts.next()?;
    let window = parts.next()?;
    let duration = parts.next();

    if parts.next().is_some() || !looks_like_iso_date(date) {
        return None;
    }

    let (start, end) = window.split_once('-')?;
    if !looks_like_time(start) || !looks_like_time(end) {
        return None;
    }

    let duration_hours = match duration {
        Some(d) => Some(d.trim_end_matches(['h', 'H']).parse::<f64>().ok()?),
        None => None,
    };

    Some(RawSlotQuery {
        date: Some(date.to_string()),
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        duration_hours,
    })
}

fn looks_like_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes.iter().enumerate().all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

fn looks_like_time(s: &str) -> bool {
    match s.split_once(':') {
        Some((h, m)) => {
            (1..=2).contains(&h.len())
                && m.len() == 2
                && h.chars().chain(m.chars()).all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
