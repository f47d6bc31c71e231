//! Display formatting and query helpers for metadata providers.

use std::str::FromStr;

use anyhow::{Context, bail};

/// Labels this long or longer are replaced by the artist name on the poster.
pub const MAX_LABEL_CHARS: usize = 35;

/// Granularity of a catalog release date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePrecision {
    Day,
    Month,
    Year,
}

impl FromStr for DatePrecision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => bail!("unknown release date precision '{other}'"),
        }
    }
}

/// `MM:SS` from milliseconds; minutes are not wrapped into hours.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms / 1000) % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// `2017-06-09` at day precision becomes `June 09, 2017`. Missing parts count as the first
/// month or day.
pub fn format_release_date(date: &str, precision: DatePrecision) -> anyhow::Result<String> {
    let full = match precision {
        DatePrecision::Day => date.to_string(),
        DatePrecision::Month => format!("{date}-01"),
        DatePrecision::Year => format!("{date}-01-01"),
    };
    let parsed = chrono::NaiveDate::parse_from_str(&full, "%Y-%m-%d")
        .with_context(|| format!("parse release date '{date}' ({precision:?})"))?;
    Ok(parsed.format("%B %d, %Y").to_string())
}

pub fn display_label(label: &str, artist: &str) -> String {
    if label.chars().count() < MAX_LABEL_CHARS {
        label.to_string()
    } else {
        artist.to_string()
    }
}

/// Turn `Track - Artist` into a fielded `track:"Track" artist:"Artist"` query.
///
/// Queries that already use fields, or have no ` - ` separator, are returned unchanged.
pub fn normalize_track_query(query: &str) -> String {
    if query.contains("track:") || query.contains("artist:") {
        return query.to_string();
    }
    match query.split_once(" - ") {
        Some((track, artist)) => {
            format!(r#"track:"{}" artist:"{}""#, track.trim(), artist.trim())
        }
        None => query.to_string(),
    }
}

/// The query without its artist filter, for a second, looser search.
pub fn relaxed_query(query: &str) -> Option<String> {
    let (head, _) = query.split_once("artist:")?;
    Some(head.trim().to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/provider/format.rs"]
mod tests;
