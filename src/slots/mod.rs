//! Slot search data model.
//!
//! The booking site lays every location's day out as 30-minute cells between
//! [`day_open`] and [`day_close`]. A [`SlotQuery`] asks for a window of that
//! day; the scraper answers with [`TimeSlot`] cells per location and
//! [`finder`] turns runs of free cells into bookable [`AvailableSlot`]s.

pub mod finder;
pub mod merge;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::utils::datetime::{parse_hhmm, parse_iso_date};

pub use finder::find_available_windows;
pub use merge::merge_slots;

/// Length of one bookable cell on the site.
pub const SLOT_MINUTES: i64 = 30;

/// Start of the first bookable cell (08:30-09:00).
pub fn day_open() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 30, 0).unwrap_or_default()
}

/// End of the last bookable cell (22:30-23:00).
pub fn day_close() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default()
}

/// A concrete search window on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: f64,
}

/// Loosely-typed query as produced by the interpreter or the `/test` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSlotQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
}

impl RawSlotQuery {
    /// Fills gaps with defaults and clamps the window into the bookable day.
    ///
    /// Returns `None` for queries that cannot be searched: unparseable
    /// values, dates in the past, or windows that are empty after clamping.
    pub fn normalize(&self, today: NaiveDate, default_duration_hours: f64) -> Option<SlotQuery> {
        let date = match self.date.as_deref() {
            // A trailing time component (`2025-04-25T00:00:00`) is ignored.
            Some(d) => match parse_iso_date(d.get(..10).unwrap_or(d)) {
                Ok(date) => date,
                Err(e) => {
                    tracing::warn!("Dropping slot query: {}", e);
                    return None;
                }
            },
            None => today,
        };

        if date < today {
            tracing::warn!("Dropping slot query for past date {}", date);
            return None;
        }

        let start_time = match self.start_time.as_deref() {
            Some(t) => parse_hhmm(t).map_err(|e| tracing::warn!("Dropping slot query: {}", e)).ok()?,
            None => day_open(),
        };
        let end_time = match self.end_time.as_deref() {
            Some(t) => parse_hhmm(t).map_err(|e| tracing::warn!("Dropping slot query: {}", e)).ok()?,
            None => day_close(),
        };

        let start_time = start_time.clamp(day_open(), day_close());
        let end_time = end_time.clamp(day_open(), day_close());

        if start_time >= end_time {
            tracing::warn!(
                "Dropping slot query on {} with empty window {}-{}",
                date, start_time, end_time
            );
            return None;
        }

        let duration_hours = match self.duration_hours {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => default_duration_hours,
        };

        Some(SlotQuery {
            date,
            start_time,
            end_time,
            duration_hours,
        })
    }
}

/// A sport location listed on the search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// One 30-minute cell of a location's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: NaiveTime,
    pub available: bool,
}

/// The cells scraped for one location within one query's window.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationTimeslots {
    pub location: Location,
    pub query: SlotQuery,
    pub slots: Vec<TimeSlot>,
}

/// A bookable window covering the requested duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub location_id: String,
    pub location_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: f64,
    pub booking_url: String,
}
