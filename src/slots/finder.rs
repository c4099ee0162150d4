use chrono::{Duration, NaiveTime};
use super::{AvailableSlot, LocationTimeslots, TimeSlot, SLOT_MINUTES};
use crate::scraper::booking::BookingLinks;

/// Number of consecutive cells needed to cover `duration_hours`.
pub fn cells_for_duration(duration_hours: f64) -> usize {
    let cells = (duration_hours * 60.0 / SLOT_MINUTES as f64).round();
    if cells.is_finite() && cells >= 1.0 {
        cells as usize
    } else {
        1
    }
}

/// Finds every window of consecutive free cells long enough for the query's
/// duration, per location.
///
/// Windows slide by one cell, so a free stretch of 19:00-21:00 searched for
/// one hour yields 19:00-20:00, 19:30-20:30 and 20:00-21:00.
pub fn find_available_windows(
    timeslots: &[LocationTimeslots],
    links: &BookingLinks,
) -> Vec<AvailableSlot> {
    let mut windows = Vec::new();

    for entry in timeslots {
        let needed = cells_for_duration(entry.query.duration_hours);
        let mut cells: Vec<TimeSlot> = entry.slots.clone();
        cells.sort_by_key(|c| c.time);

        let mut run: Vec<NaiveTime> = Vec::new();
        for cell in cells {
            if !cell.available {
                run.clear();
                continue;
            }

            let contiguous = run
                .last()
                .is_some_and(|prev| *prev + Duration::minutes(SLOT_MINUTES) == cell.time);
            if !contiguous {
                run.clear();
            }
            run.push(cell.time);

            if run.len() >= needed {
                let start_time = run[0];
                let end_time = run[run.len() - 1] + Duration::minutes(SLOT_MINUTES);
                let booking_url = links.booking_url(
                    &entry.location.id,
                    entry.query.date,
                    start_time,
                    end_time,
                );

                windows.push(AvailableSlot {
                    location_id: entry.location.id.clone(),
                    location_name: entry.location.name.clone(),
                    date: entry.query.date,
                    start_time,
                    end_time,
                    duration_hours: entry.query.duration_hours,
                    booking_url: booking_url.to_string(),
                });

                run.remove(0);
            }
        }
    }

    windows
}
