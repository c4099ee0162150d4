use super::SlotQuery;

/// Collapses overlapping or touching windows on the same day into one.
///
/// The interpreter tends to enumerate every candidate start time
/// (19:00-20:30, 19:30-21:00, ...); scraping each of those separately would
/// fetch the same pages over and over. Windows only merge when they ask for
/// the same duration.
pub fn merge_slots(queries: Vec<SlotQuery>) -> Vec<SlotQuery> {
    let mut sorted = queries;
    sorted.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));

    let mut merged: Vec<SlotQuery> = Vec::with_capacity(sorted.len());
    for next in sorted {
        match merged.last_mut() {
            Some(current)
                if current.date == next.date
                    && current.duration_hours == next.duration_hours
                    && current.end_time >= next.start_time =>
            {
                if next.end_time > current.end_time {
                    current.end_time = next.end_time;
                }
            }
            _ => merged.push(next),
        }
    }

    merged
}
