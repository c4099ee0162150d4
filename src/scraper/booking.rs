use chrono::{NaiveDate, NaiveTime};
use url::Url;
use crate::slots::SlotQuery;
use crate::utils::datetime::{format_site_date, local_timestamp_millis};

/// Builds the booking site's search, location and booking URLs.
///
/// The site encodes a window as `from`/`to` Unix milliseconds plus the day as
/// `DD/MM/YYYY`; every page takes the same set of parameters.
#[derive(Debug, Clone)]
pub struct BookingLinks {
    base_url: Url,
    sport_id: String,
}

impl BookingLinks {
    pub fn new(base_url: Url, sport_id: impl Into<String>) -> Self {
        Self {
            base_url,
            sport_id: sport_id.into(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn sport_id(&self) -> &str {
        &self.sport_id
    }

    /// Search page listing every location for the sport within the window.
    pub fn search_url(&self, query: &SlotQuery) -> Url {
        let mut url = self.page("zoeken");
        self.window_params(&mut url, query.date, query.start_time, query.end_time);
        url
    }

    /// Location page with the timeslot grid for the window.
    pub fn location_url(&self, location_id: &str, query: &SlotQuery) -> Url {
        let mut url = self.page(&format!("locatie/{location_id}"));
        self.window_params(&mut url, query.date, query.start_time, query.end_time);
        url.query_pairs_mut().append_pair("location", location_id);
        url
    }

    /// Deep link that opens the location page preset to a bookable window.
    pub fn booking_url(
        &self,
        location_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Url {
        let mut url = self.page(&format!("locatie/{location_id}"));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("sport", &self.sport_id);
            pairs.append_pair("from", &local_timestamp_millis(date, start).to_string());
            pairs.append_pair("to", &local_timestamp_millis(date, end).to_string());
            pairs.append_pair("district", "");
            pairs.append_pair("date", &format_site_date(&date));
            pairs.append_pair("location", location_id);
        }
        url
    }

    fn page(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}/{path}"));
        url.set_query(None);
        url
    }

    fn window_params(&self, url: &mut Url, date: NaiveDate, start: NaiveTime, end: NaiveTime) {
        url.query_pairs_mut()
            .append_pair("sport", &self.sport_id)
            .append_pair("from", &local_timestamp_millis(date, start).to_string())
            .append_pair("to", &local_timestamp_millis(date, end).to_string())
            .append_pair("date", &format_site_date(&date));
    }
}
