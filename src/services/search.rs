use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use crate::database::{connection::DatabaseManager, models::SearchRecord};
use crate::interpreter::{InterpretError, QueryInterpreter};
use crate::scraper::SlotScraper;
use crate::slots::{find_available_windows, AvailableSlot, RawSlotQuery, SlotQuery};
use crate::utils::logging::{log_database_error, log_database_operation};

/// Result of a free-text search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub queries: Vec<SlotQuery>,
    pub slots: Vec<AvailableSlot>,
}

/// Runs interpretation, scraping and window finding for the bot.
#[derive(Clone)]
pub struct SearchService {
    interpreter: QueryInterpreter,
    scraper: SlotScraper,
    db: DatabaseManager,
    default_duration_hours: f64,
}

impl SearchService {
    pub fn new(
        interpreter: QueryInterpreter,
        scraper: SlotScraper,
        db: DatabaseManager,
        default_duration_hours: f64,
    ) -> Self {
        Self {
            interpreter,
            scraper,
            db,
            default_duration_hours,
        }
    }

    pub fn interpreter(&self) -> &QueryInterpreter {
        &self.interpreter
    }

    pub fn scraper(&self) -> &SlotScraper {
        &self.scraper
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    pub fn default_duration_hours(&self) -> f64 {
        self.default_duration_hours
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Turns a chat message into slot queries.
    pub async fn interpret(&self, text: &str) -> Result<Vec<SlotQuery>, InterpretError> {
        self.interpreter.interpret(text, Self::today()).await
    }

    /// Normalises queries that did not come through the language model.
    pub fn prepare(&self, raw: Vec<RawSlotQuery>) -> Result<Vec<SlotQuery>, InterpretError> {
        self.interpreter.finish(raw, Self::today())
    }

    /// Scrapes the site for every query and returns the bookable windows.
    pub async fn search_queries(&self, queries: &[SlotQuery]) -> Vec<AvailableSlot> {
        let timeslots = self.scraper.search(queries).await;
        dedup_windows(find_available_windows(&timeslots, self.scraper.links()))
    }

    /// Full free-text search; the run is recorded in the chat's history.
    ///
    /// Requests that cannot be interpreted are not recorded.
    pub async fn search_text(
        &self,
        chat_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<SearchOutcome, InterpretError> {
        let queries = self.interpret(text).await?;
        let slots = self.search_and_record(chat_id, user_id, text, &queries).await;
        Ok(SearchOutcome { queries, slots })
    }

    /// Second half of [`search_text`](Self::search_text), for callers that
    /// report progress between interpretation and scraping.
    pub async fn search_and_record(
        &self,
        chat_id: i64,
        user_id: i64,
        text: &str,
        queries: &[SlotQuery],
    ) -> Vec<AvailableSlot> {
        let slots = self.search_queries(queries).await;
        self.record(chat_id, user_id, text, queries.len(), slots.len()).await;
        slots
    }

    // History is best effort; a failed insert never fails the search.
    async fn record(
        &self,
        chat_id: i64,
        user_id: i64,
        text: &str,
        query_count: usize,
        result_count: usize,
    ) {
        log_database_operation("INSERT", "searches", Some(&format!("chat {chat_id}")));
        if let Err(e) = SearchRecord::create(
            &self.db.pool,
            chat_id,
            user_id,
            text.to_string(),
            query_count as i64,
            result_count as i64,
        )
        .await
        {
            log_database_error("INSERT", "searches", &e.to_string());
        }
    }
}

/// Drops repeated windows (same location, day and span) keeping the first.
pub fn dedup_windows(slots: Vec<AvailableSlot>) -> Vec<AvailableSlot> {
    let mut seen = HashSet::new();
    slots
        .into_iter()
        .filter(|s| seen.insert((s.location_id.clone(), s.date, s.start_time, s.end_time)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn slot(location: &str, start: u32) -> AvailableSlot {
        AvailableSlot {
            location_id: location.to_string(),
            location_name: format!("Hall {location}"),
            date: NaiveDate::from_ymd_opt(2025, 4, 25).unwrap(),
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start + 1, 0, 0).unwrap(),
            duration_hours: 1.0,
            booking_url: String::new(),
        }
    }

    #[test]
    fn test_dedup_windows() {
        let deduped = dedup_windows(vec![slot("1", 19), slot("1", 19), slot("2", 19), slot("1", 20)]);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[1].location_id, "2");
    }
}
