//! Booking site scraper.
//!
//! For every [`SlotQuery`] the scraper loads the search page to discover which
//! locations offer the sport, then loads each location's page and reads its
//! timeslot grid. Location pages are fetched concurrently, bounded by a
//! semaphore.

pub mod booking;
pub mod parse;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::slots::{Location, LocationTimeslots, SlotQuery};
use crate::utils::logging::log_scrape_event;
use booking::BookingLinks;
use parse::{parse_locations, parse_timeslots};

/// User-Agent string for booking site requests.
const USER_AGENT: &str = concat!("sport-slot-bot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("no locations listed on {url}")]
    NoLocations { url: String },

    #[error("semaphore closed")]
    Closed,
}

/// Fetches and parses the booking site's pages.
#[derive(Clone)]
pub struct SlotScraper {
    client: Client,
    links: BookingLinks,
    permits: Arc<Semaphore>,
}

impl SlotScraper {
    pub fn new(
        base_url: Url,
        sport_id: impl Into<String>,
        timeout: Duration,
        concurrency: usize,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            links: BookingLinks::new(base_url, sport_id),
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        })
    }

    pub fn links(&self) -> &BookingLinks {
        &self.links
    }

    /// Scrapes every query; a query or location that fails is logged and
    /// left out of the result.
    pub async fn search(&self, queries: &[SlotQuery]) -> Vec<LocationTimeslots> {
        let mut results = Vec::new();

        for query in queries {
            match self.search_query(query).await {
                Ok(found) => results.extend(found),
                Err(e) => {
                    warn!(
                        "Skipping query {} {}-{}: {}",
                        query.date, query.start_time, query.end_time, e
                    );
                }
            }
        }

        results
    }

    /// Scrapes one query window across all listed locations.
    #[instrument(skip_all, fields(date = %query.date, from = %query.start_time, to = %query.end_time))]
    pub async fn search_query(&self, query: &SlotQuery) -> Result<Vec<LocationTimeslots>, ScrapeError> {
        let search_url = self.links.search_url(query);
        let page = self.fetch(&search_url).await?;
        let locations = parse_locations(&page);

        if locations.is_empty() {
            return Err(ScrapeError::NoLocations { url: search_url.to_string() });
        }
        log_scrape_event("locations", &format!("{} found for {}", locations.len(), query.date));

        let mut handles = Vec::with_capacity(locations.len());
        for location in locations {
            let scraper = self.clone();
            let query = query.clone();
            handles.push(tokio::spawn(async move {
                let result = scraper.fetch_location(&location, &query).await;
                (location, query, result)
            }));
        }

        let mut found = Vec::new();
        for handle in handles {
            match handle.await {
                Ok((location, query, Ok(slots))) => {
                    debug!("{} cells read for {} ({})", slots.len(), location.name, location.id);
                    found.push(LocationTimeslots { location, query, slots });
                }
                Ok((location, _, Err(e))) => {
                    warn!("Skipping location {} ({}): {}", location.name, location.id, e);
                }
                Err(e) => {
                    warn!("Location fetch task failed: {}", e);
                }
            }
        }

        info!("Read timeslots for {} locations", found.len());
        Ok(found)
    }

    async fn fetch_location(
        &self,
        location: &Location,
        query: &SlotQuery,
    ) -> Result<Vec<crate::slots::TimeSlot>, ScrapeError> {
        let _permit = self.permits.acquire().await.map_err(|_| ScrapeError::Closed)?;
        let url = self.links.location_url(&location.id, query);
        let page = self.fetch(&url).await?;
        Ok(parse_timeslots(&page, query.start_time, query.end_time))
    }

    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        debug!(%url, "fetching");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { url: url.to_string(), status });
        }
        Ok(response.text().await?)
    }
}
