//! HTML extraction for the booking site's search and location pages.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveTime;
use scraper::{ElementRef, Html, Selector};

use crate::slots::{Location, TimeSlot};
use crate::utils::datetime::parse_hhmm;

const LOCATION_RESULT: &str = "div.type-search-result.location";
const TIMESLOT_BLOCK: &str = "div.timeslots";
const SLOT_LINK: &str = "a.slot";
const LOCATION_PATH_MARKER: &str = "/sportinfrastructuur/locatie/";

// Only called with the static selectors above.
#[allow(clippy::expect_used)]
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Extracts the locations listed on a search results page.
pub fn parse_locations(html: &str) -> Vec<Location> {
    let doc = Html::parse_document(html);
    let result_sel = selector(LOCATION_RESULT);
    let link_sel = selector("a[href]");
    let heading_sel = selector("h3");

    let mut seen = HashSet::new();
    let mut locations = Vec::new();

    for element in doc.select(&result_sel) {
        let Some((id, link)) = element
            .select(&link_sel)
            .find_map(|a| location_id_from_href(a.value().attr("href")?).map(|id| (id, a)))
        else {
            tracing::debug!("Search result without a location link, skipping");
            continue;
        };

        let name = element_text(&link);
        let name = if name.is_empty() {
            element
                .select(&heading_sel)
                .next()
                .map(|h| element_text(&h))
                .unwrap_or_default()
        } else {
            name
        };

        if name.is_empty() {
            tracing::debug!("Location {} has no name, skipping", id);
            continue;
        }

        if seen.insert(id.clone()) {
            locations.push(Location { id, name });
        }
    }

    locations
}

/// Extracts the 30-minute cells of a location page that start within
/// `[start, end)`.
///
/// The grid repeats per hall of the location; a time is available when any
/// hall has it free.
pub fn parse_timeslots(html: &str, start: NaiveTime, end: NaiveTime) -> Vec<TimeSlot> {
    let doc = Html::parse_document(html);
    let block_sel = selector(TIMESLOT_BLOCK);
    let slot_sel = selector(SLOT_LINK);

    let mut cells: BTreeMap<NaiveTime, bool> = BTreeMap::new();

    for block in doc.select(&block_sel) {
        for link in block.select(&slot_sel) {
            let text = element_text(&link);
            let Ok(time) = parse_hhmm(&text) else {
                tracing::debug!("Ignoring slot with unreadable time '{}'", text);
                continue;
            };

            if time < start || time >= end {
                continue;
            }

            let available = !link.value().classes().any(|c| c == "disabled");
            let entry = cells.entry(time).or_insert(false);
            *entry |= available;
        }
    }

    cells
        .into_iter()
        .map(|(time, available)| TimeSlot { time, available })
        .collect()
}

fn location_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once(LOCATION_PATH_MARKER)?;
    let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_location_id_from_href() {
        assert_eq!(
            location_id_from_href("/nl/sportinfrastructuur/locatie/1234?sport=2317").as_deref(),
            Some("1234")
        );
        assert_eq!(
            location_id_from_href("https://www.antwerpen.be/nl/sportinfrastructuur/locatie/56").as_deref(),
            Some("56")
        );
        assert_eq!(location_id_from_href("/nl/sportinfrastructuur/locatie/abc"), None);
        assert_eq!(location_id_from_href("/nl/elders/1234"), None);
    }

    #[test]
    fn test_parse_locations() {
        let html = r#"
            <div class="results">
              <div class="type-search-result location">
                <a href="/nl/sportinfrastructuur/locatie/101">  Sporthal   Noord </a>
              </div>
              <div class="type-search-result location">
                <h3>Sportcentrum Zuid</h3>
                <a href="/nl/sportinfrastructuur/locatie/202"><img src="x.png"></a>
              </div>
              <div class="type-search-result location">
                <a href="/nl/nieuws/1">Not a location</a>
              </div>
              <div class="type-search-result location">
                <a href="/nl/sportinfrastructuur/locatie/101">Sporthal Noord</a>
              </div>
              <div class="type-search-result event">
                <a href="/nl/sportinfrastructuur/locatie/303">Event</a>
              </div>
            </div>
        "#;

        let locations = parse_locations(html);
        assert_eq!(locations, vec![
            Location { id: "101".into(), name: "Sporthal Noord".into() },
            Location { id: "202".into(), name: "Sportcentrum Zuid".into() },
        ]);
    }

    #[test]
    fn test_parse_locations_empty_page() {
        assert!(parse_locations("<html><body><p>Geen resultaten</p></body></html>").is_empty());
    }

    #[test]
    fn test_parse_timeslots_filters_and_merges() {
        let html = r#"
            <div class="reservations-timeslots-wrapper">
              <div class="timeslots ng-scope">
                <a class="slot disabled">18:30</a>
                <a class="slot disabled">19:00</a>
                <a class="slot">19:30</a>
                <a class="slot disabled">20:00</a>
                <a class="slot">22:00</a>
              </div>
              <div class="timeslots ng-scope">
                <a class="slot">19:00</a>
                <a class="slot disabled">19:30</a>
                <a class="slot disabled">20:00</a>
                <a class="slot">??</a>
              </div>
              <div class="other">
                <a class="slot">20:30</a>
              </div>
            </div>
        "#;

        let slots = parse_timeslots(html, t(19, 0), t(22, 0));
        assert_eq!(slots, vec![
            TimeSlot { time: t(19, 0), available: true },
            TimeSlot { time: t(19, 30), available: true },
            TimeSlot { time: t(20, 0), available: false },
        ]);
    }
}
