//! # Sport Slot Bot
//!
//! A Telegram bot that finds free slots in sport halls by scraping the
//! booking website.
//!
//! ## Features
//! - Natural-language search requests, interpreted by a language model
//! - Direct requests (`2025-04-25 19:00-22:00 1.5h`) without the model
//! - Concurrent scraping of every location's timeslot grid
//! - Bookable windows of the requested length with deep booking links
//! - Search history in SQLite and a health endpoint

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Chat message to slot query interpretation
pub mod interpreter;
/// Booking site scraping and HTML parsing
pub mod scraper;
/// Search orchestration and the health endpoint
pub mod services;
/// Slot queries, timeslots and bookable window finding
pub mod slots;
/// Utility functions for datetime, validation, and formatting
pub mod utils;
