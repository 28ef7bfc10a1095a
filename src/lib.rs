//! # RSVP Bot
//!
//! A Telegram bot that lets an organiser publish an event invitation and
//! collects yes/no answers from guests.
//!
//! ## Features
//! - Step-by-step invitation authoring (text or photo with caption, optional video link)
//! - Shareable deep link that opens the current invitation
//! - One answer per guest, changeable until the next invitation is published
//! - Attendance statistics and invitation history for the organiser
//! - Redundant persistence to JSON files and an optional SQLite store

/// Telegram commands, keyboards and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// SQLite document store: connection, migrations and models
pub mod database;
/// Invitation authoring wizard and the response ledger
pub mod invitation;
/// Health endpoints and the keep-alive pinger
pub mod services;
/// JSON file storage and dual-write persistence
pub mod storage;
/// Utility functions for datetime, validation, feedback and logging
pub mod utils;
