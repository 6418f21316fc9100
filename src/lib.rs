//! APOD Core Library
//!
//! This library is a client for NASA's Astronomy Picture of the Day API.
//! It builds the request for a given date, fetches and decodes the daily
//! record, and offers previous/next day navigation over the archive.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`client`] - `ApodClient`: key, date, request URL, fetch and media accessors
//! - [`transport`] - HTTP GET + JSON decode, standard headers, media downloads
//! - [`record`] - The decoded daily record and the error sentinel record
//! - [`date`] - Valid archive range and date clamping
//! - [`error`] - Structured transport and decode errors
//!
//! # Example
//!
//! ```no_run
//! use apod_core::ApodClient;
//!
//! # async fn example() {
//! let mut client = ApodClient::new("DEMO_KEY");
//! let apod = client.fetch().await;
//! if apod.is_error() {
//!     eprintln!("fetch failed: {}", apod.explanation);
//! } else {
//!     println!("{}: {}", apod.date, apod.title);
//! }
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod date;
pub mod error;
pub mod record;
pub mod transport;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use client::{ApodClient, DEFAULT_BASE_URL};
pub use date::{MIN_DATE, clamp_date, today};
pub use error::ApodError;
pub use record::{Apod, ERROR_TITLE, MediaType};
pub use transport::{CACHE_CONTROL_HINT, Transport};
