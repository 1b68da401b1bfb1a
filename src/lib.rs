//! omutsu-checker - Diaper price comparison across Japanese marketplaces
//!
//! Queries Amazon.co.jp, Rakuten Ichiba and Yahoo! Shopping concurrently,
//! normalizes each result into a listing with a per-diaper unit price,
//! and ranks them so the cheapest package stands out.

pub mod commands;
pub mod config;
pub mod extract;
pub mod filters;
pub mod format;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod sources;

pub use config::Config;
pub use models::{Brand, Listing, ProductType, Source};
pub use pipeline::Pipeline;
