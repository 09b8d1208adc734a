//! `TripKit` - travel-planning tools served over the Model Context Protocol
//!
//! This library provides the core functionality behind the `tripkit` MCP
//! server: weather alerts and forecasts from the National Weather Service,
//! flight, hotel and places search through the Amadeus travel APIs, and
//! pure budget/packing-list planners.

pub mod amadeus;
pub mod config;
pub mod http;
pub mod planning;
pub mod server;
pub mod weather;

// Re-export core types for public API
pub use amadeus::{AmadeusClient, AmadeusError};
pub use config::{AmadeusConfig, AppConfig, WeatherConfig};
pub use server::TripServer;
pub use weather::NwsClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
