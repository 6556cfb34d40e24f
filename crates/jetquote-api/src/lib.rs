// jetquote-api: Async Rust client for the charter booking API

pub mod account;
pub mod booking;
pub mod client;
pub mod error;
pub mod geo;
pub mod transport;
pub mod types;

pub use client::BookingClient;
pub use error::Error;
pub use geo::GeoClient;
pub use transport::{TlsMode, TransportConfig};
