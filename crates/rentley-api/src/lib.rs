//! rentley-api: raw async client for the rental platform REST API.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod auth;
mod pricing;
mod reference;
mod rentals;
mod vehicles;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
