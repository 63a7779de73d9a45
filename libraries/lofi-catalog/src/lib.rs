//! Lofi Player Catalog
//!
//! Track source adapter for the Deezer search API. It is the only I/O
//! boundary of the player: one call returns a normalized, de-duplicated list
//! of tracks or a terminal error.
//!
//! # Example
//!
//! ```ignore
//! use lofi_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::default())?;
//!
//!     for track in client.fetch(10).await? {
//!         println!("{}", track.display_name());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use types::{parse_search_response, CatalogConfig, CORS_PROXY, DEFAULT_BASE_URL, DEFAULT_QUERY};
