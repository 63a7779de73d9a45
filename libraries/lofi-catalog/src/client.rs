//! Catalog client for the Deezer search API.

use crate::error::{CatalogError, Result};
use crate::types::{parse_search_response, CatalogConfig};
use lofi_core::Track;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client that fetches playable tracks from the music catalog.
///
/// # Example
///
/// ```ignore
/// use lofi_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::default())?;
/// let tracks = client.fetch(10).await?;
/// println!("Fetched {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("LofiPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: CatalogConfig { base_url, ..config },
        })
    }

    /// The normalized configuration in use.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build the request URL for a search of `limit` tracks.
    ///
    /// With a proxy configured, the target URL is percent-encoded and
    /// appended to the proxy prefix.
    pub fn request_url(&self, limit: usize) -> Result<String> {
        let target = Url::parse_with_params(
            &format!("{}/search", self.config.base_url),
            &[
                ("q", self.config.query.as_str()),
                ("limit", limit.to_string().as_str()),
            ],
        )
        .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        Ok(match &self.config.proxy {
            Some(proxy) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
                format!("{}{}", proxy, encoded)
            }
            None => target.into(),
        })
    }

    /// Fetch up to `limit` tracks matching the configured query.
    ///
    /// Fails without partial results: transport failures and non-success
    /// statuses are `Request`/`Status`, a body that is not a track list is
    /// `Parse`.
    pub async fn fetch(&self, limit: usize) -> Result<Vec<Track>> {
        if limit == 0 {
            return Err(CatalogError::InvalidLimit(limit));
        }

        let url = self.request_url(limit)?;
        debug!(url = %url, limit, "Fetching catalog tracks");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            let tracks = parse_search_response(&body, limit)?;

            info!(
                count = tracks.len(),
                query = %self.config.query,
                "Fetched catalog tracks"
            );

            Ok(tracks)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::Status {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
