//! Department lookup from coordinates
//!
//! Uses the French government geo API to find which department a point
//! belongs to. The department name is the region key used by the zone
//! resolver (e.g. "Gironde", "Finistère").

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Base URL for the commune search endpoint
const GEO_API_URL: &str = "https://geo.api.gouv.fr/communes";

/// Errors that can occur when looking up a department
#[derive(Debug, Error)]
pub enum RegionError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Geo API returned status {0}")]
    Status(u16),

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A commune record, only the fields we request
#[derive(Debug, Deserialize)]
struct Commune {
    departement: Option<Departement>,
}

#[derive(Debug, Deserialize)]
struct Departement {
    nom: String,
}

/// Client for the geo.api.gouv.fr commune search
#[derive(Debug, Clone)]
pub struct RegionClient {
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for RegionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Creates a client sharing an existing HTTP client
    pub fn with_client(http_client: Client) -> Self {
        Self {
            http_client,
            base_url: GEO_API_URL.to_string(),
        }
    }

    /// Overrides the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Finds the department containing the given point.
    ///
    /// Returns `Ok(None)` when the point is outside France (the API returns
    /// an empty list).
    pub async fn department_for(&self, lat: f64, lon: f64) -> Result<Option<String>, RegionError> {
        let url = format!(
            "{}?lat={}&lon={}&fields=departement&format=json&geometry=centre",
            self.base_url, lat, lon
        );

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RegionError::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        parse_department(&text)
    }
}

/// Extracts the department of the first commune in a response body.
fn parse_department(body: &str) -> Result<Option<String>, RegionError> {
    let communes: Vec<Commune> = serde_json::from_str(body)?;
    Ok(communes
        .into_iter()
        .next()
        .and_then(|commune| commune.departement)
        .map(|departement| departement.nom))
}
