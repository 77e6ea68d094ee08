//! Quote service client
//!
//! Fetches the full options table from the FastAPI quote service and
//! coerces it into typed quotes. The same payload envelope can be loaded
//! from a file for offline work.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::coerce::RawQuote;
use crate::core::{Quote, SurfaceError, SurfaceResult};

/// Quote service endpoint configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Service base URL
    /// Default: http://localhost:8000
    pub base_url: String,
    /// Request timeout in seconds
    /// Default: 10
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Configuration from the environment
    ///
    /// `API_URL` overrides the base URL when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Same configuration with a different base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Response envelope of the quote table endpoint
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(default)]
    items: Vec<RawQuote>,
}

/// Quote service HTTP client
pub struct ApiClient {
    client: reqwest::blocking::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// Fetch the full quote table
    ///
    /// Transport and payload failures are errors; unparseable fields
    /// inside a row are not, they coerce to missing values.
    pub fn fetch_quotes(&self) -> SurfaceResult<Vec<Quote>> {
        let url = format!("{}/datos-todos", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SurfaceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SurfaceError::network(format!(
                "quote service returned HTTP {} for {}",
                status, url
            )));
        }

        let envelope: QuoteEnvelope = response
            .json()
            .map_err(|e| SurfaceError::Data(format!("Failed to parse quote payload: {}", e)))?;

        let quotes = coerce_items(&envelope.items);
        if quotes.is_empty() {
            tracing::warn!("Quote service at {} returned an empty table", url);
        } else {
            tracing::info!("Fetched {} quote rows from {}", quotes.len(), url);
        }

        Ok(quotes)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ApiConfig::from_env())
    }
}

/// Load the quote table envelope from a file
pub fn load_quotes_file(path: impl AsRef<Path>) -> SurfaceResult<Vec<Quote>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let envelope: QuoteEnvelope = serde_json::from_reader(reader)
        .map_err(|e| SurfaceError::Data(format!("Failed to parse quote payload: {}", e)))?;

    Ok(coerce_items(&envelope.items))
}

/// Fetch the quote table from the service named by `API_URL`
pub fn fetch_quotes() -> SurfaceResult<Vec<Quote>> {
    ApiClient::default().fetch_quotes()
}

fn coerce_items(items: &[RawQuote]) -> Vec<Quote> {
    items.iter().map(|item| item.coerce()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;
    use std::io::Write;

    #[test]
    fn test_envelope_parses_items() {
        let payload = r#"{
            "items": [
                {"fecha": "2024-05-01", "vencimiento": "2024-06-21",
                 "strike": 9000, "tipo": "Call", "precio": 120.5, "σ": 18.5},
                {"fecha": "2024-05-01", "vencimiento": "2024-06-21",
                 "strike": "bad", "tipo": "Put", "precio": null, "σ": "20.1"}
            ]
        }"#;

        let envelope: QuoteEnvelope = serde_json::from_str(payload).unwrap();
        let quotes = coerce_items(&envelope.items);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].option_type, Some(OptionType::Call));
        assert_eq!(quotes[0].strike, Some(9000.0));
        assert_eq!(quotes[1].strike, None);
        assert_eq!(quotes[1].implied_vol, Some(20.1));
    }

    #[test]
    fn test_envelope_tolerates_missing_items_key() {
        let envelope: QuoteEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.items.is_empty());
    }

    #[test]
    fn test_load_quotes_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"items": [{{"fecha": "2024-05-01", "vencimiento": "2024-06-21",
                "strike": 9100, "tipo": "Put", "precio": 85.0, "σ": 21.25}}]}}"#
        )
        .unwrap();

        let quotes = load_quotes_file(file.path()).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].option_type, Some(OptionType::Put));
        assert_eq!(quotes[0].implied_vol, Some(21.25));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_quotes_file("/nonexistent/quotes.json").unwrap_err();
        assert!(matches!(err, SurfaceError::IO(_)));
    }

    #[test]
    fn test_config_from_env_overrides_base_url() {
        std::env::set_var("API_URL", "http://quotes.example:9999");
        let config = ApiConfig::from_env();
        std::env::remove_var("API_URL");

        assert_eq!(config.base_url, "http://quotes.example:9999");
    }

    #[test]
    #[ignore] // Requires a running quote service
    fn test_fetch_quotes() {
        let quotes = fetch_quotes().unwrap();
        println!("fetched {} rows", quotes.len());
        assert!(!quotes.is_empty());
    }
}
