use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::rates::{RateProvider, RateTable};

const LATEST_ENDPOINT: &str = "/api/latest.json";

/// Fetches the latest rates from Open Exchange Rates.
pub struct OpenExchangeRatesProvider {
    base_url: String,
    app_id: String,
}

impl OpenExchangeRatesProvider {
    pub fn new(base_url: &str, app_id: &str) -> Self {
        OpenExchangeRatesProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LATEST_ENDPOINT)
    }
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    status: u16,
    message: String,
    #[serde(default)]
    description: String,
}

#[async_trait]
impl RateProvider for OpenExchangeRatesProvider {
    #[instrument(name = "OpenExchangeRatesFetch", skip(self))]
    async fn latest(&self) -> Result<RateTable> {
        let endpoint = self.endpoint();
        let url = Url::parse_with_params(&endpoint, &[("app_id", self.app_id.as_str())])
            .map_err(|e| anyhow!("Invalid rates URL {}: {}", endpoint, e))?;
        // The key stays out of logs and error messages.
        debug!("Requesting latest rates from {}", endpoint);

        let client = reqwest::Client::builder()
            .user_agent("cashconv/1.0")
            .build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Request error for URL: {endpoint}"))?;

        let status = response.status();
        debug!(%status, "Received rates response");
        let text = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to read response from {endpoint}"))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(api_error) => anyhow!(
                    "API error {} ({}): {}",
                    api_error.status,
                    api_error.message,
                    api_error.description
                ),
                Err(_) => anyhow!("HTTP error: {}", status),
            });
        }

        let table: RateTable = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response from {}: {}", endpoint, e))?;

        debug!(
            base = %table.base,
            rates = table.rates.len(),
            published_at = ?table.published_at(),
            "Decoded rate table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LATEST_ENDPOINT))
            .and(query_param("app_id", "test-key"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "disclaimer": "Usage subject to terms",
            "license": "https://openexchangerates.org/license",
            "timestamp": 1700000000,
            "base": "USD",
            "rates": {
                "AUD": 1.5,
                "EUR": 0.92,
                "GBP": 0.79,
                "USD": 1
            }
        }"#;

        let mock_server = create_mock_server(200, mock_response).await;
        let provider = OpenExchangeRatesProvider::new(&mock_server.uri(), "test-key");

        let table = provider.latest().await.expect("Failed to fetch rates");
        assert_eq!(table.base, "USD");
        assert_eq!(table.rates.len(), 4);
        assert_eq!(table.rate("AUD").unwrap(), 1.5);
        assert_eq!(table.timestamp, Some(1700000000));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_response = r#"{"base": "USD", "rates": {"USD": 1}}"#;
        let mock_server = create_mock_server(200, mock_response).await;
        let provider =
            OpenExchangeRatesProvider::new(&format!("{}/", mock_server.uri()), "test-key");

        assert!(provider.latest().await.is_ok());
    }

    #[tokio::test]
    async fn test_api_error_body_is_surfaced() {
        let mock_response = r#"{
            "error": true,
            "status": 401,
            "message": "invalid_app_id",
            "description": "Invalid App ID provided."
        }"#;

        let mock_server = create_mock_server(401, mock_response).await;
        let provider = OpenExchangeRatesProvider::new(&mock_server.uri(), "test-key");

        let result = provider.latest().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "API error 401 (invalid_app_id): Invalid App ID provided."
        );
    }

    #[tokio::test]
    async fn test_http_error_without_body() {
        let mock_server = create_mock_server(500, "").await;
        let provider = OpenExchangeRatesProvider::new(&mock_server.uri(), "test-key");

        let result = provider.latest().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_response = r#"{"base": "USD", "rate": {"USD": 1}}"#; // "rate" instead of "rates"
        let mock_server = create_mock_server(200, mock_response).await;
        let provider = OpenExchangeRatesProvider::new(&mock_server.uri(), "test-key");

        let result = provider.latest().await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response from")
        );
    }

    #[tokio::test]
    async fn test_missing_app_id_still_sends_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LATEST_ENDPOINT))
            .and(query_param("app_id", ""))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"error": true, "status": 401, "message": "missing_app_id", "description": "No App ID provided."}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenExchangeRatesProvider::new(&mock_server.uri(), "");
        let err = provider.latest().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error 401 (missing_app_id): No App ID provided."
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = OpenExchangeRatesProvider::new(&format!("http://{addr}"), "test-key");
        let err = provider.latest().await.unwrap_err();
        assert!(err.to_string().starts_with("Request error for URL:"));

        // The OS-level cause must survive in the error chain.
        let report = format!("{err:#}");
        assert!(report.to_lowercase().contains("refused"), "{report}");
        assert!(!report.contains("test-key"));
        assert!(!format!("{err:?}").contains("test-key"));
    }
}
