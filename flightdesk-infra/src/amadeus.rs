//! `ProviderClient` backed by the Amadeus Self-Service REST API.

use async_trait::async_trait;
use flightdesk_core::{FlightOffer, OfferQuery, ProviderClient, ProviderError, ProviderLocation};
use flightdesk_shared::Masked;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::app_config::ProviderConfig;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const PRICING_PATH: &str = "/v1/shopping/flight-offers/pricing";
const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

/// Tokens are renewed this long before the provider says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

struct CachedToken {
    value: Masked<String>,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: Masked<String>,
    max_results: u32,
    token: RwLock<Option<CachedToken>>,
}

impl AmadeusClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            max_results: config.max_results,
            token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = self.token.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.expose().clone());
        }

        let mut slot = self.token.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.expose().clone());
        }

        let token = self.request_token().await?;
        let value = token.value.expose().clone();
        *slot = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken, ProviderError> {
        let response = self
            .http
            .post(self.url(TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose().as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(ProviderError::Authentication(describe_token_error(status, &body)));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;
        info!(expires_in = token.expires_in, "Obtained provider access token");

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        Ok(CachedToken {
            value: Masked::new(token.access_token),
            expires_at: Instant::now() + lifetime,
        })
    }

    async fn read_data<T: DeserializeOwned>(&self, response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                // Revoked or expired early; the next call fetches a new token.
                self.token.write().await.take();
            }
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                detail: describe_errors(status, &body),
            });
        }

        serde_json::from_str::<DataEnvelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProviderClient for AmadeusClient {
    async fn search_flight_offers(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, ProviderError> {
        let token = self.access_token().await?;
        let params = [
            ("originLocationCode", query.origin.clone()),
            ("destinationLocationCode", query.destination.clone()),
            ("departureDate", query.departure_date.format("%Y-%m-%d").to_string()),
            ("adults", query.adults.to_string()),
            ("max", self.max_results.to_string()),
        ];
        debug!(?params, "Searching flight offers");

        let response = self
            .http
            .get(self.url(FLIGHT_OFFERS_PATH))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await
            .map_err(transport_error)?;

        self.read_data(response).await
    }

    async fn price_flight_offers(
        &self,
        offers: &[FlightOffer],
        currency: &str,
    ) -> Result<Value, ProviderError> {
        let token = self.access_token().await?;
        let body = json!({
            "data": {
                "type": "flight-offers-pricing",
                "flightOffers": offers,
            }
        });

        let response = self
            .http
            .post(self.url(PRICING_PATH))
            .bearer_auth(token)
            .header("X-HTTP-Method-Override", "GET")
            .query(&[("currencyCode", currency)])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        self.read_data(response).await
    }

    async fn search_locations(&self, keyword: &str) -> Result<Vec<ProviderLocation>, ProviderError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(self.url(LOCATIONS_PATH))
            .bearer_auth(token)
            .query(&[("subType", "AIRPORT,CITY"), ("keyword", keyword)])
            .send()
            .await
            .map_err(transport_error)?;

        self.read_data(response).await
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Transport(format!("request timed out: {}", err))
    } else {
        ProviderError::Transport(err.to_string())
    }
}

/// Condenses `{"errors": [{"title", "detail"}, ...]}` into one line.
fn describe_errors(status: StatusCode, body: &str) -> String {
    let described: Vec<String> = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| {
            envelope
                .errors
                .into_iter()
                .filter_map(|item| match (item.title, item.detail) {
                    (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
                    (Some(text), None) | (None, Some(text)) => Some(text),
                    (None, None) => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if !described.is_empty() {
        return described.join("; ");
    }
    fallback_description(status, body)
}

fn describe_token_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(TokenErrorResponse {
            error_description: Some(description),
            ..
        }) => description,
        Ok(TokenErrorResponse {
            error: Some(error), ..
        }) => error,
        _ => fallback_description(status, body),
    }
}

fn fallback_description(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_errors_joins_items() {
        let body = r#"{"errors": [
            {"status": 400, "code": 477, "title": "INVALID FORMAT", "detail": "departureDate is invalid"},
            {"status": 400, "code": 32171, "title": "MANDATORY DATA MISSING"}
        ]}"#;
        assert_eq!(
            describe_errors(StatusCode::BAD_REQUEST, body),
            "INVALID FORMAT: departureDate is invalid; MANDATORY DATA MISSING"
        );
    }

    #[test]
    fn test_describe_errors_falls_back_to_body() {
        assert_eq!(
            describe_errors(StatusCode::BAD_GATEWAY, "upstream down"),
            "HTTP 502 Bad Gateway: upstream down"
        );
        assert_eq!(describe_errors(StatusCode::BAD_GATEWAY, ""), "HTTP 502 Bad Gateway");
        assert_eq!(
            describe_errors(StatusCode::BAD_REQUEST, r#"{"errors": []}"#),
            r#"HTTP 400 Bad Request: {"errors": []}"#
        );
    }

    #[test]
    fn test_describe_token_error() {
        let body = r#"{"error": "invalid_client", "error_description": "Client credentials are invalid", "code": 38187}"#;
        assert_eq!(
            describe_token_error(StatusCode::UNAUTHORIZED, body),
            "Client credentials are invalid"
        );
        assert_eq!(
            describe_token_error(StatusCode::UNAUTHORIZED, r#"{"error": "invalid_client"}"#),
            "invalid_client"
        );
    }

    #[test]
    fn test_token_freshness() {
        let fresh = CachedToken {
            value: Masked::new("t".into()),
            expires_at: Instant::now() + Duration::from_secs(60),
        };
        let stale = CachedToken {
            value: Masked::new("t".into()),
            expires_at: Instant::now(),
        };
        assert!(fresh.is_fresh());
        assert!(!stale.is_fresh());
    }
}
