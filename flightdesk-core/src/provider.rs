use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::location::ProviderLocation;
use crate::offer::FlightOffer;

/// One directional search as the provider understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub adults: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("Provider authentication failed: {0}")]
    Authentication(String),
    #[error("Provider unreachable: {0}")]
    Transport(String),
    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

/// The third-party flight-data service. One instance is built at startup
/// and shared by every request.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Offers for a single one-way leg, in the provider's order.
    async fn search_flight_offers(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, ProviderError>;

    /// Re-price offers in the given currency. The priced payload is returned untouched.
    async fn price_flight_offers(
        &self,
        offers: &[FlightOffer],
        currency: &str,
    ) -> Result<Value, ProviderError>;

    /// Airports and cities matching a free-text keyword.
    async fn search_locations(&self, keyword: &str) -> Result<Vec<ProviderLocation>, ProviderError>;
}
