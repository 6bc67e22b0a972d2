use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::location::ProviderLocation;
use crate::offer::FlightOffer;
use crate::provider::{OfferQuery, ProviderClient, ProviderError};

/// A call received by [`MockProviderClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Search(OfferQuery),
    Price { offers: Vec<FlightOffer>, currency: String },
    Locations(String),
}

type RouteKey = (String, String, NaiveDate);

/// In-memory provider with scripted answers. Every call is recorded so tests
/// can assert on how many upstream requests were made and with what.
///
/// Unscripted searches return no offers, unscripted pricing echoes the offers
/// back inside a pricing envelope, unscripted location searches are empty.
#[derive(Default)]
pub struct MockProviderClient {
    searches: HashMap<RouteKey, Result<Vec<FlightOffer>, ProviderError>>,
    pricing: Option<Result<Value, ProviderError>>,
    locations: Option<Result<Vec<ProviderLocation>, ProviderError>>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl MockProviderClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offers(
        mut self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
        offers: Vec<FlightOffer>,
    ) -> Self {
        self.searches
            .insert((origin.to_string(), destination.to_string(), date), Ok(offers));
        self
    }

    pub fn with_search_error(
        mut self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
        error: ProviderError,
    ) -> Self {
        self.searches
            .insert((origin.to_string(), destination.to_string(), date), Err(error));
        self
    }

    pub fn with_pricing(mut self, result: Result<Value, ProviderError>) -> Self {
        self.pricing = Some(result);
        self
    }

    pub fn with_locations(mut self, result: Result<Vec<ProviderLocation>, ProviderError>) -> Self {
        self.locations = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn search_calls(&self) -> Vec<OfferQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProviderCall::Search(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ProviderCall) {
        tracing::debug!(?call, "mock provider call");
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }
}

#[async_trait]
impl ProviderClient for MockProviderClient {
    async fn search_flight_offers(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, ProviderError> {
        self.record(ProviderCall::Search(query.clone()));
        let key = (query.origin.clone(), query.destination.clone(), query.departure_date);
        self.searches.get(&key).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn price_flight_offers(
        &self,
        offers: &[FlightOffer],
        currency: &str,
    ) -> Result<Value, ProviderError> {
        self.record(ProviderCall::Price {
            offers: offers.to_vec(),
            currency: currency.to_string(),
        });
        match &self.pricing {
            Some(result) => result.clone(),
            None => Ok(json!({
                "type": "flight-offers-pricing",
                "flightOffers": offers,
            })),
        }
    }

    async fn search_locations(&self, keyword: &str) -> Result<Vec<ProviderLocation>, ProviderError> {
        self.record(ProviderCall::Locations(keyword.to_string()));
        self.locations.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_and_defaults() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let provider = MockProviderClient::new();
        let query = OfferQuery {
            origin: "CGK".into(),
            destination: "SIN".into(),
            departure_date: date,
            adults: 1,
        };

        assert!(provider.search_flight_offers(&query).await.unwrap().is_empty());
        assert!(provider.search_locations("jak").await.unwrap().is_empty());

        assert_eq!(
            provider.calls(),
            vec![ProviderCall::Search(query), ProviderCall::Locations("jak".into())]
        );
    }
}
