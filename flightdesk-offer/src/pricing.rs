use flightdesk_core::{CoreResult, PricingRequest, ProviderClient};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Confirms the current price of one offer with the provider.
pub struct PricingAdapter {
    provider: Arc<dyn ProviderClient>,
    currency: String,
}

impl PricingAdapter {
    pub fn new(provider: Arc<dyn ProviderClient>, currency: impl Into<String>) -> Self {
        Self {
            provider,
            currency: currency.into(),
        }
    }

    /// The provider's priced payload is returned as-is.
    pub async fn price(&self, request: &PricingRequest) -> CoreResult<Value> {
        let offer = request.offer()?;

        let priced = self
            .provider
            .price_flight_offers(std::slice::from_ref(&offer), &self.currency)
            .await
            .map_err(|e| {
                warn!(offer_id = ?offer.id(), error = %e, "Provider pricing failed");
                e
            })?;

        info!(offer_id = ?offer.id(), currency = %self.currency, "Flight offer priced");
        Ok(priced)
    }
}
