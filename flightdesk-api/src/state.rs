use std::sync::Arc;

use flightdesk_core::ProviderClient;
use flightdesk_offer::{DestinationLookup, PricingAdapter, SearchOrchestrator};
use flightdesk_order::BookingAssembler;

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchOrchestrator>,
    pub pricing: Arc<PricingAdapter>,
    pub destinations: Arc<DestinationLookup>,
    pub bookings: Arc<BookingAssembler>,
}

impl AppState {
    /// Wires every service to the same upstream provider.
    pub fn new(provider: Arc<dyn ProviderClient>, currency: impl Into<String>) -> Self {
        Self {
            search: Arc::new(SearchOrchestrator::new(provider.clone())),
            pricing: Arc::new(PricingAdapter::new(provider.clone(), currency)),
            destinations: Arc::new(DestinationLookup::new(provider)),
            bookings: Arc::new(BookingAssembler::new()),
        }
    }
}
