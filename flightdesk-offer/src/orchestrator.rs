use flightdesk_core::{
    CoreResult, FlightOffer, Leg, OfferQuery, ProviderClient, ProviderError, SearchRequest,
    TaggedOffer,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Offers for a search. Round-trip results carry their leg; both shapes
/// serialize as a flat JSON list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    OneWay(Vec<FlightOffer>),
    RoundTrip(Vec<TaggedOffer>),
}

/// Runs flight searches against the provider.
///
/// The provider has no round-trip search in this workflow, so a round trip
/// is two one-way searches (the return leg with the route reversed) whose
/// results are tagged and concatenated, outbound first.
pub struct SearchOrchestrator {
    provider: Arc<dyn ProviderClient>,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn ProviderClient>) -> Self {
        Self { provider }
    }

    pub async fn search(&self, request: &SearchRequest) -> CoreResult<SearchResults> {
        let criteria = request.validate()?;
        let outbound = criteria.outbound_query();

        let Some(inbound) = criteria.return_query() else {
            let offers = self.fetch(&outbound).await?;
            info!(
                origin = %criteria.origin,
                destination = %criteria.destination,
                trip_type = %criteria.trip_type,
                offers = offers.len(),
                "Flight search completed"
            );
            return Ok(SearchResults::OneWay(offers));
        };

        // Both legs are independent; the first failure aborts the whole search.
        let (outbound_offers, return_offers) =
            tokio::try_join!(self.fetch(&outbound), self.fetch(&inbound))?;

        info!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            trip_type = %criteria.trip_type,
            outbound = outbound_offers.len(),
            inbound = return_offers.len(),
            "Round-trip search completed"
        );

        let merged = tag_all(outbound_offers, Leg::Outbound)
            .chain(tag_all(return_offers, Leg::Return))
            .collect();
        Ok(SearchResults::RoundTrip(merged))
    }

    async fn fetch(&self, query: &OfferQuery) -> Result<Vec<FlightOffer>, ProviderError> {
        self.provider.search_flight_offers(query).await.map_err(|e| {
            warn!(
                origin = %query.origin,
                destination = %query.destination,
                date = %query.departure_date,
                error = %e,
                "Provider search failed"
            );
            e
        })
    }
}

fn tag_all(offers: Vec<FlightOffer>, leg: Leg) -> impl Iterator<Item = TaggedOffer> {
    offers.into_iter().map(move |offer| offer.tagged(leg))
}
