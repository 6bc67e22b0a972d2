use flightdesk_core::{CoreError, CoreResult, Destination, ProviderClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationQuery {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Airport and city suggestions for the search form.
pub struct DestinationLookup {
    provider: Arc<dyn ProviderClient>,
}

impl DestinationLookup {
    pub fn new(provider: Arc<dyn ProviderClient>) -> Self {
        Self { provider }
    }

    pub async fn lookup(&self, query: &DestinationQuery) -> CoreResult<Vec<Destination>> {
        let keyword = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| CoreError::validation("Keyword is required"))?;

        let locations = self.provider.search_locations(keyword).await.map_err(|e| {
            warn!(keyword, error = %e, "Provider location search failed");
            e
        })?;

        let destinations: Vec<Destination> = locations
            .into_iter()
            .filter_map(Destination::from_provider)
            .collect();
        debug!(keyword, matches = destinations.len(), "Destination lookup completed");
        Ok(destinations)
    }
}
