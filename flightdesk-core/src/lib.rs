pub mod booking;
pub mod location;
pub mod mock;
pub mod offer;
pub mod provider;
pub mod search;

pub use booking::{
    BookedFlights, BookingConfirmation, BookingRequest, BookingStatus, FlightSummary, Passenger,
    TripKind,
};
pub use location::{Destination, LocationAddress, ProviderLocation};
pub use mock::{MockProviderClient, ProviderCall};
pub use offer::{FlightOffer, Leg, PricingRequest, TaggedOffer};
pub use provider::{OfferQuery, ProviderClient, ProviderError};
pub use search::{SearchCriteria, SearchRequest, TripType};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
