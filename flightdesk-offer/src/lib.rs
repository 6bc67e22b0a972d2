pub mod destinations;
pub mod orchestrator;
pub mod pricing;

pub use destinations::{DestinationLookup, DestinationQuery};
pub use orchestrator::{SearchOrchestrator, SearchResults};
pub use pricing::PricingAdapter;
