use flightdesk_core::{
    BookedFlights, BookingConfirmation, BookingRequest, BookingStatus, CoreError, CoreResult,
    FlightOffer, FlightSummary,
};
use tracing::{debug, info};
use uuid::Uuid;

pub const BOOKING_ID_PREFIX: &str = "BK";

/// Builds booking confirmations from a passenger and a flight selection.
///
/// Nothing is persisted and no provider call is made: each call returns an
/// independent confirmation with a fresh identifier.
#[derive(Debug, Default, Clone)]
pub struct BookingAssembler;

impl BookingAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, request: BookingRequest) -> CoreResult<BookingConfirmation> {
        let passenger = request.passenger.unwrap_or_default();
        let missing = passenger.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Booking rejected: incomplete passenger");
            return Err(CoreError::validation("Missing passenger information"));
        }

        // Round trip only when both legs were sent; otherwise a single flight is required.
        let flights = match (
            present(request.outbound_flight),
            present(request.return_flight),
        ) {
            (Some(outbound), Some(inbound)) => BookedFlights::RoundTrip {
                outbound_flight: FlightSummary::from(&outbound),
                return_flight: FlightSummary::from(&inbound),
            },
            _ => {
                let flight = present(request.flight)
                    .ok_or_else(|| CoreError::validation("Flight data is required"))?;
                BookedFlights::OneWay {
                    flight: FlightSummary::from(&flight),
                }
            }
        };

        let trip_type = flights.trip_kind();
        let booking_id = generate_booking_id();
        let message = format!(
            "Your {} booking is confirmed. A confirmation email has been sent to {}.",
            trip_type,
            passenger.email.as_deref().unwrap_or_default().trim()
        );

        info!(booking_id = %booking_id, trip_type = %trip_type, "Booking confirmed");

        Ok(BookingConfirmation {
            booking_id,
            status: BookingStatus::Confirmed,
            trip_type,
            passenger,
            flights,
            message,
        })
    }
}

fn present(offer: Option<FlightOffer>) -> Option<FlightOffer> {
    offer.filter(|o| !o.is_empty())
}

/// `BK` followed by the first 8 hex digits of a random v4 UUID, uppercased.
pub fn generate_booking_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", BOOKING_ID_PREFIX, hex[..8].to_ascii_uppercase())
}
