use flightdesk_shared::Masked;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::offer::FlightOffer;

/// Passenger fields that must be present and non-blank to book.
pub const REQUIRED_PASSENGER_FIELDS: [&str; 3] = ["firstName", "lastName", "email"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<Masked<Value>>,
    /// Kept as sent; clients post phone numbers as strings or numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    /// Anything else the client sent; echoed back as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Passenger {
    /// Names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [&self.first_name, &self.last_name, &self.email];
        REQUIRED_PASSENGER_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().map_or(true, |s| s.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Booking body as sent by the client: a passenger plus either `flight`, or
/// `outbound_flight` and `return_flight`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub passenger: Option<Passenger>,
    #[serde(default)]
    pub flight: Option<FlightOffer>,
    #[serde(default)]
    pub outbound_flight: Option<FlightOffer>,
    #[serde(default)]
    pub return_flight: Option<FlightOffer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripKind {
    OneWay,
    RoundTrip,
}

impl fmt::Display for TripKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripKind::OneWay => f.write_str("one-way"),
            TripKind::RoundTrip => f.write_str("round-trip"),
        }
    }
}

/// The part of an offer that is kept on a confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub price: Value,
    pub itineraries: Value,
}

impl From<&FlightOffer> for FlightSummary {
    fn from(offer: &FlightOffer) -> Self {
        Self {
            price: offer.get("price").cloned().unwrap_or(Value::Null),
            itineraries: offer.get("itineraries").cloned().unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookedFlights {
    OneWay {
        flight: FlightSummary,
    },
    RoundTrip {
        #[serde(rename = "outboundFlight")]
        outbound_flight: FlightSummary,
        #[serde(rename = "returnFlight")]
        return_flight: FlightSummary,
    },
}

impl BookedFlights {
    pub fn trip_kind(&self) -> TripKind {
        match self {
            BookedFlights::OneWay { .. } => TripKind::OneWay,
            BookedFlights::RoundTrip { .. } => TripKind::RoundTrip,
        }
    }
}

/// Returned to the client once and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub status: BookingStatus,
    pub trip_type: TripKind,
    pub passenger: Passenger,
    #[serde(flatten)]
    pub flights: BookedFlights,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passenger_round_trips_extra_fields() {
        let input = json!({
            "firstName": "Ayu",
            "lastName": "Lestari",
            "email": "ayu@example.com",
            "passportNumber": "X1234567",
            "nationality": "ID"
        });
        let passenger: Passenger = serde_json::from_value(input.clone()).unwrap();

        assert!(passenger.missing_fields().is_empty());
        assert_eq!(passenger.extra["nationality"], "ID");
        assert_eq!(serde_json::to_value(&passenger).unwrap(), input);
        assert!(!format!("{:?}", passenger).contains("X1234567"));
    }

    #[test]
    fn test_optional_fields_accept_numbers() {
        let request: BookingRequest = serde_json::from_value(json!({
            "passenger": {
                "firstName": "A",
                "lastName": "B",
                "email": "a@b.com",
                "passportNumber": 12345678,
                "phone": 62811234567u64
            },
            "flight": {"id": "1"}
        }))
        .unwrap();

        let passenger = request.passenger.unwrap();
        assert!(passenger.missing_fields().is_empty());
        assert!(!format!("{:?}", passenger).contains("12345678"));

        let echoed = serde_json::to_value(&passenger).unwrap();
        assert_eq!(echoed["passportNumber"], 12345678);
        assert_eq!(echoed["phone"], 62811234567u64);
    }

    #[test]
    fn test_missing_fields_lists_blank_and_absent() {
        let passenger: Passenger =
            serde_json::from_value(json!({"firstName": "Ayu", "lastName": "  "})).unwrap();
        assert_eq!(passenger.missing_fields(), vec!["lastName", "email"]);
    }

    #[test]
    fn test_flight_summary_drops_other_fields() {
        let offer: FlightOffer = serde_json::from_value(json!({
            "id": "7",
            "price": {"total": "100"},
            "itineraries": [{"duration": "PT2H"}],
            "validatingAirlineCodes": ["GA"]
        }))
        .unwrap();

        let summary = serde_json::to_value(FlightSummary::from(&offer)).unwrap();
        assert_eq!(
            summary,
            json!({"price": {"total": "100"}, "itineraries": [{"duration": "PT2H"}]})
        );
    }

    #[test]
    fn test_trip_kind_serialization() {
        assert_eq!(serde_json::to_value(TripKind::OneWay).unwrap(), "one-way");
        assert_eq!(serde_json::to_value(TripKind::RoundTrip).unwrap(), "round-trip");
        assert_eq!(serde_json::to_value(BookingStatus::Confirmed).unwrap(), "confirmed");
    }
}
