use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::provider::OfferQuery;
use crate::{CoreError, CoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    #[default]
    Oneway,
    Twoway,
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::Oneway => f.write_str("oneway"),
            TripType::Twoway => f.write_str("twoway"),
        }
    }
}

/// Search body as sent by the client. Every field is optional here so that
/// missing values surface as validation messages instead of parse errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub trip_type: Option<TripType>,
    #[serde(default)]
    pub passenger_count: Option<i64>,
}

/// A search that passed validation: codes are uppercase, dates are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub trip_type: TripType,
    pub passenger_count: u32,
}

impl SearchRequest {
    /// Checks run in a fixed order and the first failure is reported.
    pub fn validate(&self) -> CoreResult<SearchCriteria> {
        let (Some(origin), Some(destination), Some(departure)) = (
            present(&self.origin),
            present(&self.destination),
            present(&self.departure_date),
        ) else {
            return Err(CoreError::validation(
                "Origin, destination, and departure date are required",
            ));
        };

        if !is_iata_code(origin) || !is_iata_code(destination) {
            return Err(CoreError::validation(
                "Origin and destination must be 3-letter IATA codes",
            ));
        }

        let trip_type = self.trip_type.unwrap_or_default();
        let return_raw = match trip_type {
            TripType::Oneway => None,
            TripType::Twoway => Some(present(&self.return_date).ok_or_else(|| {
                CoreError::validation("Return date is required for round-trip searches")
            })?),
        };

        let departure_date = parse_date(departure)?;
        let return_date = return_raw.map(parse_date).transpose()?;
        if let Some(return_date) = return_date {
            if return_date < departure_date {
                return Err(CoreError::validation(
                    "Return date cannot be before departure date",
                ));
            }
        }

        let passenger_count = self.passenger_count.unwrap_or(1);
        if passenger_count < 1 {
            return Err(CoreError::validation("Passenger count must be at least 1"));
        }
        let passenger_count = u32::try_from(passenger_count)
            .map_err(|_| CoreError::validation("Passenger count is too large"))?;

        Ok(SearchCriteria {
            origin: origin.to_ascii_uppercase(),
            destination: destination.to_ascii_uppercase(),
            departure_date,
            return_date,
            trip_type,
            passenger_count,
        })
    }
}

impl SearchCriteria {
    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::Twoway
    }

    pub fn outbound_query(&self) -> OfferQuery {
        OfferQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date,
            adults: self.passenger_count,
        }
    }

    /// The return leg flies the route backwards on the return date.
    pub fn return_query(&self) -> Option<OfferQuery> {
        let return_date = self.return_date.filter(|_| self.is_round_trip())?;
        Some(OfferQuery {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            departure_date: return_date,
            adults: self.passenger_count,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CoreError::validation("Dates must be in YYYY-MM-DD format"))
}
