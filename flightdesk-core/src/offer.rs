use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Key added to each offer of a round-trip search result.
pub const LEG_KEY: &str = "_leg";

/// A priced itinerary exactly as the provider returned it.
///
/// The record is opaque to this service: it is passed back to the provider
/// for pricing and only `price` and `itineraries` are ever read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightOffer(Map<String, Value>);

impl FlightOffer {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn tagged(self, leg: Leg) -> TaggedOffer {
        TaggedOffer { leg, offer: self }
    }
}

impl TryFrom<Value> for FlightOffer {
    type Error = crate::CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(crate::CoreError::validation(format!(
                "Flight offer must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Body of a pricing call: exactly one offer under `flight`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingRequest {
    #[serde(default)]
    pub flight: Option<Value>,
}

impl PricingRequest {
    pub fn offer(&self) -> crate::CoreResult<FlightOffer> {
        match &self.flight {
            None | Some(Value::Null) => Err(crate::CoreError::validation("Flight data is required")),
            Some(value) => {
                let offer = FlightOffer::try_from(value.clone())?;
                if offer.is_empty() {
                    return Err(crate::CoreError::validation("Flight data is required"));
                }
                Ok(offer)
            }
        }
    }
}

/// One direction of a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Outbound,
    Return,
}

impl Leg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leg::Outbound => "outbound",
            Leg::Return => "return",
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider offer paired with the leg it was found for.
///
/// Serializes as the offer's own fields followed by `"_leg"`. The upstream
/// record is left untouched; an upstream `_leg` key is shadowed by the tag.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedOffer {
    pub leg: Leg,
    pub offer: FlightOffer,
}

impl Serialize for TaggedOffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = self.offer.fields();
        let len = fields.len() + usize::from(!fields.contains_key(LEG_KEY));
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != LEG_KEY) {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(LEG_KEY, &self.leg)?;
        map.end()
    }
}
