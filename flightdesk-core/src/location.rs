use serde::{Deserialize, Serialize};

/// Location record as returned by the provider's reference-data search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLocation {
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub detailed_name: Option<String>,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub address: LocationAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAddress {
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Destination suggestion returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub iata_code: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub full_name: Option<String>,
}

impl Destination {
    /// Records without an IATA code cannot be searched on and yield `None`.
    pub fn from_provider(location: ProviderLocation) -> Option<Self> {
        let iata_code = location.iata_code.filter(|code| !code.trim().is_empty())?;
        let full_name = location.detailed_name.or_else(|| location.name.clone());
        Some(Self {
            iata_code,
            name: location.name,
            city: location.address.city_name,
            country_code: location.address.country_code,
            kind: location.sub_type,
            full_name,
        })
    }
}
