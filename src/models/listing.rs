// src/models/listing.rs
use serde::{Deserialize, Deserializer, Serialize};

/// A curated listing from the internal catalog. Identifiers are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalListing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// 0 to 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl InternalListing {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: String::new(),
            rating: 0.0,
            price: None,
            image_ref: None,
        }
    }
}

/// A priced result from the live-inventory provider. `provider_id` is scoped
/// to the provider and may change between queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalListing {
    #[serde(deserialize_with = "provider_id_from_any")]
    pub provider_id: String,
    pub name: String,
    #[serde(default)]
    pub star_rating: Option<f64>,
    #[serde(default)]
    pub review_score: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub nightly_rate: Option<f64>,
    #[serde(default)]
    pub landing_url: Option<String>,
    #[serde(default)]
    pub amenity_flags: Vec<String>,
}

impl ExternalListing {
    pub fn new(provider_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            name: name.into(),
            star_rating: None,
            review_score: None,
            review_count: 0,
            currency: String::new(),
            nightly_rate: None,
            landing_url: None,
            amenity_flags: Vec::new(),
        }
    }
}

// Providers send hotel ids either as JSON numbers or strings.
fn provider_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}
