//! Geocoding query types.

use crate::error::{GeollmError, Result};
use serde::{Deserialize, Serialize};

/// Country names that mark a place name as already carrying its country.
pub const COUNTRY_TOKENS: [&str; 7] =
    ["india", "pakistan", "bangladesh", "nepal", "bhutan", "sri lanka", "myanmar"];

/// Whether `name` mentions one of [`COUNTRY_TOKENS`] (case-insensitive substring match)
pub fn has_country_token(name: &str) -> bool {
    let lowered = name.to_lowercase();
    COUNTRY_TOKENS.iter().any(|country| lowered.contains(country))
}

/// Append ", India" unless the name already names a country
pub fn country_bias(name: &str) -> String {
    if has_country_token(name) {
        name.to_string()
    } else {
        format!("{}, India", name)
    }
}

/// Flags forwarded to the geocoding backend with a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// ISO 3166-1 alpha-2 codes the search is restricted to
    pub country_codes: Option<String>,
    pub address_details: bool,
    pub name_details: bool,
    pub extra_tags: bool,
    /// Preferred result language
    pub language: Option<String>,
}

impl SearchOptions {
    /// Restricted to India, with every detail flag enabled
    pub fn india() -> Self {
        Self {
            country_codes: Some("in".to_string()),
            address_details: true,
            name_details: true,
            extra_tags: true,
            language: Some("en".to_string()),
        }
    }

    /// No country restriction; address and name details only
    pub fn worldwide() -> Self {
        Self {
            country_codes: None,
            address_details: true,
            name_details: true,
            extra_tags: false,
            language: Some("en".to_string()),
        }
    }
}

/// A single request to the geocoding backend. Every query asks for exactly one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeocodeQuery {
    FreeForm {
        text: String,
        options: SearchOptions,
    },
    Structured {
        city: String,
        state: String,
        country: String,
    },
}

impl GeocodeQuery {
    pub fn free_form(text: impl Into<String>, options: SearchOptions) -> Self {
        GeocodeQuery::FreeForm { text: text.into(), options }
    }

    /// Structured city/state lookup inside India
    pub fn structured_india(city: impl Into<String>, state: impl Into<String>) -> Self {
        GeocodeQuery::Structured {
            city: city.into(),
            state: state.into(),
            country: "India".to_string(),
        }
    }

    /// Reject queries the backend cannot meaningfully answer
    pub fn validate(&self) -> Result<()> {
        match self {
            GeocodeQuery::FreeForm { text, .. } if text.trim().is_empty() => {
                Err(GeollmError::InvalidQuery { reason: "search text is empty".to_string() })
            }
            GeocodeQuery::Structured { city, .. } if city.trim().is_empty() => {
                Err(GeollmError::InvalidQuery { reason: "city is empty".to_string() })
            }
            _ => Ok(()),
        }
    }

    /// Short human-readable form for logs
    pub fn describe(&self) -> String {
        match self {
            GeocodeQuery::FreeForm { text, .. } => text.clone(),
            GeocodeQuery::Structured { city, state, country } => {
                format!("city={}, state={}, country={}", city, state, country)
            }
        }
    }
}
