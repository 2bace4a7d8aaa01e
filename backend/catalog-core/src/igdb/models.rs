//! Raw IGDB v4 records as they come off the wire.
//!
//! Every field is optional or defaulted, and JSON `null` is accepted wherever
//! a list is expected. Normalization decides the fallbacks; deserialization
//! never fails because a field is missing.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgdbGame {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub category: Option<u32>,
    #[serde(default)]
    pub parent_game: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<IgdbPlatform>,
    #[serde(default)]
    pub cover: Option<IgdbCover>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub involved_companies: Vec<IgdbInvolvedCompany>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub websites: Vec<IgdbWebsite>,
}

impl IgdbGame {
    /// Display name, falling back when IGDB returns none.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => String::from("Unknown"),
        }
    }

    /// Platform names in upstream order, skipping entries without a name.
    pub fn platform_names(&self) -> Vec<String> {
        self.platforms
            .iter()
            .filter_map(|platform| platform.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgdbPlatform {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgdbCover {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgdbInvolvedCompany {
    #[serde(default)]
    pub developer: Option<bool>,
    #[serde(default)]
    pub company: Option<IgdbCompany>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgdbCompany {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgdbWebsite {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<u32>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
