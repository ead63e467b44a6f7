use serde::{Deserialize, Serialize};

use super::common::{Address, Link, Pagination, Photo};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub hours: Option<Hours>,
    pub url: Option<String>,
    pub website: Option<String>,
    pub mission_statement: Option<String>,
    pub adoption: Option<AdoptionPolicy>,
    pub social_media: Option<SocialMedia>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Miles from the searched location; only present on location searches.
    pub distance: Option<f64>,
    #[serde(rename = "_links", default)]
    pub links: OrganizationLinks,
}

/// Opening hours as free text per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hours {
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionPolicy {
    pub policy: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub instagram: Option<String>,
    pub pinterest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub animals: Option<Link>,
}

/// Body of `/organizations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub pagination: Pagination,
}
