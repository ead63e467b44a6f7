use serde::{Deserialize, Serialize};

use super::common::{Address, Link, Pagination, Photo};

/// An adoptable animal as returned by `/animals` and `/animals/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: u64,
    pub organization_id: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    pub species: Option<String>,
    pub breeds: Option<Breeds>,
    pub colors: Option<Colors>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub coat: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub status: Option<String>,
    pub attributes: Option<Attributes>,
    pub environment: Option<AnimalEnvironment>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub contact: Option<Contact>,
    pub published_at: Option<String>,
    /// Miles from the searched location; only present on location searches.
    pub distance: Option<f64>,
    #[serde(rename = "_links", default)]
    pub links: AnimalLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breeds {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub mixed: Option<bool>,
    pub unknown: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tertiary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub spayed_neutered: Option<bool>,
    pub house_trained: Option<bool>,
    pub declawed: Option<bool>,
    pub special_needs: Option<bool>,
    pub shots_current: Option<bool>,
}

/// Whether the animal is good with children, dogs and cats (`None` = unknown).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalEnvironment {
    pub children: Option<bool>,
    pub dogs: Option<bool>,
    pub cats: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    #[serde(rename = "type")]
    pub animal_type: Option<Link>,
    pub organization: Option<Link>,
}

/// Body of `/animals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimalResponse {
    #[serde(default)]
    pub animals: Vec<Animal>,
    #[serde(default)]
    pub pagination: Pagination,
}
