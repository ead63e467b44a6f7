use serde::{Deserialize, Serialize};

use super::common::Link;

/// One entry of `/types` (`dog`, `cat`, `rabbit`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalType {
    pub name: String,
    #[serde(default)]
    pub coats: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(rename = "_links", default)]
    pub links: TypeLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLinks {
    #[serde(rename = "self")]
    pub self_link: Option<Link>,
    pub breeds: Option<Link>,
}

/// One entry of `/types/{type}/breeds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub name: String,
}
