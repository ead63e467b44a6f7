//! Records mirroring the Petfinder v2 JSON payloads.
//!
//! Field names follow the upstream snake_case keys; `_links` is exposed as
//! `links` and `type` as `animal_type`. Anything the upstream may omit is an
//! `Option` (or an empty `Vec`), so partial documents still decode.

mod animal;
mod animal_type;
mod common;
mod organization;

pub use animal::{
    Animal, AnimalEnvironment, AnimalLinks, AnimalResponse, Attributes, Breeds, Colors, Contact,
};
pub use animal_type::{AnimalType, Breed, TypeLinks};
pub use common::{Address, Link, Pagination, PaginationLinks, Photo};
pub use organization::{
    AdoptionPolicy, Hours, Organization, OrganizationLinks, OrganizationResponse, SocialMedia,
};
