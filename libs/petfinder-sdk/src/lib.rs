#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Typed client for the Petfinder v2 API.
//!
//! [`PetfinderClient`] authenticates with `OAuth2` client credentials (the
//! token is fetched on first use and cached), issues GET requests against the
//! configured base URL and decodes the JSON answers into the records in
//! [`models`].
//!
//! ```ignore
//! use petfinder_sdk::{ClientConfig, PetfinderClient, QueryParams};
//!
//! let client = PetfinderClient::new(ClientConfig::new("id", "secret"))?;
//! let response = client.get_animals(&QueryParams::nearby("10001", "25")).await?;
//! for animal in response.animals {
//!     println!("{} ({})", animal.name.unwrap_or_default(), animal.id);
//! }
//! ```
//!
//! Processes that want a single shared client without wiring it through can
//! use [`get_client`], which reads `PF_CLIENT_ID`, `PF_CLIENT_SECRET` and
//! `PF_BASE_URL` from the environment once.

mod cell;
mod client;
mod config;
pub mod decode;
mod error;
pub mod models;
mod query;

pub use cell::{ClientCell, get_client};
pub use client::{PetfinderClient, SDK_HEADER_NAME, SDK_HEADER_VALUE};
pub use config::{ClientConfig, DEFAULT_BASE_URL, resolve_base_url};
pub use error::{ApiError, DecodeError, InitError};
pub use models::{
    Animal, AnimalResponse, AnimalType, Breed, Organization, OrganizationResponse,
};
pub use query::QueryParams;
