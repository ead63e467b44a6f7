#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Inbound HTTP gateway for the Petfinder API.
//!
//! Serves `GET /nearby?zip=&distance=` and `GET /findpet/{id}` by calling the
//! upstream through [`petfinder_sdk::PetfinderClient`].

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod shutdown;

pub use config::{CliOverrides, GatewayConfig, LogFormat};
pub use error::GatewayError;
pub use routes::{AppState, build_router};
