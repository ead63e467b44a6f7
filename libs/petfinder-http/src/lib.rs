#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Outbound HTTP transport for the Petfinder gateway
//!
//! A hyper + rustls client wrapped in a small tower stack:
//! - HTTPS only unless [`TransportSecurity::AllowInsecureHttp`] is selected
//! - Per-request timeout
//! - Default headers (`User-Agent` and any fixed client identification headers)
//! - Transparent response decompression (gzip, brotli, deflate)
//! - Size-limited body reads, applied to decompressed bytes
//!
//! Requests are never retried. A failed call surfaces its [`HttpError`]
//! to the caller unchanged.
//!
//! # Example
//!
//! ```ignore
//! use petfinder_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .default_header("x-api-sdk", "my-sdk")
//!     .build()?;
//!
//! let body = client
//!     .get("https://api.petfinder.com/v2/types")
//!     .send()
//!     .await?
//!     .checked_bytes()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod request;
mod response;
mod tls;

pub use builder::{HttpClientBuilder, InnerService};
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TransportSecurity};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{DefaultHeadersLayer, DefaultHeadersService};
pub use request::RequestBuilder;
pub use response::{ERROR_BODY_PREVIEW_LIMIT, HttpResponse, ResponseBody};
