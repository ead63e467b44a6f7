//! Tower layers used by the HTTP client stack.

mod default_headers;

pub use default_headers::{DefaultHeadersLayer, DefaultHeadersService};
