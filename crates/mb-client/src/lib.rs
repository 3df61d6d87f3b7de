//! # mb-client
//!
//! HTTP adapters implementing the `mb-core` service ports against the
//! mediaboard server API with `reqwest`.

mod api;

pub use api::HttpApi;
pub use reqwest::Url;
