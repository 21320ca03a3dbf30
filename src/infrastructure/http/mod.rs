//! Shared reqwest-backed HTTP client

mod client;

pub use client::{HeadResponse, HttpClient, HttpClientTrait};

#[cfg(test)]
pub use client::mock::MockHttpClient;
