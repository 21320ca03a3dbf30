//! Web search domain

mod format;
mod provider;

pub use format::{
    format_web_results, medical_search_request, web_search_error_message, MEDICAL_DOMAINS,
    MEDICAL_MAX_RESULTS, WEB_SEARCH_NOT_CONFIGURED_MESSAGE,
};
pub use provider::{SearchDepth, WebSearchProvider, WebSearchRequest, WebSearchResult};

#[cfg(test)]
pub use provider::MockWebSearchProvider;
