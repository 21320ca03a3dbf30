//! Web search provider implementations

mod tavily;

pub use tavily::TavilySearch;
