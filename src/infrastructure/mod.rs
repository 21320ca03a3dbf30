//! Infrastructure layer - adapters for AWS, HTTP and the assistant services

pub mod crag;
pub mod http;
pub mod knowledge_base;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod scraper;
pub mod services;
pub mod storage;
pub mod web_search;
