//! Knowledge base provider implementations

mod aws;

pub use aws::AwsKnowledgeBase;
