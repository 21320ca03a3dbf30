//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AwsConfig, EvaluationConfig, KnowledgeBaseConfig, LogFormat, LoggingConfig,
    MetricsConfig, ScraperConfig, ServerConfig, StorageConfig, WebSearchConfig, WorkspaceConfig,
};
