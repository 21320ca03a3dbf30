//! Diabetes assistant toolkit
//!
//! Corrective RAG tools for a diabetes question-answering agent:
//! - Emergency screening and medication cross-checks
//! - Knowledge base retrieval gated by a context precision score
//! - Medical web search fallback
//! - An incremental scraper that keeps the knowledge base corpus fresh

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::{ContextPrecisionScorer, KnowledgeBaseProvider, ObjectStore, WebSearchProvider};
use infrastructure::{
    crag::{LlmContextPrecisionScorer, RelevanceChecker},
    http::HttpClient,
    knowledge_base::AwsKnowledgeBase,
    llm::{BedrockClient, BedrockProvider},
    services::{
        AssistantService, KnowledgeService, MedicalWebSearchService, SessionService, UploadService,
    },
    storage::S3ObjectStore,
    web_search::TavilySearch,
};
use tracing::{info, warn};

/// AWS SDK configuration pinned to the configured region
pub async fn load_aws_config(config: &AppConfig) -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws.region.clone()))
        .load()
        .await
}

/// Wire every service from configuration.
///
/// Missing knowledge base id, web search key or upload bucket leave that
/// integration unconfigured instead of failing startup.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let sdk_config = load_aws_config(config).await;

    let knowledge_base: Option<Arc<dyn KnowledgeBaseProvider>> =
        if config.knowledge_base.is_configured() {
            info!(
                knowledge_base_id = %config.knowledge_base.knowledge_base_id,
                "Knowledge base configured"
            );
            Some(Arc::new(AwsKnowledgeBase::new(
                config.knowledge_base.knowledge_base_id.clone(),
                &sdk_config,
            )))
        } else {
            warn!("Knowledge base id not set; retrieval disabled");
            None
        };

    let knowledge = KnowledgeService::new(knowledge_base)
        .with_min_score(config.knowledge_base.min_score)
        .with_number_of_results(config.knowledge_base.number_of_results);

    let web_search: Option<Arc<dyn WebSearchProvider>> = if config.web_search.is_configured() {
        let http = HttpClient::with_timeout(Duration::from_secs(config.web_search.timeout_secs))?;
        Some(Arc::new(
            TavilySearch::new(http, config.web_search.api_key.clone())
                .with_base_url(config.web_search.base_url.clone()),
        ))
    } else {
        warn!("Web search API key not set; web fallback disabled");
        None
    };

    let llm = Arc::new(BedrockProvider::new(BedrockClient::new(&sdk_config)));
    let scorer: Arc<dyn ContextPrecisionScorer> = Arc::new(
        LlmContextPrecisionScorer::new(llm, config.evaluation.model_id.clone())
            .with_max_tokens(config.evaluation.max_tokens),
    );

    let upload_store: Option<Arc<dyn ObjectStore>> = if config.storage.bucket.is_empty() {
        None
    } else {
        Some(Arc::new(S3ObjectStore::new(
            &sdk_config,
            config.storage.bucket.clone(),
            config.aws.region.clone(),
        )))
    };

    let assistant = AssistantService::new(
        Arc::new(knowledge),
        Arc::new(RelevanceChecker::new(scorer)),
        Arc::new(MedicalWebSearchService::new(web_search)),
    );

    Ok(AppState::new(
        Arc::new(assistant),
        Arc::new(UploadService::new(upload_store)),
        Arc::new(SessionService::new(config.workspace.base_dir.clone())),
    ))
}
