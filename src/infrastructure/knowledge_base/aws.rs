//! AWS Bedrock Knowledge Base provider implementation

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseVectorSearchConfiguration, SearchType as AwsSearchType,
};
use aws_sdk_bedrockagentruntime::Client as BedrockAgentClient;
use aws_smithy_types::Document as SmithyDocument;
use tracing::debug;

use crate::domain::knowledge_base::{
    KnowledgeBaseProvider, RetrievalParams, SearchResult, SearchType,
};
use crate::domain::DomainError;

/// AWS Bedrock Knowledge Base provider
pub struct AwsKnowledgeBase {
    knowledge_base_id: String,
    client: BedrockAgentClient,
}

impl Debug for AwsKnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsKnowledgeBase")
            .field("knowledge_base_id", &self.knowledge_base_id)
            .finish()
    }
}

impl AwsKnowledgeBase {
    /// Create with an existing AWS SDK config
    pub fn new(knowledge_base_id: impl Into<String>, aws_config: &aws_config::SdkConfig) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.into(),
            client: BedrockAgentClient::new(aws_config),
        }
    }
}

fn to_aws_search_type(search_type: SearchType) -> AwsSearchType {
    match search_type {
        SearchType::Hybrid => AwsSearchType::Hybrid,
        SearchType::Semantic => AwsSearchType::Semantic,
    }
}

/// Map one retrieval result; results without text content are dropped
fn convert_result(rank: usize, r: &KnowledgeBaseRetrievalResult) -> Option<SearchResult> {
    let text: Option<&str> = r.content()?.text().into();
    let content = text?.to_string();
    let score = r.score().unwrap_or(0.0) as f32;

    let uri = r
        .location()
        .and_then(|l| l.s3_location())
        .and_then(|s3| s3.uri());

    let id = uri
        .map(String::from)
        .unwrap_or_else(|| format!("result-{}", rank));

    let mut result = SearchResult::new(id, content, score);

    if let Some(metadata) = r.metadata() {
        let meta_map: HashMap<String, serde_json::Value> = metadata
            .iter()
            .filter_map(|(key, doc)| doc_to_json(doc).map(|v| (key.clone(), v)))
            .collect();

        result = result.with_all_metadata(meta_map);
    }

    if let Some(uri) = uri {
        result = result.with_source(uri);
    }

    Some(result)
}

#[async_trait]
impl KnowledgeBaseProvider for AwsKnowledgeBase {
    fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }

    fn provider_type(&self) -> &'static str {
        "aws_knowledge_base"
    }

    async fn retrieve(&self, params: RetrievalParams) -> Result<Vec<SearchResult>, DomainError> {
        let vector_config = KnowledgeBaseVectorSearchConfiguration::builder()
            .number_of_results(params.number_of_results as i32)
            .override_search_type(to_aws_search_type(params.search_type))
            .build();

        let retrieval_config = KnowledgeBaseRetrievalConfiguration::builder()
            .vector_search_configuration(vector_config)
            .build();

        let query = KnowledgeBaseQuery::builder().text(params.query).build();

        let response = self
            .client
            .retrieve()
            .knowledge_base_id(&self.knowledge_base_id)
            .retrieval_query(query)
            .retrieval_configuration(retrieval_config)
            .send()
            .await
            .map_err(|e| {
                DomainError::knowledge_base(format!("AWS Knowledge Base retrieve failed: {}", e))
            })?;

        let results: Vec<SearchResult> = response
            .retrieval_results()
            .iter()
            .enumerate()
            .filter_map(|(idx, r)| convert_result(idx + 1, r))
            .collect();

        debug!(
            knowledge_base_id = %self.knowledge_base_id,
            results = results.len(),
            "Knowledge base retrieval complete"
        );

        Ok(results)
    }
}

/// Convert AWS Smithy Document to serde_json::Value
fn doc_to_json(doc: &SmithyDocument) -> Option<serde_json::Value> {
    match doc {
        SmithyDocument::String(s) => Some(serde_json::Value::String(s.clone())),
        SmithyDocument::Number(n) => Some(serde_json::json!(n.to_f64_lossy())),
        SmithyDocument::Bool(b) => Some(serde_json::Value::Bool(*b)),
        SmithyDocument::Null => Some(serde_json::Value::Null),
        SmithyDocument::Array(arr) => Some(serde_json::Value::Array(
            arr.iter().filter_map(doc_to_json).collect(),
        )),
        SmithyDocument::Object(obj) => Some(serde_json::Value::Object(
            obj.iter()
                .filter_map(|(k, v)| doc_to_json(v).map(|val| (k.clone(), val)))
                .collect(),
        )),
    }
}
