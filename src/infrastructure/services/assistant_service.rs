//! Assistant service - the gated corrective RAG workflow in one call

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::prompt::diabetes_system_prompt;
use crate::domain::{
    check_medication_safety, detect_emergency, EmergencyScanResult, MedicationSafetyResult,
    RelevanceVerdict,
};
use crate::infrastructure::crag::RelevanceChecker;
use crate::infrastructure::observability::{record_emergency_scan, record_medication_warnings};

use super::{KnowledgeService, MedicalWebSearchService};

/// Tool steps in the order the workflow may run them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    DetectEmergency,
    QueryDiabetesKnowledge,
    CheckChunksRelevance,
    MedicalWebSearch,
    CheckMedicationSafety,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantRequest {
    pub query: String,
    #[serde(default)]
    pub medications: Vec<String>,
}

/// Everything the agent needs to write the final answer
#[derive(Debug, Clone, Serialize)]
pub struct AssistantContext {
    pub emergency: EmergencyScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<RelevanceVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_safety: Option<MedicationSafetyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub steps: Vec<WorkflowStep>,
}

impl AssistantContext {
    fn emergency(scan: EmergencyScanResult) -> Self {
        Self {
            emergency: scan,
            retrieval: None,
            relevance: None,
            web_results: None,
            medication_safety: None,
            system_prompt: None,
            steps: vec![WorkflowStep::DetectEmergency],
        }
    }
}

/// Runs each tool individually or the whole gated workflow
#[derive(Debug, Clone)]
pub struct AssistantService {
    knowledge: Arc<KnowledgeService>,
    relevance: Arc<RelevanceChecker>,
    web_search: Arc<MedicalWebSearchService>,
}

impl AssistantService {
    pub fn new(
        knowledge: Arc<KnowledgeService>,
        relevance: Arc<RelevanceChecker>,
        web_search: Arc<MedicalWebSearchService>,
    ) -> Self {
        Self {
            knowledge,
            relevance,
            web_search,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeService {
        &self.knowledge
    }

    pub fn relevance(&self) -> &RelevanceChecker {
        &self.relevance
    }

    pub fn web_search(&self) -> &MedicalWebSearchService {
        &self.web_search
    }

    pub fn detect_emergency(&self, query: &str) -> EmergencyScanResult {
        let scan = detect_emergency(query);
        record_emergency_scan(&scan.emergency_types);

        if scan.is_emergency {
            let types: Vec<&str> = scan.emergency_types.iter().map(|t| t.as_str()).collect();
            warn!(emergency_types = ?types, "Emergency detected");
        }

        scan
    }

    pub fn check_medications(&self, medications: &[String], query: &str) -> MedicationSafetyResult {
        let result = check_medication_safety(medications, query);
        record_medication_warnings(result.safety_warnings.len());
        result
    }

    /// Run screening, retrieval, relevance, fallback and medication checks in order.
    ///
    /// An emergency stops the workflow right after screening.
    pub async fn prepare(&self, request: &AssistantRequest) -> AssistantContext {
        let scan = self.detect_emergency(&request.query);
        if scan.is_emergency {
            return AssistantContext::emergency(scan);
        }

        let mut steps = vec![WorkflowStep::DetectEmergency];

        let knowledge = self.knowledge.query(&request.query).await;
        steps.push(WorkflowStep::QueryDiabetesKnowledge);

        let relevance = self.relevance.check(&knowledge, &request.query).await;
        steps.push(WorkflowStep::CheckChunksRelevance);

        let web_results = if relevance.is_relevant() {
            None
        } else {
            info!(
                value = relevance.chunk_relevance_value,
                "Retrieved passages not relevant, falling back to web search"
            );
            steps.push(WorkflowStep::MedicalWebSearch);
            Some(self.web_search.search(&request.query).await)
        };

        let medication_safety = if request.medications.is_empty() {
            None
        } else {
            steps.push(WorkflowStep::CheckMedicationSafety);
            Some(self.check_medications(&request.medications, &request.query))
        };

        AssistantContext {
            emergency: scan,
            retrieval: Some(knowledge),
            relevance: Some(relevance),
            web_results,
            medication_safety,
            system_prompt: Some(diabetes_system_prompt().to_string()),
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::crag::MockContextPrecisionScorer;
    use crate::domain::knowledge_base::{MockKnowledgeBaseProvider, SearchResult};
    use crate::domain::web_search::{MockWebSearchProvider, WebSearchResult};
    use crate::domain::EmergencyType;

    struct Fixture {
        kb: Arc<MockKnowledgeBaseProvider>,
        scorer: Arc<MockContextPrecisionScorer>,
    }

    fn kb_with_passage() -> MockKnowledgeBaseProvider {
        MockKnowledgeBaseProvider::new().with_results(vec![SearchResult::new(
            "1",
            "Metformin is the usual first medicine for type 2 diabetes.",
            0.88,
        )
        .with_source("s3://kb/metformin.json")])
    }

    fn web_expecting(times: usize) -> MockWebSearchProvider {
        let mut web = MockWebSearchProvider::new();
        web.expect_search().times(times).returning(|_| {
            Ok(vec![WebSearchResult::new("https://diabetes.org/a", "From the web.")])
        });
        web.expect_provider_name().return_const("mock");
        web
    }

    fn service(
        kb: MockKnowledgeBaseProvider,
        scorer: MockContextPrecisionScorer,
        web: MockWebSearchProvider,
    ) -> (AssistantService, Fixture) {
        let kb = Arc::new(kb);
        let scorer = Arc::new(scorer);

        let service = AssistantService::new(
            Arc::new(KnowledgeService::new(Some(kb.clone()))),
            Arc::new(RelevanceChecker::new(scorer.clone())),
            Arc::new(MedicalWebSearchService::new(Some(Arc::new(web)))),
        );

        (service, Fixture { kb, scorer })
    }

    fn request(query: &str, medications: &[&str]) -> AssistantRequest {
        AssistantRequest {
            query: query.to_string(),
            medications: medications.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_emergency_short_circuits() {
        let (service, fixture) = service(
            kb_with_passage(),
            MockContextPrecisionScorer::new(),
            web_expecting(0),
        );

        let context = service
            .prepare(&request("My blood sugar over 500 and I feel dizzy", &["metformin"]))
            .await;

        assert!(context.emergency.is_emergency);
        assert!(context.emergency.contains(EmergencyType::SevereHyperglycemia));
        assert_eq!(context.steps, vec![WorkflowStep::DetectEmergency]);
        assert!(context.retrieval.is_none());
        assert!(context.system_prompt.is_none());
        assert_eq!(fixture.kb.retrieve_count(), 0);
        assert!(fixture.scorer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_relevant_passages_skip_web_search() {
        let (service, _) = service(
            kb_with_passage(),
            MockContextPrecisionScorer::new().with_value(0.9),
            web_expecting(0),
        );

        let context = service
            .prepare(&request("What medicine is used first for type 2?", &[]))
            .await;

        assert_eq!(
            context.steps,
            vec![
                WorkflowStep::DetectEmergency,
                WorkflowStep::QueryDiabetesKnowledge,
                WorkflowStep::CheckChunksRelevance,
            ]
        );
        assert!(context.relevance.unwrap().is_relevant());
        assert!(context.web_results.is_none());
        assert!(context.medication_safety.is_none());
        assert!(context.system_prompt.unwrap().contains("detect_emergency"));
    }

    #[tokio::test]
    async fn test_irrelevant_passages_fall_back_to_web() {
        let (service, _) = service(
            kb_with_passage(),
            MockContextPrecisionScorer::new().with_value(0.5),
            web_expecting(1),
        );

        let context = service
            .prepare(&request("Is metformin safe with kidney disease?", &["Metformin 500mg"]))
            .await;

        assert_eq!(
            context.steps,
            vec![
                WorkflowStep::DetectEmergency,
                WorkflowStep::QueryDiabetesKnowledge,
                WorkflowStep::CheckChunksRelevance,
                WorkflowStep::MedicalWebSearch,
                WorkflowStep::CheckMedicationSafety,
            ]
        );
        assert!(context.web_results.unwrap().contains("From the web."));

        let safety = context.medication_safety.unwrap();
        assert!(safety.has_concerns);
        assert!(safety.safety_warnings[0].contains("Metformin 500mg may not be safe with kidney disease"));
    }

    #[tokio::test]
    async fn test_scoring_outage_fails_open() {
        let (service, _) = service(
            kb_with_passage(),
            MockContextPrecisionScorer::new().with_error("throttled"),
            web_expecting(0),
        );

        let context = service.prepare(&request("What is A1C?", &[])).await;

        let relevance = context.relevance.unwrap();
        assert!(relevance.is_fail_open());
        assert!(context.web_results.is_none());
    }

    #[test]
    fn test_step_serialization() {
        assert_eq!(
            serde_json::to_string(&WorkflowStep::QueryDiabetesKnowledge).unwrap(),
            "\"query_diabetes_knowledge\""
        );
    }
}
