use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub aws: AwsConfig,
    pub knowledge_base: KnowledgeBaseConfig,
    pub web_search: WebSearchConfig,
    pub evaluation: EvaluationConfig,
    pub storage: StorageConfig,
    pub scraper: ScraperConfig,
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    /// Bedrock knowledge base id; empty disables retrieval
    pub knowledge_base_id: String,
    pub min_score: f32,
    pub number_of_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    /// Tavily API key; empty disables web search
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Bedrock model judging passage usefulness
    pub model_id: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Bucket receiving files uploaded from session workspaces
    pub bucket: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Knowledge base source bucket
    pub bucket: String,
    pub tracker_key: String,
    pub object_prefix: String,
    pub max_results_per_query: u32,
    /// Empty means the built-in topic list
    pub queries: Vec<String>,
    pub pacing_ms: u64,
    pub head_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub base_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
        }
    }
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            knowledge_base_id: String::new(),
            min_score: 0.5,
            number_of_results: 5,
        }
    }
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.tavily.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            model_id: "us.anthropic.claude-3-7-sonnet-20250219-v1:0".to_string(),
            max_tokens: 512,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            tracker_key: "diabetes-scraper/tracker.json".to_string(),
            object_prefix: "diabetes-webmd".to_string(),
            max_results_per_query: 10,
            queries: Vec::new(),
            pacing_ms: 1000,
            head_timeout_secs: 10,
            fetch_timeout_secs: 30,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            base_dir: "/tmp/ws".to_string(),
        }
    }
}

impl KnowledgeBaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.knowledge_base_id.trim().is_empty()
    }
}

impl WebSearchConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_legacy_env(|name| std::env::var(name).ok());

        Ok(app_config)
    }

    /// Apply the deployment's well-known variables on top of the layered config
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(id) = non_empty("DIABETES_KB_ID") {
            self.knowledge_base.knowledge_base_id = id;
        }

        if let Some(score) = non_empty("DIABETES_KB_MIN_SCORE").and_then(|v| v.trim().parse().ok()) {
            self.knowledge_base.min_score = score;
        }

        if let Some(region) = non_empty("AWS_REGION") {
            self.aws.region = region;
        }

        if let Some(key) = non_empty("TAVILY_API_KEY") {
            self.web_search.api_key = key;
        }

        if let Some(model_id) = non_empty("BEDROCK_EVAL_MODEL_ID") {
            self.evaluation.model_id = model_id;
        }

        if let Some(bucket) = non_empty("S3_BUCKET_NAME") {
            self.scraper.bucket = bucket;
        }
    }
}
