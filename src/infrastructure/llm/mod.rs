//! LLM provider implementations

mod bedrock;

pub use bedrock::{BedrockClient, BedrockClientTrait, BedrockProvider};

#[cfg(test)]
pub use bedrock::mock::MockBedrockClient;
