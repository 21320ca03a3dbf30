//! Agent prompts

mod diabetes;
mod session;

pub use diabetes::diabetes_system_prompt;
pub use session::{session_system_prompt, UPLOAD_TOOL_NAME};
