//! Output policy bound to a session workspace

use crate::domain::workspace::SessionWorkspace;

/// Name of the upload tool the agent is told to use
pub const UPLOAD_TOOL_NAME: &str = "upload_file_to_s3_and_retrieve_s3_url";

/// Output and file handling rules with the workspace path filled in
pub fn session_system_prompt(workspace: &SessionWorkspace) -> String {
    let dir = workspace.root().display();

    format!(
        r#"## Basic Output Policy
- When structuring text, please output in markdown format. However, there's no need to forcibly create chapters in markdown for simple plain text responses.
- Output links as [link_title](link_url) and images as ![image_title](image_url).
- When using tools, explain in text how you will use them while calling them.

## About File Output
- When writing files, always write under `{dir}`.
- Similarly, when a workspace is needed, use the `{dir}` directory. Do not ask users about their current workspace. It is always `{dir}`.
- Also, users cannot directly access files written under `{dir}`. Therefore, when providing these files to users, *always use the `{UPLOAD_TOOL_NAME}` tool to upload to S3 and retrieve the S3 URL*. Include the retrieved S3 URL in the final output in the format ![image_title](S3 URL).
"#
    )
}
