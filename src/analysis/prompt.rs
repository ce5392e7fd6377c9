//! Request construction for the chat completions endpoint.

use serde::Serialize;

use crate::constants::{MAX_TOKENS, TEMPERATURE};
use crate::models::IngestedFile;

/// Fixed instruction sent as the system message of every request.
pub const SYSTEM_PROMPT: &str = "\
You are an expert code reviewer. Analyze the provided code and report problems in \
exactly these five categories:

1. Syntax - syntax errors, typos, invalid constructs
2. Logic - bugs, incorrect conditions, unhandled edge cases
3. Quality - readability, naming, duplication, maintainability
4. Security - injection, unsafe input handling, secrets, insecure defaults
5. Performance - inefficient algorithms, needless allocations or I/O

Respond with ONLY a JSON object of this exact shape, with no prose before or after it:

{
  \"summary\": {
    \"totalIssues\": <integer>,
    \"syntaxErrors\": <integer>,
    \"logicIssues\": <integer>,
    \"qualityIssues\": <integer>,
    \"securityIssues\": <integer>,
    \"performanceIssues\": <integer>,
    \"overallScore\": <integer from 0 to 100>
  },
  \"issues\": [
    {
      \"id\": <integer, starting at 1>,
      \"lineNumber\": <integer line number, or a string such as \"12-18\">,
      \"severity\": \"low\" | \"medium\" | \"high\" | \"critical\",
      \"category\": \"Syntax\" | \"Logic\" | \"Quality\" | \"Security\" | \"Performance\",
      \"description\": <string>,
      \"suggestion\": <string>,
      \"codeExample\": <optional string with corrected code>
    }
  ]
}

The summary counts must match the issues array. If the code has no problems, return \
an empty issues array and a high overallScore.";

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Body of a chat completions request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// User message: the language label followed by the file text, verbatim.
pub fn user_message(file: &IngestedFile) -> String {
    format!(
        "Analyze the following {} code from `{}`:\n\n{}",
        file.language, file.name, file.content
    )
}

/// Build the request for one file.
pub fn build_request(model: &str, file: &IngestedFile) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_message(file),
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}
