//! Types for the Gemini `generateContent` API.
//!
//! These types match the Gemini REST format for function calling.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (also used for synthetic function-response turns).
    User,
    /// The model.
    Model,
}

/// One turn in the conversation: a role plus an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Turn author.
    pub role: Role,
    /// Ordered message parts.
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn containing a single text part.
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::text(text)],
        }
    }
}

/// A part within a turn - text, a function-call request from the model, or
/// a function result fed back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// A tool invocation requested by the model.
    FunctionCall {
        /// The requested call.
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
    /// A tool result returned to the model.
    FunctionResponse {
        /// The result payload.
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
}

impl Part {
    /// A text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// A function-response part wrapping a tool's result string.
    #[must_use]
    pub fn function_response(name: impl Into<String>, result: impl Into<String>) -> Self {
        Self::FunctionResponse {
            function_response: FunctionResponse {
                name: name.into(),
                response: serde_json::json!({ "result": result.into() }),
            },
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to call.
    pub name: String,
    /// Argument map (may be absent in the wire format).
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// A tool result fed back to the model, keyed by function name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Name of the function this responds to.
    pub name: String,
    /// Result payload.
    pub response: Value,
}

/// A function the model may call.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    /// Function name.
    pub name: String,
    /// Description of what the function does.
    pub description: String,
    /// JSON Schema for the function's parameters.
    pub parameters: Value,
}

/// A set of function declarations exposed to the model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// The declared functions.
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// System instruction wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    /// Instruction parts (a single text part in practice).
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    /// Wrap instruction text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}

/// Request body for `generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Conversation history.
    pub contents: Vec<Content>,
    /// System instruction.
    pub system_instruction: SystemInstruction,
    /// Available tools.
    pub tools: Vec<ToolConfig>,
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Response candidates (the first is used).
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The model's turn.
    pub content: Content,
    /// Why generation stopped (e.g., "STOP").
    #[serde(default)]
    pub finish_reason: Option<String>,
}
