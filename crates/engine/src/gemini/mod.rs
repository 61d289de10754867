//! Gemini API client for the LLM tool-calling loop.
//!
//! Provides the `generateContent` wire types (conversation contents with
//! text / function-call / function-response parts, function declarations)
//! and a non-streaming client suitable for tool use loops, where the
//! complete response must be processed before continuing.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::{ApiErrorBody, ApiErrorResponse, ModelError};
pub use types::{
    Candidate, Content, FunctionCall, FunctionDeclaration, FunctionResponse, GenerateRequest,
    GenerateResponse, Part, Role, SystemInstruction, ToolConfig,
};
