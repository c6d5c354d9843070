//! Common types and utilities for grpc-scaffold
//!
//! This crate contains the shared metadata model and error types used
//! across the parser, generator, and CLI components.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during metadata extraction and scaffolding
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// An `rpc` block had too few tokens to extract its name and types.
    #[error("Malformed rpc signature: {0}")]
    MalformedSignature(String),

    /// An rpc referenced a message type that is not defined in the document.
    #[error("No message definition for type `{type_name}` (referenced by rpc `{method}`)")]
    Resolution { type_name: String, method: String },

    /// More than one message definition shares the same type name.
    #[error("Type `{type_name}` is defined by more than one message in the document")]
    Ambiguity { type_name: String },

    /// The external schema compiler exited with a non-zero status.
    #[error("Schema compiler failed: {0}")]
    Compiler(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for grpc-scaffold operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// The parsed signature of one `rpc` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcSignature {
    /// Method name as declared (e.g., "SayHello")
    pub method_name: String,
    /// Whether the request side carries the `stream` marker
    pub request_streaming: bool,
    /// Request message type name
    pub request_type_name: String,
    /// Whether the response side carries the `stream` marker
    pub response_streaming: bool,
    /// Response message type name
    pub response_type_name: String,
}

/// One `message` declaration: its type name and field names in
/// declaration order. Duplicate field names are kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDefinition {
    pub type_name: String,
    pub fields: Vec<String>,
}

/// One rpc joined to the field lists of its request and response types.
///
/// Built once per parse and read-only afterward; this is the unit the
/// emission stage consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMetadata {
    pub signature: RpcSignature,
    pub request_fields: Vec<String>,
    pub response_fields: Vec<String>,
}

/// Complete extraction result for one schema document
///
/// `service_name` and `package` are injected by the caller (resolved from
/// the compiled descriptor), never reparsed from the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    /// Service name (e.g., "Greeter")
    pub service_name: String,
    /// Proto package the service was declared in (may be empty)
    pub package: String,
    /// One entry per rpc, in document order
    pub rpcs: Vec<RpcMetadata>,
}
