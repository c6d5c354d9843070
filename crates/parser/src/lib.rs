//! Proto schema metadata extraction
//!
//! This crate turns the text of a `.proto` service definition into the
//! structured metadata (`ServiceMetadata`) that drives scaffolding.
//!
//! ## Extraction pipeline
//!
//! Raw text is comment-stripped once, then scanned twice: `rpc` blocks
//! become `RpcSignature`s and `message` blocks become
//! `MessageDefinition`s, in document order. The aggregation step joins
//! each signature to the definitions its request/response types name
//! and fails fast on unresolved or ambiguous types: a parse either
//! yields a complete, consistent metadata set or nothing.
//!
//! Only flat `service`/`rpc`/`message` constructs are understood;
//! imports, nested messages, oneof/map types, options, and enums are
//! out of scope. The service name and package are not reparsed from
//! text: they come from the compiled descriptor (see [`descriptor`]).

mod aggregate;
mod blocks;
pub mod descriptor;
mod fields;
mod signature;
mod strip;

pub use blocks::{BlockIter, ParseWarning};
pub use descriptor::{compile_descriptor, resolve_from_schema, resolve_service, DescriptorInfo};
pub use strip::strip_line_comments;

use std::fs;
use std::path::Path;

use grpc_scaffold_common::{GeneratorError, Result, ServiceMetadata};

/// Schema document parser
///
/// Owns the document text for the duration of one parse. Each parse
/// call is independent and re-entrant; no state is shared across
/// invocations.
pub struct ProtoParser {
    /// Full schema text
    source: String,

    /// Service name resolved by the external compiler collaborator
    service_name: String,

    /// Proto package of the service (may be empty)
    package: String,
}

/// Successful extraction result plus any tolerated-scan warnings
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub service: ServiceMetadata,
    pub warnings: Vec<ParseWarning>,
}

impl ProtoParser {
    /// Load a schema document from disk
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ProtoParser::from_file("hello.proto", "Greeter", "helloworld")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        service_name: &str,
        package: &str,
    ) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read schema file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self::from_source(&source, service_name, package))
    }

    /// Build a parser over in-memory schema text
    pub fn from_source(source: &str, service_name: &str, package: &str) -> Self {
        Self {
            source: source.to_string(),
            service_name: service_name.to_string(),
            package: package.to_string(),
        }
    }

    /// Run the extraction pipeline over the document.
    ///
    /// All-or-nothing: any malformed signature, unresolved type, or
    /// ambiguous type name fails the whole parse. Unterminated blocks
    /// are skipped and reported in `warnings`.
    pub fn parse(&self) -> Result<ParseReport> {
        let text = strip_line_comments(&self.source);
        let mut warnings = Vec::new();

        let mut rpc_blocks = BlockIter::rpc(&text);
        let signatures = rpc_blocks
            .by_ref()
            .map(signature::parse_rpc_signature)
            .collect::<Result<Vec<_>>>()?;
        warnings.extend(rpc_blocks.take_warnings());

        let mut message_blocks = BlockIter::message(&text);
        let messages = message_blocks
            .by_ref()
            .map(fields::parse_message_block)
            .collect::<Result<Vec<_>>>()?;
        warnings.extend(message_blocks.take_warnings());

        let rpcs = aggregate::aggregate(signatures, &messages)?;

        Ok(ParseReport {
            service: ServiceMetadata {
                service_name: self.service_name.clone(),
                package: self.package.clone(),
                rpcs,
            },
            warnings,
        })
    }

    /// The raw document text this parser was built over
    pub fn source(&self) -> &str {
        &self.source
    }
}
