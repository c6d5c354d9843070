//! External schema compiler invocation
//!
//! Runs `protoc` over the schema document and decodes the resulting
//! `FileDescriptorSet` to resolve the service name and proto package.
//! The compiler must succeed before any text extraction proceeds; a
//! schema protoc rejects is reported as a compiler failure, not parsed
//! around.

use std::path::Path;
use std::process::Command;

use grpc_scaffold_common::{GeneratorError, Result};
use prost::Message;
use prost_types::FileDescriptorSet;

/// Identity resolved from the compiled descriptor rather than reparsed
/// from document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorInfo {
    /// First service declared in the descriptor set
    pub service_name: String,
    /// Package of the file declaring that service (may be empty)
    pub package: String,
}

/// Compile a schema file with `protoc` and decode the descriptor set.
///
/// Blocking subprocess call; a non-zero exit status becomes
/// `GeneratorError::Compiler` carrying protoc's stderr.
pub fn compile_descriptor(protoc: &str, schema: &Path) -> Result<FileDescriptorSet> {
    let dir = tempfile::tempdir()?;
    let descriptor_path = dir.path().join("descriptor.bin");

    let include = match schema.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let output = Command::new(protoc)
        .arg("-I")
        .arg(include)
        .arg("--descriptor_set_out")
        .arg(&descriptor_path)
        .arg(schema)
        .output()
        .map_err(|e| GeneratorError::Compiler(format!("failed to run `{protoc}`: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GeneratorError::Compiler(format!(
            "`{protoc}` exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let bytes = std::fs::read(&descriptor_path)?;
    FileDescriptorSet::decode(bytes.as_slice()).map_err(|e| {
        GeneratorError::Parse(format!("Failed to decode FileDescriptorSet: {e}"))
    })
}

/// Pull the service identity out of a compiled descriptor set.
///
/// Takes the first service declared across the set's files; a document
/// with no service cannot drive scaffolding.
pub fn resolve_service(set: &FileDescriptorSet) -> Result<DescriptorInfo> {
    for file in &set.file {
        if let Some(service) = file.service.first() {
            return Ok(DescriptorInfo {
                service_name: service.name().to_string(),
                package: file.package().to_string(),
            });
        }
    }
    Err(GeneratorError::Parse(
        "compiled descriptor declares no service".to_string(),
    ))
}

/// Compile and resolve in one step (compile happens-before extraction)
pub fn resolve_from_schema(protoc: &str, schema: &Path) -> Result<DescriptorInfo> {
    let set = compile_descriptor(protoc, schema)?;
    resolve_service(&set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{FileDescriptorProto, ServiceDescriptorProto};

    fn descriptor_with(package: &str, services: &[&str]) -> FileDescriptorSet {
        FileDescriptorSet {
            file: vec![FileDescriptorProto {
                name: Some("hello.proto".to_string()),
                package: Some(package.to_string()),
                service: services
                    .iter()
                    .map(|s| ServiceDescriptorProto {
                        name: Some(s.to_string()),
                        ..Default::default()
                    })
                    .collect(),
                syntax: Some("proto3".to_string()),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_resolves_first_service_and_package() {
        let set = descriptor_with("helloworld", &["Greeter", "Other"]);
        let info = resolve_service(&set).unwrap();
        assert_eq!(info.service_name, "Greeter");
        assert_eq!(info.package, "helloworld");
    }

    #[test]
    fn test_descriptor_without_service_is_an_error() {
        let set = descriptor_with("empty", &[]);
        assert!(resolve_service(&set).is_err());
    }

    #[test]
    fn test_missing_compiler_reports_compiler_error() {
        let err = compile_descriptor(
            "protoc-binary-that-does-not-exist",
            Path::new("hello.proto"),
        )
        .unwrap_err();
        assert!(matches!(err, GeneratorError::Compiler(_)));
    }
}
