//! Scaffolding emission for grpc-scaffold
//!
//! Renders extracted service metadata into ready-to-run tonic server
//! and client source files via tera templates.

mod templates;

use std::fs;
use std::path::Path;

use grpc_scaffold_common::{GeneratorError, Result, ServiceMetadata};
use tera::Tera;

/// Scaffolding generator
///
/// Renders every template before writing anything, so a template
/// failure leaves no partial output behind.
pub struct ScaffoldGenerator {
    service: ServiceMetadata,
    tera: Tera,
}

impl ScaffoldGenerator {
    /// Create a generator from extracted service metadata
    pub fn new(service: ServiceMetadata) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { service, tera })
    }

    /// Generate `server.rs` and `client.rs` into a directory.
    ///
    /// Nothing is written unless both render successfully.
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<()> {
        let context = self.create_context();

        let server = self
            .tera
            .render("server.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;
        let client = self
            .tera
            .render("client.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        fs::create_dir_all(output_dir).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create output directory: {}", e))
        })?;

        let server_path = output_dir.join("server.rs");
        fs::write(&server_path, server)
            .map_err(|e| GeneratorError::Generation(format!("Failed to write server.rs: {}", e)))?;

        let client_path = output_dir.join("client.rs");
        fs::write(&client_path, client).map_err(|e| {
            // Failure must leave no partial output behind.
            let _ = fs::remove_file(&server_path);
            GeneratorError::Generation(format!("Failed to write client.rs: {}", e))
        })?;

        Ok(())
    }

    /// Create the template context from service metadata
    fn create_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("service", &self.service);
        context.insert("service_name", &self.service.service_name);
        context.insert("rpcs", &self.service.rpcs);

        // tonic's include_proto! needs the proto package; fall back to
        // the lowercased service name when the schema declares none.
        let package = if self.service.package.is_empty() {
            self.service.service_name.to_lowercase()
        } else {
            self.service.package.clone()
        };
        context.insert("package", &package);

        let has_streaming = self
            .service
            .rpcs
            .iter()
            .any(|r| r.signature.request_streaming || r.signature.response_streaming);
        context.insert("has_streaming", &has_streaming);

        context
    }
}

/// Generate scaffolding (convenience function)
pub fn generate_scaffolding(service: ServiceMetadata, output_path: &str) -> Result<()> {
    let generator = ScaffoldGenerator::new(service)?;
    generator.generate_to_directory(Path::new(output_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_creation() {
        let service = ServiceMetadata {
            service_name: "Greeter".to_string(),
            package: "helloworld".to_string(),
            rpcs: vec![],
        };
        assert!(ScaffoldGenerator::new(service).is_ok());
    }
}
