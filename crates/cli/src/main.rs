//! grpc-scaffold CLI
//!
//! Command-line interface for generating gRPC server and client
//! scaffolding from .proto service definitions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use grpc_scaffold_generator::ScaffoldGenerator;
use grpc_scaffold_parser::{DescriptorInfo, ParseReport, ProtoParser};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grpc-scaffold")]
#[command(version, about = "Generate gRPC server and client scaffolding from .proto service definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and display service metadata without writing any files
    #[command(after_help = "EXAMPLES:\n  \
        # Show extracted metadata\n  \
        grpc-scaffold parse hello.proto\n\n  \
        # Dump metadata as JSON, without invoking protoc\n  \
        grpc-scaffold parse hello.proto --service Greeter --json")]
    Parse {
        /// Path to the .proto schema file
        schema: PathBuf,

        /// Service name override (skips the protoc invocation)
        #[arg(long)]
        service: Option<String>,

        /// Schema compiler binary to invoke
        #[arg(long, default_value = "protoc")]
        protoc: String,

        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate server.rs and client.rs from a schema file
    #[command(after_help = "EXAMPLES:\n  \
        # Generate into the current directory\n  \
        grpc-scaffold generate hello.proto\n\n  \
        # Generate into a target directory with a specific protoc\n  \
        grpc-scaffold generate hello.proto \\\n    \
        --output ./scaffold \\\n    \
        --protoc /usr/local/bin/protoc\n\n  \
        # Generate without a protoc installation\n  \
        grpc-scaffold generate hello.proto --service Greeter --skip-compile")]
    Generate {
        /// Path to the .proto schema file
        schema: PathBuf,

        /// Output directory for the generated sources
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Schema compiler binary to invoke
        #[arg(long, default_value = "protoc")]
        protoc: String,

        /// Service name override (replaces the descriptor's name)
        #[arg(long)]
        service: Option<String>,

        /// Skip the protoc invocation entirely (needs --service)
        #[arg(long, requires = "service")]
        skip_compile: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse {
            schema,
            service,
            protoc,
            json,
        } => {
            parse_command(
                schema.as_path(),
                service.as_deref(),
                &protoc,
                json,
                cli.verbose,
            )?;
        }
        Commands::Generate {
            schema,
            output,
            protoc,
            service,
            skip_compile,
        } => {
            generate_command(
                schema.as_path(),
                output.as_path(),
                &protoc,
                service.as_deref(),
                skip_compile,
                cli.verbose,
            )?;
        }
    }

    Ok(())
}

/// Resolve the service identity (compile happens-before extraction).
///
/// With `skip_compile` the caller's `--service` override stands in for
/// the compiled descriptor; otherwise the schema is compiled and an
/// override, if any, only replaces the descriptor's service name.
fn resolve_identity(
    schema: &Path,
    service_override: Option<&str>,
    protoc: &str,
    skip_compile: bool,
) -> Result<DescriptorInfo> {
    if skip_compile {
        let service_name = service_override.context("--skip-compile requires --service")?;
        return Ok(DescriptorInfo {
            service_name: service_name.to_string(),
            package: String::new(),
        });
    }

    println!("{} Compiling schema with {}", "→".cyan(), protoc);
    let mut identity = grpc_scaffold_parser::resolve_from_schema(protoc, schema)
        .context("Schema compilation failed")?;
    if let Some(service_name) = service_override {
        identity.service_name = service_name.to_string();
    }
    Ok(identity)
}

fn extract(schema: &Path, identity: &DescriptorInfo) -> Result<ParseReport> {
    let parser = ProtoParser::from_file(schema, &identity.service_name, &identity.package)
        .context("Failed to load schema file")?;
    let report = parser.parse().context("Metadata extraction failed")?;

    for warning in &report.warnings {
        eprintln!("{} {}", "⚠".yellow(), warning);
    }

    Ok(report)
}

fn parse_command(
    schema: &Path,
    service_override: Option<&str>,
    protoc: &str,
    json: bool,
    verbose: bool,
) -> Result<()> {
    println!("{} Parsing schema file: {}", "→".cyan(), schema.display());

    // For display-only parsing an override alone is enough to skip protoc.
    let identity =
        resolve_identity(schema, service_override, protoc, service_override.is_some())?;
    let report = extract(schema, &identity)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.service)?);
        return Ok(());
    }

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Service Metadata:".bold());
    println!("  Service: {}", report.service.service_name.yellow());
    if !report.service.package.is_empty() {
        println!("  Package: {}", report.service.package.yellow());
    }
    println!("  Rpcs: {}", report.service.rpcs.len());

    for rpc in &report.service.rpcs {
        let req_marker = if rpc.signature.request_streaming {
            "stream "
        } else {
            ""
        };
        let res_marker = if rpc.signature.response_streaming {
            "stream "
        } else {
            ""
        };
        println!(
            "  • {} ({}{}) returns ({}{})",
            rpc.signature.method_name.cyan(),
            req_marker,
            rpc.signature.request_type_name,
            res_marker,
            rpc.signature.response_type_name,
        );
        if verbose {
            println!("    Request fields: {}", rpc.request_fields.join(", "));
            println!("    Response fields: {}", rpc.response_fields.join(", "));
        }
    }

    Ok(())
}

fn generate_command(
    schema: &Path,
    output: &Path,
    protoc: &str,
    service_override: Option<&str>,
    skip_compile: bool,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating scaffolding from: {}",
        "→".cyan(),
        schema.display()
    );

    let identity = resolve_identity(schema, service_override, protoc, skip_compile)?;

    if verbose {
        println!("  Service: {}", identity.service_name);
        println!("  Package: {}", identity.package);
        println!("  Output: {}", output.display());
    }

    let report = extract(schema, &identity)?;
    println!(
        "{} Extracted {} rpc(s) from {}",
        "✓".green(),
        report.service.rpcs.len(),
        report.service.service_name.yellow()
    );

    println!("{} Generating scaffold files...", "→".cyan());
    let generator = ScaffoldGenerator::new(report.service).context("Failed to create generator")?;
    generator
        .generate_to_directory(output)
        .context("Failed to generate scaffolding")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    println!("  📄 {}/server.rs", output.display());
    println!("  📄 {}/client.rs", output.display());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Add the generated files to a tonic project");
    println!("  2. Compile the schema in build.rs with tonic_build");
    println!("  3. Replace the stub handler bodies with real logic");

    Ok(())
}
