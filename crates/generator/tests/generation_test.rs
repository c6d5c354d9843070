//! Integration tests for scaffolding emission

use grpc_scaffold_common::{RpcMetadata, RpcSignature, ServiceMetadata};
use grpc_scaffold_generator::ScaffoldGenerator;

fn rpc(
    method: &str,
    req: &str,
    req_fields: &[&str],
    res: &str,
    res_fields: &[&str],
    streaming: bool,
) -> RpcMetadata {
    RpcMetadata {
        signature: RpcSignature {
            method_name: method.to_string(),
            request_streaming: streaming,
            request_type_name: req.to_string(),
            response_streaming: streaming,
            response_type_name: res.to_string(),
        },
        request_fields: req_fields.iter().map(|f| f.to_string()).collect(),
        response_fields: res_fields.iter().map(|f| f.to_string()).collect(),
    }
}

fn greeter() -> ServiceMetadata {
    ServiceMetadata {
        service_name: "Greeter".to_string(),
        package: "helloworld".to_string(),
        rpcs: vec![rpc(
            "SayHello",
            "HelloRequest",
            &["name"],
            "HelloReply",
            &["message"],
            false,
        )],
    }
}

#[test]
fn test_generates_server_and_client_files() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScaffoldGenerator::new(greeter()).unwrap();
    generator.generate_to_directory(dir.path()).unwrap();

    let server = std::fs::read_to_string(dir.path().join("server.rs")).unwrap();
    assert!(server.contains("async fn say_hello"));
    assert!(server.contains("pb::HelloReply"));
    assert!(server.contains("message: Default::default()"));
    assert!(server.contains("tonic::include_proto!(\"helloworld\")"));
    assert!(server.contains("GreeterServer"));

    let client = std::fs::read_to_string(dir.path().join("client.rs")).unwrap();
    assert!(client.contains("GreeterClient"));
    assert!(client.contains("pb::HelloRequest"));
    assert!(client.contains("name: Default::default()"));
}

#[test]
fn test_streaming_rpc_gets_stream_types() {
    let service = ServiceMetadata {
        service_name: "Chatter".to_string(),
        package: "chat".to_string(),
        rpcs: vec![rpc("Chat", "ChatMsg", &["text"], "ChatMsg", &["text"], true)],
    };

    let dir = tempfile::tempdir().unwrap();
    let generator = ScaffoldGenerator::new(service).unwrap();
    generator.generate_to_directory(dir.path()).unwrap();

    let server = std::fs::read_to_string(dir.path().join("server.rs")).unwrap();
    assert!(server.contains("type ChatStream"));
    assert!(server.contains("tonic::Streaming<pb::ChatMsg>"));
    assert!(server.contains("ReceiverStream"));

    // Streaming rpcs are not invoked by the generated client stub
    let client = std::fs::read_to_string(dir.path().join("client.rs")).unwrap();
    assert!(!client.contains("client.chat("));
}

#[test]
fn test_empty_package_falls_back_to_service_name() {
    let mut service = greeter();
    service.package = String::new();

    let dir = tempfile::tempdir().unwrap();
    ScaffoldGenerator::new(service)
        .unwrap()
        .generate_to_directory(dir.path())
        .unwrap();

    let server = std::fs::read_to_string(dir.path().join("server.rs")).unwrap();
    assert!(server.contains("tonic::include_proto!(\"greeter\")"));
}

#[test]
fn test_failed_client_write_leaves_no_server_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on the client.rs path makes its write fail
    // after server.rs has already been written.
    std::fs::create_dir(dir.path().join("client.rs")).unwrap();

    let generator = ScaffoldGenerator::new(greeter()).unwrap();
    let result = generator.generate_to_directory(dir.path());

    assert!(result.is_err());
    assert!(!dir.path().join("server.rs").exists());
}

#[test]
fn test_service_with_no_rpcs_still_renders() {
    let service = ServiceMetadata {
        service_name: "Idle".to_string(),
        package: "idle".to_string(),
        rpcs: vec![],
    };

    let dir = tempfile::tempdir().unwrap();
    ScaffoldGenerator::new(service)
        .unwrap()
        .generate_to_directory(dir.path())
        .unwrap();

    assert!(dir.path().join("server.rs").exists());
    assert!(dir.path().join("client.rs").exists());
}
