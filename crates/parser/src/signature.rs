//! Rpc signature tokenization
//!
//! Turns one raw `rpc` block into an `RpcSignature`. Parentheses are
//! treated as whitespace so that `rpc Name(Req) returns (Res)` and the
//! spaced form tokenize identically, then tokens are consumed
//! positionally: method name, optional `stream` marker, request type,
//! `returns`, optional `stream` marker, response type.

use grpc_scaffold_common::{GeneratorError, Result, RpcSignature};

/// Parse one raw rpc-block substring into a signature.
///
/// A block with too few tokens to supply a method name and both type
/// names is a fatal `MalformedSignature` error, never a signature with
/// blank fields.
pub fn parse_rpc_signature(block: &str) -> Result<RpcSignature> {
    let normalized: String = block
        .chars()
        .map(|c| if c == '(' || c == ')' { ' ' } else { c })
        .collect();

    // Everything from the body opener (or statement terminator) on is
    // not part of the signature.
    let head = normalized
        .split(['{', ';'])
        .next()
        .unwrap_or(normalized.as_str());

    let malformed = || GeneratorError::MalformedSignature(describe(block));
    let mut tokens = head.split_whitespace();

    // token[0] is the `rpc` keyword that anchored the block
    tokens.next().ok_or_else(malformed)?;

    let method_name = tokens.next().ok_or_else(malformed)?.to_string();

    let mut token = tokens.next().ok_or_else(malformed)?;
    let request_streaming = token == "stream";
    if request_streaming {
        token = tokens.next().ok_or_else(malformed)?;
    }
    let request_type_name = token.to_string();

    let returns = tokens.next().ok_or_else(malformed)?;
    if returns != "returns" {
        return Err(malformed());
    }

    let mut token = tokens.next().ok_or_else(malformed)?;
    let response_streaming = token == "stream";
    if response_streaming {
        token = tokens.next().ok_or_else(malformed)?;
    }
    let response_type_name = token.to_string();

    Ok(RpcSignature {
        method_name,
        request_streaming,
        request_type_name,
        response_streaming,
        response_type_name,
    })
}

/// First line of the offending block, for error messages
fn describe(block: &str) -> String {
    block.lines().next().unwrap_or(block).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_unary_signature() {
        let sig = parse_rpc_signature("rpc SayHello (HelloRequest) returns (HelloReply) {}")
            .unwrap();
        assert_eq!(sig.method_name, "SayHello");
        assert!(!sig.request_streaming);
        assert_eq!(sig.request_type_name, "HelloRequest");
        assert!(!sig.response_streaming);
        assert_eq!(sig.response_type_name, "HelloReply");
    }

    #[test]
    fn test_parses_bidirectional_streaming() {
        let sig = parse_rpc_signature("rpc Chat (stream ChatMsg) returns (stream ChatMsg) {}")
            .unwrap();
        assert!(sig.request_streaming);
        assert!(sig.response_streaming);
        assert_eq!(sig.request_type_name, "ChatMsg");
        assert_eq!(sig.response_type_name, "ChatMsg");
    }

    #[test]
    fn test_parses_server_streaming_only() {
        let sig = parse_rpc_signature("rpc List (ListRequest) returns (stream Item);").unwrap();
        assert!(!sig.request_streaming);
        assert!(sig.response_streaming);
        assert_eq!(sig.response_type_name, "Item");
    }

    #[test]
    fn test_glued_parentheses_tokenize_like_spaced() {
        let sig = parse_rpc_signature("rpc SayHello(HelloRequest) returns(HelloReply) {}")
            .unwrap();
        assert_eq!(sig.method_name, "SayHello");
        assert_eq!(sig.request_type_name, "HelloRequest");
        assert_eq!(sig.response_type_name, "HelloReply");
    }

    #[test]
    fn test_too_few_tokens_is_fatal() {
        let err = parse_rpc_signature("rpc SayHello {}").unwrap_err();
        assert!(matches!(err, GeneratorError::MalformedSignature(_)));
        assert!(err.to_string().contains("rpc SayHello"));
    }

    #[test]
    fn test_missing_returns_keyword_is_fatal() {
        let err = parse_rpc_signature("rpc A (X) gives (Y) {}").unwrap_err();
        assert!(matches!(err, GeneratorError::MalformedSignature(_)));
    }

    #[test]
    fn test_multiline_signature() {
        let sig = parse_rpc_signature("rpc Lookup\n    (Key)\n    returns (Value) {\n}")
            .unwrap();
        assert_eq!(sig.method_name, "Lookup");
        assert_eq!(sig.request_type_name, "Key");
        assert_eq!(sig.response_type_name, "Value");
    }
}
