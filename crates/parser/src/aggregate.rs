//! Signature/message joining
//!
//! Joins each rpc signature to the message definitions named by its
//! request and response types. Aggregation is all-or-nothing: any
//! resolution or ambiguity failure returns zero metadata, since code
//! generated from incomplete metadata is worse than none.

use std::collections::HashMap;

use grpc_scaffold_common::{
    GeneratorError, MessageDefinition, Result, RpcMetadata, RpcSignature,
};

/// Join signatures to their message definitions, preserving rpc
/// declaration order.
///
/// Fails with `Ambiguity` if any type name is defined by more than one
/// message in the document, and with `Resolution` if a signature names
/// a type with no definition. Several rpcs sharing one message type is
/// legal and resolves each of them to that definition.
pub fn aggregate(
    signatures: Vec<RpcSignature>,
    messages: &[MessageDefinition],
) -> Result<Vec<RpcMetadata>> {
    let mut by_name: HashMap<&str, &MessageDefinition> = HashMap::new();
    for message in messages {
        if by_name.insert(message.type_name.as_str(), message).is_some() {
            return Err(GeneratorError::Ambiguity {
                type_name: message.type_name.clone(),
            });
        }
    }

    let resolve = |type_name: &str, method: &str| -> Result<Vec<String>> {
        by_name
            .get(type_name)
            .map(|def| def.fields.clone())
            .ok_or_else(|| GeneratorError::Resolution {
                type_name: type_name.to_string(),
                method: method.to_string(),
            })
    };

    signatures
        .into_iter()
        .map(|signature| {
            let request_fields =
                resolve(&signature.request_type_name, &signature.method_name)?;
            let response_fields =
                resolve(&signature.response_type_name, &signature.method_name)?;
            Ok(RpcMetadata {
                signature,
                request_fields,
                response_fields,
            })
        })
        .collect()
}
