//! Message field list extraction
//!
//! Splits one `message` block into header and body at the first `{`.
//! The type name is the last whitespace-delimited header token; field
//! names are the tokens immediately preceding each literal `=` token in
//! the body. This matches field syntax of the form
//! `<type> <name> = <number>;` without parsing the full field grammar.

use grpc_scaffold_common::{GeneratorError, MessageDefinition, Result};

/// Parse one raw message-block substring into a definition.
///
/// A body with no `=` tokens yields an empty field list, not an error.
pub fn parse_message_block(block: &str) -> Result<MessageDefinition> {
    let (header, body) = block.split_once('{').ok_or_else(|| {
        GeneratorError::Parse(format!(
            "message declaration without a body: `{}`",
            first_line(block)
        ))
    })?;

    let type_name = header
        .split_whitespace()
        .last()
        .filter(|name| *name != "message")
        .ok_or_else(|| {
            GeneratorError::Parse(format!(
                "message declaration without a name: `{}`",
                first_line(block)
            ))
        })?
        .to_string();

    // The block ends at the closing brace; drop it before tokenizing.
    let body = body.trim_end().strip_suffix('}').unwrap_or(body);

    let tokens: Vec<&str> = body.split_whitespace().collect();
    let mut fields = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if *token == "=" && i > 0 {
            fields.push(tokens[i - 1].to_string());
        }
    }

    Ok(MessageDefinition { type_name, fields })
}

fn first_line(block: &str) -> String {
    block.lines().next().unwrap_or(block).trim_end().to_string()
}
