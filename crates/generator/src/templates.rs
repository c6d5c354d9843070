//! Template loading and management

use std::collections::HashMap;

use grpc_scaffold_common::{GeneratorError, Result};
use tera::{Tera, Value};

/// Load the embedded scaffolding templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("snake_case", snake_case_filter);

    tera.add_raw_template("server.rs", include_str!("../templates/server.rs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load server.rs template: {}", e))
        })?;

    tera.add_raw_template("client.rs", include_str!("../templates/client.rs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load client.rs template: {}", e))
        })?;

    Ok(tera)
}

/// Filter converting a CamelCase rpc name to the snake_case fn name
/// tonic generates for it
fn snake_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("snake_case filter expects a string"))?;

    Ok(Value::String(to_snake_case(s)))
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let should_add_underscore = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (i + 1 < chars.len() && chars[i + 1].is_lowercase()));
            if should_add_underscore && !result.ends_with('_') {
                result.push('_');
            }
            result.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}
