use crate::domain::fields::FieldSet;
use crate::error::{GatewayError, Result};

/// Parses a `name=value` command-line field argument.
pub fn parse_field(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(GatewayError::InvalidFieldArgument(arg.to_string())),
    }
}

/// Renders an outbound field set as hidden `<input>` elements, one per line.
pub fn hidden_inputs(fields: &FieldSet) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("<input type=\"hidden\" name=\"{name}\" value=\"{value}\">"))
        .collect::<Vec<_>>()
        .join("\n")
}
