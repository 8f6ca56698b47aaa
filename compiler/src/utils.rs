use crate::error::PhaseUiError;

/// JSON-style quoting for schema text embedded in diagnostics.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn error(msg: &str, line: usize, text: &str) -> PhaseUiError {
    PhaseUiError::ParseError {
        msg:  msg.to_string(),
        line,
        text: quote(text),
    }
}
