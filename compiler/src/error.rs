use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhaseUiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {msg} in {text}")]
    ParseError {
        msg:  String,
        line: usize,
        text: String,
    },

    #[error("Duplicate {slot} for group \"{group}\" at line {line}")]
    DuplicateSlot {
        slot:  &'static str,
        group: String,
        line:  usize,
    },

    #[error("Enum \"{name}\" is defined twice (line {line})")]
    DuplicateEnum {
        name: String,
        line: usize,
    },

    #[error("No current group at line {line}: {text} appears before any \"// GROUP:\" directive")]
    MissingGroup {
        line: usize,
        text: String,
    },

    #[error("Misplaced field at line {line}: {msg}")]
    MisplacedField {
        msg:  String,
        line: usize,
    },

    #[error("Unknown type \"{type_name}\" at line {line}")]
    UnknownType {
        type_name: String,
        line:      usize,
    },

    #[error("Unknown modifier combination \"{tag}\" at line {line}")]
    UnknownModifier {
        tag:  String,
        line: usize,
    },

    #[error("Verifier error: {0}")]
    VerifierError(String),
}
