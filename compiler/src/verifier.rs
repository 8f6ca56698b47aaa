use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::PhaseUiError,
    types::{FieldKind, Schema},
    utils::quote,
};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

fn check_identifier(what: &str, name: &str) -> Result<(), PhaseUiError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(PhaseUiError::VerifierError(format!(
            "The {} name {} is not a valid C++ identifier",
            what,
            quote(name)
        )))
    }
}

/// Returns `Ok(())` if every name and label can be pasted into the generated
/// header as-is, or `Err(PhaseUiError::VerifierError(_))` otherwise.
pub fn verify_schema(schema: &Schema) -> Result<(), PhaseUiError> {
    for group in &schema.groups {
        check_identifier("group", &group.name)?;

        if let Some(info) = &group.info_label {
            check_identifier("info label", info)?;
        }
        if let Some(image) = &group.image {
            check_identifier("image", image)?;
        }

        for field in &group.params {
            check_identifier("field", &field.name)?;

            // Labels land inside a C++ string literal
            if field.label.contains(['"', '\\']) {
                return Err(PhaseUiError::VerifierError(format!(
                    "The label of field {} (line {}) may not contain quotes or backslashes",
                    quote(&field.name),
                    field.line
                )));
            }

            if let FieldKind::Enum(enum_type) = &field.kind {
                if enum_type.options.is_empty() {
                    return Err(PhaseUiError::VerifierError(format!(
                        "The enum {} used by field {} has no members",
                        quote(&enum_type.name),
                        quote(&field.name)
                    )));
                }
                for option in &enum_type.options {
                    check_identifier("enum member", option)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    fn verify(text: &str) -> Result<(), PhaseUiError> {
        verify_schema(&parse_schema(text).expect("parse_schema failed"))
    }

    #[test]
    fn test_valid_schema() {
        let text = "message ParamSet {\nenum Mode { A = 0; }\n// GROUP: G\nMode mode = 1; // Mode\nint32 x = 2; // X (px)\n}\n";
        assert!(verify(text).is_ok());
    }

    #[test]
    fn test_bad_identifier() {
        let text = "message ParamSet {\n// GROUP: G\nint32 x.y = 2; // X\n}\n";
        let err = verify(text).unwrap_err();
        assert!(matches!(err, PhaseUiError::VerifierError(_)), "got {:?}", err);
    }

    #[test]
    fn test_label_with_quote() {
        let text = "message ParamSet {\n// GROUP: G\nint32 x = 2; // say \"hi\"\n}\n";
        let err = verify(text).unwrap_err();
        assert!(err.to_string().contains("quotes"), "got {}", err);
    }

    #[test]
    fn test_empty_enum() {
        let text = "message ParamSet {\nenum Mode {\n}\n// GROUP: G\nMode mode = 1; // Mode\n}\n";
        let err = verify(text).unwrap_err();
        assert!(err.to_string().contains("no members"), "got {}", err);
    }
}
