use tracing::info;

use crate::{
    config::GeneratorConfig,
    error::PhaseUiError,
    gen_qt::compile_schema_to_qt,
    parser::parse_schema,
    types::Schema,
    verifier::verify_schema,
};

/// Parse and verify a textual schema.
/// Returns `Err(PhaseUiError)` if parsing or verification fails.
pub fn compile_schema(text: &str) -> Result<Schema, PhaseUiError> {
    let schema = parse_schema(text)?;
    verify_schema(&schema)?;
    info!(
        groups = schema.groups.len(),
        fields = schema.field_count(),
        "schema compiled"
    );
    Ok(schema)
}

/// Schema text straight to the generated header. Nothing is generated unless
/// the whole schema parses and verifies.
pub fn compile_to_qt(text: &str, config: &GeneratorConfig) -> Result<String, PhaseUiError> {
    let schema = compile_schema(text)?;
    Ok(compile_schema_to_qt(&schema, config))
}
