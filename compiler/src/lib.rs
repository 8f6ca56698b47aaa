//! phaseui-compiler
//!
//! This crate implements:
//!  1) A line-oriented parser for `GROUP`-annotated `ParamSet`/`Result` protobuf schemas,
//!  2) A verifier for the names and labels pasted into generated code,
//!  3) Qt code generation (`compile_schema_to_qt` → `String`),
//!  4) Error types (`PhaseUiError`) and the generator configuration.

pub mod error;
pub mod types;
pub mod utils;
pub mod parser;
pub mod verifier;
pub mod config;
pub mod writer;
pub mod naming;
pub mod templates;
pub mod gen_qt;
pub mod compiler;

pub use compiler::compile_schema;
pub use compiler::compile_to_qt;
pub use config::GeneratorConfig;
pub use error::PhaseUiError;
pub use gen_qt::compile_schema_to_qt;
