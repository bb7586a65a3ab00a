//! Error types with diagnostics using miette.

use miette::Diagnostic;
use thiserror::Error;

/// Error record text for documents without a drawing environment, matching
/// the schema consumed by downstream editors.
pub const MISSING_BLOCK_MESSAGE: &str = "No valid \\begin{circuitikz} block found.";

/// Errors that abort the conversion of a whole document.
///
/// Malformed individual statements never surface here; they degrade to logged
/// diagnostics and best-effort (or omitted) component records.
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("no drawing environment found")]
    #[diagnostic(
        code(tikru::missing_environment),
        help("wrap the circuit statements in \\begin{{circuitikz}} ... \\end{{circuitikz}}")
    )]
    MissingEnvironment,
}
