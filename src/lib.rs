//! Convert CircuiTikZ diagrams into structured JSON scene descriptions.
//!
//! The source markup has no formal grammar available here; its statement
//! shapes are the small, fixed repertoire emitted by CircuiTikZ Designer,
//! recovered with per-kind micro-grammars. The pipeline runs strictly
//! forward:
//!
//! 1. preprocess: strip comments, isolate the drawing-environment body
//! 2. extract: classify draw/node/path statement spans
//! 3. parse: tokenize each statement into its kind-specific record
//! 4. build: transform coordinates, parse attributes, assemble components
//!
//! Conversion is pure and per-document; malformed statements degrade to
//! logged diagnostics, never to a failed document. Only a missing drawing
//! environment aborts, and that surfaces as the error-record document shape
//! rather than a Rust error from [`tikru`].
//!
//! ```
//! let json = tikru::tikru(
//!     "\\begin{circuitikz}\\draw (0, 8) -- (2, 8);\\end{circuitikz}",
//! )
//! .unwrap();
//! assert!(json.contains("\"wire\""));
//! ```

use pest_derive::Parser;

mod ast;
mod builder;
mod errors;
mod extract;
mod label;
pub mod log;
mod options;
mod parse;
mod preprocess;
mod scene;
mod transform;

pub use ast::TurnOp;
pub use errors::{ConvertError, MISSING_BLOCK_MESSAGE};
pub use scene::{
    Component, DeviceBody, Document, FORMAT_VERSION, Fill, Label, PathBody, Point, Scale, Scene,
    ShapeBody, Size, Stroke, TextBlock, WireBody,
};
pub use transform::{SCALE_SHAPE, SCALE_X, SCALE_Y};

#[derive(Parser)]
#[grammar = "circuitikz.pest"]
pub(crate) struct CircuitikzParser;

/// Convert CircuiTikZ source to the scene JSON document.
///
/// Returns the pretty-printed document text: the scene on success, the
/// error-record shape when the source has no drawing environment.
pub fn tikru(source: &str) -> Result<String, miette::Report> {
    let document = convert(source);
    serde_json::to_string_pretty(&document)
        .map_err(|e| miette::miette!("cannot serialize scene document: {e}"))
}

/// Convert CircuiTikZ source to a [`Document`] value.
pub fn convert(source: &str) -> Document {
    match scene(source) {
        Ok(scene) => Document::Scene(scene),
        Err(ConvertError::MissingEnvironment) => Document::Error {
            error: MISSING_BLOCK_MESSAGE.to_string(),
        },
    }
}

/// Convert CircuiTikZ source to a [`Scene`], with a typed error instead of
/// the error-record document shape.
pub fn scene(source: &str) -> Result<Scene, ConvertError> {
    let body = preprocess::isolate(source).ok_or(ConvertError::MissingEnvironment)?;
    let mut components = Vec::new();
    for raw in extract::statements(&body) {
        match parse::statement(&raw) {
            Ok(statement) => components.push(builder::build(statement)),
            Err(report) => crate::log::warn!("skipping unrecognized statement: {report}"),
        }
    }
    Ok(Scene {
        version: FORMAT_VERSION.to_string(),
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_single_node_statement() {
        let input = "\\node[shape=circle, draw] at (3.5, 8.75){};";
        let result = CircuitikzParser::parse(Rule::node_statement, input);
        assert!(result.is_ok(), "failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_chained_node_statement() {
        let input =
            "\\node[npn](N1) at (10.75, 7.98){} node[anchor=north west] at (N1.text){$Q_1$};";
        let result = CircuitikzParser::parse(Rule::node_statement, input);
        assert!(result.is_ok(), "failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_wire_stream() {
        let input = "(0,8) -- (2,8) -| (3,9)[line width=1pt]";
        let result = CircuitikzParser::parse(Rule::wire_stream, input);
        assert!(result.is_ok(), "failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_clauseless_node_statement() {
        let result = CircuitikzParser::parse(Rule::node_statement, "\\node at (1,2);");
        assert!(result.is_err());
    }

    #[test]
    fn scene_has_a_version_tag() {
        let scene =
            scene("\\begin{circuitikz}\\draw (0, 8) -- (2, 8);\\end{circuitikz}").unwrap();
        assert_eq!(scene.version, "0.1");
        assert_eq!(scene.components.len(), 1);
    }

    #[test]
    fn missing_environment_is_a_typed_error() {
        assert!(matches!(
            scene("\\draw (0, 8) -- (2, 8);"),
            Err(ConvertError::MissingEnvironment)
        ));
    }
}
