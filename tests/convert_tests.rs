//! End-to-end document conversion tests.

use serde_json::{Value, json};

fn document(source: &str) -> Value {
    serde_json::to_value(tikru::convert(source)).unwrap()
}

fn components(source: &str) -> Vec<Value> {
    let doc = document(source);
    assert_eq!(doc["version"], "0.1");
    doc["components"].as_array().unwrap().clone()
}

#[test]
fn clamped_circle() {
    let source = "\\begin{circuitikz}\n\
                  \\node[shape=circle, draw, line width=1pt, minimum width=-0.035cm] at (3.5, 8.75){};\n\
                  \\end{circuitikz}";
    assert_eq!(
        components(source),
        vec![json!({
            "type": "ellipse",
            "position": { "x": 132.284, "y": -330.709 },
            "size": { "x": 0.0, "y": 0.0 },
            "stroke": { "width": "1pt" },
        })]
    );
}

#[test]
fn inductor_chain() {
    let source = "\\begin{circuitikz}\n\
                  \\draw (9.54, 10.75) to[cute inductor, l_={$L_1$}] (9.54, 9.75);\n\
                  \\end{circuitikz}";
    assert_eq!(
        components(source),
        vec![json!({
            "type": "path",
            "points": [
                { "x": 360.567, "y": -406.299 },
                { "x": 360.567, "y": -368.504 },
            ],
            "label": { "value": "L_1", "otherSide": "true", "distance": "0.12cm" },
            "id": "cute inductor",
        })]
    );
}

#[test]
fn missing_block_is_the_error_record() {
    let doc = document("no drawing environment here");
    assert_eq!(doc, json!({ "error": "No valid \\begin{circuitikz} block found." }));
    assert!(doc.get("components").is_none());
}

#[test]
fn undrawn_wire_has_no_stroke() {
    let source = "\\begin{circuitikz}\\draw (0, 8) -- (2, 8);\\end{circuitikz}";
    assert_eq!(
        components(source),
        vec![json!({
            "type": "wire",
            "points": [
                { "x": 0.0, "y": -302.362 },
                { "x": 75.591, "y": -302.362 },
            ],
            "directions": ["--"],
        })]
    );
}

#[test]
fn node_lines_come_before_draws_and_paths() {
    let source = "\\begin{circuitikz}\n\
                  \\draw (1, 1) -- (2, 2);\n\
                  \\node[shape=circle] at (3.5, 8.75){};\n\
                  \\path (0, 8) -| (2, 8);\n\
                  \\end{circuitikz}";
    let components = components(source);
    let types: Vec<&Value> = components.iter().map(|c| &c["type"]).collect();
    assert_eq!(types, vec!["ellipse", "wire", "wire"]);
    // the draw statement precedes the path statement
    assert_eq!(components[1]["points"][0], json!({ "x": 37.795, "y": -37.795 }));
    assert_eq!(components[2]["directions"], json!(["-|"]));
}

#[test]
fn arrow_statements_and_comments_are_ignored() {
    let source = "\\begin{circuitikz}\n\
                  % \\draw (5, 5) -- (6, 6);\n\
                  \\draw[->, line width=1pt] (1, 1) -- (2, 2);\n\
                  \\draw (0, 8) -- (2, 8); % trailing comment\n\
                  \\end{circuitikz}";
    let components = components(source);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["points"][0], json!({ "x": 0.0, "y": -302.362 }));
}

#[test]
fn tikzpicture_environment_is_equivalent() {
    let source = "\\begin{tikzpicture}\\draw (0, 8) -- (2, 8);\\end{tikzpicture}";
    assert_eq!(components(source).len(), 1);
}

#[test]
fn device_node_record() {
    let source = "\\begin{circuitikz}\n\
                  \\node[american and port, xscale=0.5, yscale=0.5] at (2, 2){};\n\
                  \\end{circuitikz}";
    assert_eq!(
        components(source),
        vec![json!({
            "type": "node",
            "position": { "x": 75.591, "y": -75.591 },
            "id": "american and port",
            "options": ["xscale=0.5", "yscale=0.5"],
            "scale": { "x": 0.5, "y": 0.5 },
        })]
    );
}

#[test]
fn pretty_json_entry_point() {
    let json = tikru::tikru("\\begin{circuitikz}\\draw (0, 8) -- (2, 8);\\end{circuitikz}")
        .unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["version"], "0.1");
    assert_eq!(parsed["components"][0]["type"], "wire");
}

#[test]
fn unrecognized_statements_do_not_abort_the_document() {
    // the node line is malformed (no label braces); the wire still converts
    let source = "\\begin{circuitikz}\n\
                  \\node[shape=circle] at (1, 2);\n\
                  \\draw (0, 8) -- (2, 8);\n\
                  \\end{circuitikz}";
    let components = components(source);
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["type"], "wire");
}
