//! Statement extraction and classification pre-pass.
//!
//! Node statements are recognized per physical line by counting `node[`
//! occurrences (one to three chained clauses). Draw and path statements are
//! matched as `command ... ;` spans over the whole body, with their leading
//! option group re-appended at the end of the span. Statements whose option
//! group carries a directional arrow are discarded: directional wires are
//! out of scope.
//!
//! Emission order: node statements in line order, then draw statements, then
//! path statements, each in document order. Downstream editors depend on
//! this ordering staying stable.

/// A recognized statement span, classified but not yet tokenized.
#[derive(Debug, Clone)]
pub(crate) enum RawStatement {
    /// A `\node` line with 1-3 chained clauses. `leads_with_shape` is true
    /// when the leading options open with a `shape=` declaration, selecting
    /// the geometric-shape kinds over the device kind.
    Node {
        text: String,
        clauses: usize,
        leads_with_shape: bool,
    },
    /// A `\draw ... ;` span.
    Draw { text: String },
    /// A `\path ... ;` span.
    Path { text: String },
}

/// Scan the drawing-environment body for statements.
pub(crate) fn statements(body: &str) -> Vec<RawStatement> {
    let mut out = Vec::new();
    for line in body.lines() {
        let clauses = line.matches("node[").count();
        if !(1..=3).contains(&clauses) || !line.contains("\\node[") {
            continue;
        }
        out.push(RawStatement::Node {
            text: line.trim().to_string(),
            clauses,
            leads_with_shape: leads_with_shape(line),
        });
    }
    for text in command_spans(body, "\\draw") {
        out.push(RawStatement::Draw { text });
    }
    for text in command_spans(body, "\\path") {
        out.push(RawStatement::Path { text });
    }
    out
}

/// True when the statement opens as `\node[shape=...`.
fn leads_with_shape(line: &str) -> bool {
    let Some(at) = line.find("\\node") else {
        return false;
    };
    let rest = line[at + "\\node".len()..].trim_start();
    let Some(rest) = rest.strip_prefix('[') else {
        return false;
    };
    let Some(rest) = rest.trim_start().strip_prefix("shape") else {
        return false;
    };
    rest.trim_start().starts_with('=')
}

/// `command [options]? content ;` spans, arrow-bearing ones dropped. The
/// returned text is `content` with the option group appended at the end, so
/// the tokenizer sees options as the trailing bracket token.
fn command_spans(body: &str, command: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(found) = body[from..].find(command) {
        let after = from + found + command.len();
        let mut rest = &body[after..];
        let mut options = "";
        if rest.starts_with('[') {
            if let Some(close) = rest.find(']') {
                options = &rest[..=close];
                rest = &rest[close + 1..];
            }
        }
        let Some(term) = rest.find(';') else {
            from = after;
            continue;
        };
        let content = &rest[..term];
        from = after + options.len() + term + 1;
        if options.contains("->") || options.contains("<-") {
            crate::log::debug!("skipping arrow-bearing {command} statement");
            continue;
        }
        let text = if options.is_empty() {
            content.trim().to_string()
        } else {
            format!("{}{}", content.trim(), options.trim())
        };
        spans.push(text);
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(body: &str) -> Vec<String> {
        statements(body)
            .iter()
            .map(|s| match s {
                RawStatement::Node { clauses, leads_with_shape, .. } => {
                    format!("node{clauses}{}", if *leads_with_shape { "+shape" } else { "" })
                }
                RawStatement::Draw { .. } => "draw".to_string(),
                RawStatement::Path { .. } => "path".to_string(),
            })
            .collect()
    }

    #[test]
    fn classifies_by_clause_count() {
        let body = "\\node[shape=circle] at (1,2){};\n\
                    \\node[npn](N1) at (1,2){} node[anchor=west] at (N1.text){$Q_1$};\n";
        assert_eq!(kinds(body), vec!["node1+shape", "node2"]);
    }

    #[test]
    fn node_lines_precede_draws_and_paths() {
        let body = "\\draw (0,8) -- (2,8);\n\
                    \\path (1,1) -- (2,2) -| (3,3);\n\
                    \\node[shape=circle] at (1,2){};\n";
        assert_eq!(kinds(body), vec!["node1+shape", "draw", "path"]);
    }

    #[test]
    fn arrow_bearing_statements_are_dropped() {
        let body = "\\draw[->, line width=1pt] (0,0) -- (1,1);\n\
                    \\draw[line width=1pt] (0,0) -- (1,1);\n";
        assert_eq!(kinds(body), vec!["draw"]);
    }

    #[test]
    fn draw_options_move_to_the_tail() {
        let body = "\\draw[line width=1pt] (0,8) -- (2,8);";
        let Some(RawStatement::Draw { text }) = statements(body).into_iter().next() else {
            panic!("expected a draw statement");
        };
        assert_eq!(text, "(0,8) -- (2,8)[line width=1pt]");
    }

    #[test]
    fn draw_inside_node_line_is_not_a_node() {
        // a draw statement annotated with a node clause stays a draw
        let body = "\\draw (0,0) -- (1,1) node[above]{x};";
        assert_eq!(kinds(body), vec!["draw"]);
    }

    #[test]
    fn four_clause_lines_are_ignored() {
        let body = "\\node[a] at (0,0){} node[b] at (0,0){} node[c] at (0,0){} node[d] at (0,0){};";
        assert!(statements(body).is_empty());
    }
}
