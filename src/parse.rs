//! Parse pest pairs into statement records.
//!
//! One parse function per statement kind, keyed on the extractor's
//! classification. Statements that do not match their micro-grammar are
//! errors here — the converter skips them with a diagnostic instead of
//! guessing at their structure.

use pest::Parser;
use pest::iterators::Pair;

use crate::ast::*;
use crate::extract::RawStatement;
use crate::{CircuitikzParser, Rule};

/// Tokenize one extracted statement into its kind-specific record.
pub(crate) fn statement(raw: &RawStatement) -> Result<Statement, miette::Report> {
    match raw {
        RawStatement::Node { text, clauses, leads_with_shape } => {
            node_statement(text, *clauses, *leads_with_shape)
        }
        RawStatement::Draw { text } | RawStatement::Path { text } => wire_statement(text),
    }
}

fn node_statement(
    text: &str,
    clauses: usize,
    leads_with_shape: bool,
) -> Result<Statement, miette::Report> {
    let mut pairs = CircuitikzParser::parse(Rule::node_statement, text)
        .map_err(|e| miette::miette!("statement does not match the node grammar: {e}"))?;
    let statement = pairs.next().unwrap();

    let mut found = Vec::new();
    for pair in statement.into_inner() {
        match pair.as_rule() {
            Rule::node_clause => found.push(parse_clause(pair)),
            Rule::chained_clause => {
                for inner in pair.into_inner() {
                    if inner.as_rule() == Rule::node_clause {
                        found.push(parse_clause(inner));
                    }
                }
            }
            _ => {}
        }
    }
    if found.len() != clauses {
        return Err(miette::miette!(
            "expected {clauses} node clauses, found {}",
            found.len()
        ));
    }

    let mut it = found.into_iter();
    Ok(match (clauses, leads_with_shape) {
        (1, true) => Statement::SingleNode(SingleNode { shape: it.next().unwrap() }),
        (1, false) => Statement::Device(Device { device: it.next().unwrap(), caption: None }),
        (2, true) => Statement::TwoNode(TwoNode {
            shape: it.next().unwrap(),
            text: it.next().unwrap(),
        }),
        (2, false) => Statement::Device(Device {
            device: it.next().unwrap(),
            caption: it.next(),
        }),
        _ => Statement::ThreeNode(ThreeNode {
            shape: it.next().unwrap(),
            annotation: it.next().unwrap(),
            text: it.next().unwrap(),
        }),
    })
}

fn parse_clause(pair: Pair<Rule>) -> NodeClause {
    let mut clause = NodeClause::default();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::options => clause.options = inner_text(inner, Rule::option_text),
            Rule::name => clause.name = Some(inner_text(inner, Rule::name_text)),
            Rule::coordinate => clause.coordinate = inner_text(inner, Rule::coordinate_text),
            Rule::label => clause.label = inner_text(inner, Rule::label_text),
            _ => {}
        }
    }
    clause
}

fn inner_text(pair: Pair<Rule>, rule: Rule) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == rule)
        .map(|p| p.as_str().trim().to_string())
        .unwrap_or_default()
}

fn wire_statement(text: &str) -> Result<Statement, miette::Report> {
    Ok(classify_stream(wire_tokens(text)?))
}

/// Tokenize a draw/path span into its ordered coordinate, option-group, and
/// turn-operator tokens.
pub(crate) fn wire_tokens(text: &str) -> Result<Vec<WireToken>, miette::Report> {
    let mut pairs = CircuitikzParser::parse(Rule::wire_stream, text)
        .map_err(|e| miette::miette!("statement does not tokenize as a wire: {e}"))?;
    let stream = pairs.next().unwrap();

    let mut tokens = Vec::new();
    for pair in stream.into_inner() {
        match pair.as_rule() {
            Rule::wire_coordinate => tokens.push(WireToken::Coordinate(inner_text(
                pair,
                Rule::coordinate_text,
            ))),
            Rule::wire_options => {
                let raw = pair.as_str();
                let (intro, rest) = if let Some(rest) = raw.strip_prefix("to") {
                    (Some(Intro::To), rest)
                } else if let Some(rest) = raw.strip_prefix("node") {
                    (Some(Intro::Node), rest)
                } else {
                    (None, raw)
                };
                let body = rest
                    .strip_prefix('[')
                    .and_then(|r| r.strip_suffix(']'))
                    .unwrap_or(rest)
                    .to_string();
                tokens.push(WireToken::Options { intro, body });
            }
            Rule::turn_op => {
                let op = match pair.as_str() {
                    "--" => TurnOp::Straight,
                    "-|" => TurnOp::ThenHorizontal,
                    _ => TurnOp::ThenVertical,
                };
                tokens.push(WireToken::Turn(op));
            }
            _ => {}
        }
    }
    Ok(tokens)
}

/// A stream with a `to[...]` group is a device chain; everything else falls
/// through to the wire kind.
fn classify_stream(tokens: Vec<WireToken>) -> Statement {
    let chain = tokens.iter().find_map(|token| match token {
        WireToken::Options { intro: Some(Intro::To), body } => Some(body.clone()),
        _ => None,
    });
    match chain {
        Some(options) => Statement::ToChain(ToChain { options, tokens }),
        None => {
            if !tokens.iter().any(|t| matches!(t, WireToken::Coordinate(_))) {
                crate::log::warn!("statement fell through to a wire with no coordinate tokens");
            }
            Statement::Wire(Wire { tokens })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(text: &str, clauses: usize, leads_with_shape: bool) -> Statement {
        statement(&RawStatement::Node {
            text: text.to_string(),
            clauses,
            leads_with_shape,
        })
        .unwrap()
    }

    fn draw(text: &str) -> Statement {
        statement(&RawStatement::Draw { text: text.to_string() }).unwrap()
    }

    #[test]
    fn single_node_clause_fields() {
        let Statement::SingleNode(node) = node(
            "\\node[shape=circle, draw, line width=1pt, minimum width=-0.035cm] at (3.5, 8.75){};",
            1,
            true,
        ) else {
            panic!("expected a single node");
        };
        assert_eq!(
            node.shape.options,
            "shape=circle, draw, line width=1pt, minimum width=-0.035cm"
        );
        assert_eq!(node.shape.name, None);
        assert_eq!(node.shape.coordinate, "3.5, 8.75");
        assert_eq!(node.shape.label, "");
    }

    #[test]
    fn named_clause_and_chained_caption() {
        let Statement::Device(device) = node(
            "\\node[npn, photo](N1) at (10.75, 7.98){} node[anchor=north west] at (N1.text){$Q_1$};",
            2,
            false,
        ) else {
            panic!("expected a device");
        };
        assert_eq!(device.device.name.as_deref(), Some("N1"));
        assert_eq!(device.device.options, "npn, photo");
        let caption = device.caption.unwrap();
        assert_eq!(caption.coordinate, "N1.text");
        assert_eq!(caption.label, "$Q_1$");
    }

    #[test]
    fn three_clauses_with_relative_anchor() {
        let Statement::ThreeNode(node) = node(
            "\\node[shape=rectangle, minimum width=1.762cm](my text) at (12.648, 11){} \
             node[anchor=south] at ([yshift=0.63cm]my text.text){$A_{label}$} \
             node[anchor=center, align=center, text width=1.444cm, inner sep=5pt] at (12.648, 11){$e_c(t)$};",
            3,
            true,
        ) else {
            panic!("expected a three-node statement");
        };
        assert_eq!(node.shape.name.as_deref(), Some("my text"));
        assert_eq!(node.annotation.coordinate, "[yshift=0.63cm]my text.text");
        assert_eq!(node.annotation.label, "$A_{label}$");
        assert_eq!(node.text.label, "$e_c(t)$");
    }

    #[test]
    fn nested_braces_in_labels() {
        let Statement::SingleNode(node) = node(
            "\\node[shape=circle] at (1, 2){$\\frac{a}{b}$ \\textbf{x}};",
            1,
            true,
        ) else {
            panic!("expected a single node");
        };
        assert_eq!(node.shape.label, "$\\frac{a}{b}$ \\textbf{x}");
    }

    #[test]
    fn clause_count_mismatch_fails() {
        let raw = RawStatement::Node {
            text: "\\node[a] at (0,0){};".to_string(),
            clauses: 2,
            leads_with_shape: false,
        };
        assert!(statement(&raw).is_err());
    }

    #[test]
    fn wire_tokens_in_order() {
        let Statement::Wire(wire) = draw("(0,8) -- (2,8) -| (3,9)[line width=1pt]") else {
            panic!("expected a wire");
        };
        let kinds: Vec<&str> = wire
            .tokens
            .iter()
            .map(|t| match t {
                WireToken::Coordinate(_) => "coord",
                WireToken::Options { .. } => "options",
                WireToken::Turn(_) => "turn",
            })
            .collect();
        assert_eq!(kinds, vec!["coord", "turn", "coord", "turn", "coord", "options"]);
    }

    #[test]
    fn to_keyword_selects_the_chain_kind() {
        let Statement::ToChain(chain) = draw("(9.54, 10.75) to[cute inductor, l_={$L_1$}] (9.54, 9.75)")
        else {
            panic!("expected a to chain");
        };
        assert_eq!(chain.options, "cute inductor, l_={$L_1$}");
    }

    #[test]
    fn bare_to_without_brackets_stays_a_wire() {
        let stmt = draw("(0,0) to (1,1)");
        assert!(matches!(stmt, Statement::Wire(_)));
    }

    #[test]
    fn node_annotations_are_tokenized_not_chained() {
        let Statement::Wire(wire) = draw("(0,0) -- (1,1) node[above]{x}") else {
            panic!("expected a wire");
        };
        let intro = wire.tokens.iter().find_map(|t| match t {
            WireToken::Options { intro, .. } => Some(*intro),
            _ => None,
        });
        assert_eq!(intro, Some(Some(Intro::Node)));
    }
}
