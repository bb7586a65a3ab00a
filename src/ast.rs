//! Statement types produced by the tokenizer.
//!
//! Each of the six statement kinds gets its own record with named fields, so
//! field meaning is carried by the type rather than by token position. A
//! statement is consumed exactly once by the element builder.

use serde::Serialize;

/// One `[options](name) at (coord) {label}` fragment. Statements chain one to
/// three of these.
#[derive(Debug, Clone, Default)]
pub struct NodeClause {
    /// Option text, outer brackets stripped.
    pub options: String,
    /// Parenthesized name, if present.
    pub name: Option<String>,
    /// Coordinate text, outer parentheses stripped. May be anchor-relative,
    /// in which case it never reaches the coordinate transformer.
    pub coordinate: String,
    /// Brace-delimited label text, outer braces stripped.
    pub label: String,
}

/// A lone shape clause: `\node[shape=...] at (x, y){...};`
#[derive(Debug, Clone)]
pub struct SingleNode {
    pub shape: NodeClause,
}

/// A shape clause followed by a text clause.
#[derive(Debug, Clone)]
pub struct TwoNode {
    pub shape: NodeClause,
    pub text: NodeClause,
}

/// A shape clause, an anchored annotation clause, and a text clause.
#[derive(Debug, Clone)]
pub struct ThreeNode {
    pub shape: NodeClause,
    pub annotation: NodeClause,
    pub text: NodeClause,
}

/// A device clause (no leading `shape=`), optionally followed by an anchored
/// caption clause carrying the device label.
#[derive(Debug, Clone)]
pub struct Device {
    pub device: NodeClause,
    pub caption: Option<NodeClause>,
}

/// A draw/path statement containing a `to[...]` device chain.
#[derive(Debug, Clone)]
pub struct ToChain {
    /// Body of the `to[...]` option group, `to` keyword and brackets stripped.
    pub options: String,
    pub tokens: Vec<WireToken>,
}

/// A plain draw/path statement: coordinates joined by turn operators.
///
/// This is the fallback kind for token streams without a `to` chain; streams
/// that match nothing else land here and may carry unintended tokens.
#[derive(Debug, Clone)]
pub struct Wire {
    pub tokens: Vec<WireToken>,
}

/// A classified, tokenized statement.
#[derive(Debug, Clone)]
pub enum Statement {
    SingleNode(SingleNode),
    TwoNode(TwoNode),
    ThreeNode(ThreeNode),
    Device(Device),
    ToChain(ToChain),
    Wire(Wire),
}

/// One token of a draw/path statement, in source order.
#[derive(Debug, Clone)]
pub enum WireToken {
    /// Parenthesized coordinate text, parentheses stripped.
    Coordinate(String),
    /// Bracketed option group, brackets stripped.
    Options { intro: Option<Intro>, body: String },
    Turn(TurnOp),
}

/// Keyword immediately introducing a bracketed option group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intro {
    To,
    Node,
}

/// Wire segment turn operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnOp {
    #[serde(rename = "--")]
    Straight,
    #[serde(rename = "-|")]
    ThenHorizontal,
    #[serde(rename = "|-")]
    ThenVertical,
}
