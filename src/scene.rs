//! Output scene model.
//!
//! These types serialize to the JSON document consumed by downstream circuit
//! editors. Optional attributes are omitted entirely when the source
//! statement carried no corresponding information; they never serialize as
//! `null`. A handful of values (`"true"` flags, `"1pt"` widths, `"0.12cm"`
//! distances, the text-box defaults) are opaque protocol constants of the
//! target schema and keep their exact string forms.

use serde::Serialize;

use crate::ast::TurnOp;

/// Format version tag carried by every successfully converted document.
pub const FORMAT_VERSION: &str = "0.1";

/// The document-level result: either a scene or the error record emitted when
/// the source contains no drawing environment. These are structurally
/// different shapes, never mixed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Document {
    Scene(Scene),
    Error { error: String },
}

/// An ordered list of component records, in statement order.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub version: String,
    pub components: Vec<Component>,
}

/// One converted statement.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Rect(ShapeBody),
    Ellipse(ShapeBody),
    /// A circuit device (transistor, port, source, ...).
    Node(DeviceBody),
    Wire(WireBody),
    /// A two-terminal device chain drawn along a path.
    Path(PathBody),
}

/// A position in output units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A width/height pair in output units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub x: f64,
    pub y: f64,
}

/// Per-axis scale factors; negative values express flips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

/// Border styling of a shape or wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stroke {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Stroke {
    /// The "do not render a border" marker understood by the target editor:
    /// exactly `{"opacity": 0}`.
    pub fn hidden() -> Self {
        Stroke {
            opacity: Some(0.0),
            ..Default::default()
        }
    }
}

/// Interior fill of a shape. Only explicit RGB triples are supported; named
/// color keywords in the source are not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A label attached to a device, shape, or path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "relativeToComponent", skip_serializing_if = "Option::is_none")]
    pub relative_to_component: Option<String>,
    #[serde(rename = "otherSide", skip_serializing_if = "Option::is_none")]
    pub other_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

/// A text box attached to a shape.
#[derive(Debug, Clone, Serialize)]
pub struct TextBlock {
    pub align: String,
    pub justify: String,
    #[serde(rename = "innerSep")]
    pub inner_sep: String,
    #[serde(rename = "showPlaceholderText")]
    pub show_placeholder_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "fontSize", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Default for TextBlock {
    /// Editor defaults: centered both ways, no inner padding.
    fn default() -> Self {
        TextBlock {
            align: "1".into(),
            justify: "0".into(),
            inner_sep: "0".into(),
            show_placeholder_text: "true".into(),
            color: None,
            font_size: None,
            text: None,
        }
    }
}

/// Body of a `rect`/`ellipse` record.
///
/// `stroke` is always present: shapes without a draw marker carry the
/// [`Stroke::hidden`] sentinel rather than omitting the field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShapeBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stroke: Stroke,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

/// Body of a device (`node`) record.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    pub id: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

/// Body of a `wire` record.
#[derive(Debug, Clone, Serialize)]
pub struct WireBody {
    pub points: Vec<Point>,
    pub directions: Vec<TurnOp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(rename = "startArrow", skip_serializing_if = "Option::is_none")]
    pub start_arrow: Option<String>,
    #[serde(rename = "endArrow", skip_serializing_if = "Option::is_none")]
    pub end_arrow: Option<String>,
}

/// Body of a `path` record (a `to`-chained device).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PathBody {
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
