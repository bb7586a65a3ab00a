//! Element builders: one per statement kind.
//!
//! Builders compose the attribute parsers into component records. Attributes
//! apply in a fixed order (geometry/position, size, name, stroke, fill,
//! label/text, rotation/scale); stroke and fill default to present-but-empty
//! markers in some places, so later steps overwrite rather than merge.

use crate::ast::*;
use crate::label;
use crate::options::{self, ShapeKind};
use crate::scene::*;
use crate::transform;

/// Assemble the component record for one tokenized statement.
pub(crate) fn build(statement: Statement) -> Component {
    match statement {
        Statement::SingleNode(node) => build_single_node(node),
        Statement::TwoNode(node) => build_two_node(node),
        Statement::ThreeNode(node) => build_three_node(node),
        Statement::Device(node) => build_device(node),
        Statement::ToChain(chain) => build_to_chain(chain),
        Statement::Wire(wire) => build_wire(wire),
    }
}

fn build_single_node(node: SingleNode) -> Component {
    let SingleNode { shape } = node;
    let (kind, size) = options::parse_shape(&shape.options);
    let (rotation, scale) = options::parse_rotation(&shape.options);
    shape_component(
        kind,
        ShapeBody {
            position: first_position(&[&shape]),
            size,
            name: nonempty(shape.name),
            stroke: options::parse_draw(&shape.options).unwrap_or_else(Stroke::hidden),
            rotation,
            scale,
            ..Default::default()
        },
    )
}

fn build_two_node(node: TwoNode) -> Component {
    let TwoNode { shape, text } = node;
    let (kind, size) = options::parse_shape(&shape.options);
    let (rotation, scale) = options::parse_rotation(&shape.options);
    shape_component(
        kind,
        ShapeBody {
            position: first_position(&[&shape, &text]),
            size,
            name: nonempty(shape.name),
            stroke: options::parse_draw(&shape.options).unwrap_or_else(Stroke::hidden),
            fill: options::parse_fill(&shape.options),
            text: Some(label::parse_text_block(&text.label)),
            label: None,
            rotation,
            scale,
        },
    )
}

fn build_three_node(node: ThreeNode) -> Component {
    let ThreeNode { shape, annotation, text } = node;
    let (kind, size) = options::parse_shape(&shape.options);
    let (rotation, scale) = options::parse_rotation(&shape.options);
    let mut text_block = label::parse_text_block(&text.label);
    let label = annotation_label(&annotation, &mut text_block);
    shape_component(
        kind,
        ShapeBody {
            position: first_position(&[&shape, &annotation, &text]),
            size,
            name: nonempty(shape.name),
            stroke: options::parse_draw(&shape.options).unwrap_or_else(Stroke::hidden),
            fill: options::parse_fill(&shape.options),
            text: Some(text_block),
            label,
            rotation,
            scale,
        },
    )
}

/// The anchored annotation clause of a three-node statement. A leading
/// font-size command in the label lands on the shape's text block, per the
/// target schema.
fn annotation_label(annotation: &NodeClause, text: &mut TextBlock) -> Option<Label> {
    let mut spans = label::split_mixed_math(&annotation.label);
    if spans.is_empty() {
        return None;
    }
    let command = spans
        .first()
        .and_then(|s| label::leading_command(s).map(|(c, r)| (c.to_string(), r.to_string())));
    if let Some((command, remainder)) = command {
        text.font_size = Some(command);
        spans[0] = remainder;
    }
    let joined = spans.join(" ");
    Some(Label {
        value: Some(joined.trim_matches('$').to_string()),
        anchor: options::anchor(&annotation.options),
        // the text clause pins the label relative to the component; the
        // exact spot is left for the editor to adjust
        position: Some("northeast".to_string()),
        relative_to_component: Some("true".to_string()),
        distance: Some("0.16cm".to_string()),
        other_side: None,
    })
}

fn build_device(node: Device) -> Component {
    let Device { device, caption } = node;
    let position = match &caption {
        Some(caption) => first_position(&[&device, caption]),
        None => first_position(&[&device]),
    };

    let mut rotation = None;
    let mut scale = None;
    let (id, device_options) = match device.options.split_once(',') {
        None => (device.options.trim().to_string(), Vec::new()),
        Some((first, rest)) => {
            (rotation, scale) = options::parse_rotation(&device.options);
            let list = rest.split(',').map(|s| s.trim().to_string()).collect();
            (first.trim().to_string(), list)
        }
    };

    let label = caption.as_ref().map(|caption| Label {
        anchor: Some("default".to_string()),
        position: Some("default".to_string()),
        distance: Some("0.12cm".to_string()),
        value: label::math_span(&caption.label),
        ..Default::default()
    });

    Component::Node(DeviceBody {
        position,
        id,
        options: device_options,
        label,
        rotation,
        scale,
    })
}

fn build_to_chain(chain: ToChain) -> Component {
    let points = collect_points(&chain.tokens);
    if points.is_empty() {
        crate::log::warn!("device chain has no absolute coordinates");
    }
    let mut body = PathBody { points, ..Default::default() };

    let opts = chain.options.as_str();
    if opts.contains('$') {
        // a math span means the chain carries a label
        let parts = options::split_options(opts);
        let last = parts.last().cloned().unwrap_or_default();
        let mut chain_label = Label {
            distance: Some("0.12cm".to_string()),
            ..Default::default()
        };
        if let Some((other_side, value)) = label::extract_label(&last) {
            chain_label.value = value;
            if other_side {
                chain_label.other_side = Some("true".to_string());
            }
        }
        body.label = Some(chain_label);
        body.scale = mirror_scale(&parts);
        body.id = parts.first().cloned();
        if let Some(name) = last.strip_prefix("name=") {
            if !name.is_empty() {
                body.name = Some(name.to_string());
            }
        }
    } else if opts.contains(',') {
        let parts: Vec<String> = opts.split(',').map(|s| s.trim().to_string()).collect();
        body.scale = mirror_scale(&parts);
        body.id = parts.first().cloned();
    } else {
        body.id = Some(opts.trim().to_string());
    }
    Component::Path(body)
}

/// `mirror`/`invert` chain flags as an explicit two-axis scale.
fn mirror_scale(parts: &[String]) -> Option<Scale> {
    let mirror = parts.iter().any(|p| p == "mirror");
    let invert = parts.iter().any(|p| p == "invert");
    match (mirror, invert) {
        (true, true) => Some(Scale { x: -1.0, y: -1.0 }),
        (true, false) => Some(Scale { x: -1.0, y: 1.0 }),
        (false, true) => Some(Scale { x: 1.0, y: -1.0 }),
        (false, false) => None,
    }
}

fn build_wire(wire: Wire) -> Component {
    let mut body = WireBody {
        points: collect_points(&wire.tokens),
        directions: wire
            .tokens
            .iter()
            .filter_map(|t| match t {
                WireToken::Turn(op) => Some(*op),
                _ => None,
            })
            .collect(),
        stroke: None,
        start_arrow: None,
        end_arrow: None,
    };

    // the trailing option group drives width, styling, and arrow heads
    if let Some(WireToken::Options { body: opts, .. }) = wire.tokens.last() {
        if let Some((width, _)) = options::line_width(opts) {
            body.stroke = Some(if opts.contains("draw") {
                options::parse_draw(opts).unwrap_or_default()
            } else {
                Stroke { width: Some(width), ..Default::default() }
            });
            let (start, end) = options::parse_arrows(opts, true);
            body.start_arrow = start;
            body.end_arrow = end;
        } else {
            let (start, end) = options::parse_arrows(opts, false);
            body.start_arrow = start;
            body.end_arrow = end;
        }
    }

    // a leading option group wins for stroke styling
    if let Some(WireToken::Options { body: opts, .. }) = wire.tokens.first() {
        if let Some(stroke) = options::parse_draw(opts) {
            body.stroke = Some(stroke);
        }
    }

    Component::Wire(body)
}

/// Absolute coordinates of a token stream, transformed, in source order.
/// Anchor-relative tokens drop out, so the list may be shorter than the
/// number of coordinate tokens.
fn collect_points(tokens: &[WireToken]) -> Vec<Point> {
    tokens
        .iter()
        .filter_map(|token| match token {
            WireToken::Coordinate(text) => transform::parse_coordinate(text),
            _ => None,
        })
        .map(transform::to_scene)
        .collect()
}

/// First absolute coordinate among the clauses, transformed. Statements
/// whose clauses are all anchor-relative produce no position.
fn first_position(clauses: &[&NodeClause]) -> Option<Point> {
    let position = clauses
        .iter()
        .find_map(|clause| transform::parse_coordinate(&clause.coordinate))
        .map(transform::to_scene);
    if position.is_none() {
        crate::log::warn!("statement has no absolute coordinate, omitting its position");
    }
    position
}

fn shape_component(kind: ShapeKind, body: ShapeBody) -> Component {
    match kind {
        ShapeKind::Rect => Component::Rect(body),
        ShapeKind::Ellipse => Component::Ellipse(body),
    }
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
