//! Attribute parsers for statement option text.
//!
//! Each parser is an independent extractor over the raw option text of one
//! statement: shape and size, stroke (draw) options, fill options,
//! rotation/scale inference, dash-pattern canonicalization, arrow heads.
//! The canonical alias tables live here as immutable data; there is no
//! ambient mutable state.

use crate::scene::{Fill, Scale, Size, Stroke};
use crate::transform;

/// Arrow-head syntaxes recognized in wire options, keyed to their scene
/// schema names.
const ARROW_ALIASES: &[(&str, &str)] = &[
    ("stealth", "stealth"),
    ("stealth reversed", "stealthR"),
    ("latex", "latex"),
    ("latex reversed", "latexR"),
    ("to", "to"),
    ("to reversed", "toR"),
    ("|", "line"),
];

/// Dash on/off sequences normalized to a line width of 1, keyed to named
/// line styles.
const LINE_ALIASES: &[(&str, &str)] = &[
    ("on 1pt off 4pt", "dotted"),
    ("on 1pt off 2pt", "denselydotted"),
    ("on 1pt off 8pt", "looselydotted"),
    ("on 4pt off 4pt", "dashed"),
    ("on 4pt off 2pt", "denselydashed"),
    ("on 4pt off 8pt", "looselydashed"),
    ("on 4pt off 2pt on 1pt off 2pt", "dashdot"),
    ("on 4pt off 1pt on 1pt off 1pt", "denselydashdot"),
    ("on 4pt off 4pt on 1pt off 4pt", "looselydashdot"),
    ("on 4pt off 2pt on 1pt off 2pt on 1pt off 2pt", "dashdotdot"),
    ("on 4pt off 1pt on 1pt off 1pt on 1pt off 1pt", "denselydashdotdot"),
    ("on 4pt off 4pt on 1pt off 4pt on 1pt off 4pt", "looselydashdotdot"),
];

/// Geometric shape class of a node record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeKind {
    Rect,
    Ellipse,
}

/// Parse the `shape=` declaration and the minimum width/height options.
///
/// The rectangle shape maps to a `rect` record; every other declared shape
/// collapses to `ellipse` on purpose. Width clamps negative values to zero;
/// height mirrors the width when absent (circles and squares).
pub(crate) fn parse_shape(options: &str) -> (ShapeKind, Option<Size>) {
    let kind = match shape_name(options) {
        Some("rectangle") => ShapeKind::Rect,
        Some(_) => ShapeKind::Ellipse,
        None => {
            crate::log::warn!("options carry no shape declaration, defaulting to ellipse: {options:?}");
            ShapeKind::Ellipse
        }
    };
    let size = after_key(options, "minimum width=")
        .and_then(capture_number)
        .map(|raw| {
            let width = transform::scale_size(raw).max(0.0);
            let height = after_key(options, "minimum height=")
                .and_then(capture_number)
                .map(transform::scale_size)
                .unwrap_or(width);
            Size { x: width, y: height }
        });
    (kind, size)
}

fn shape_name(options: &str) -> Option<&str> {
    let rest = after_key(options, "shape=")?;
    let name = rest.split([',', ']']).next().unwrap_or("").trim();
    (!name.is_empty()).then_some(name)
}

/// Parse stroke styling. `None` when the option text carries no draw marker:
/// shape builders substitute the hidden-stroke sentinel, wire builders omit
/// the attribute entirely.
pub(crate) fn parse_draw(options: &str) -> Option<Stroke> {
    if !options.contains("draw") {
        return None;
    }
    let mut stroke = Stroke::default();
    let mut width_for_style = 1.0;
    if let Some((width, numeric)) = line_width(options) {
        stroke.width = Some(width);
        width_for_style = numeric;
    }
    if let Some(rest) = after_key(options, "draw opacity=") {
        let value = rest.split(',').next().unwrap_or("").trim().trim_end_matches(']');
        if let Ok(opacity) = value.parse::<f64>() {
            stroke.opacity = Some(opacity);
        }
    }
    if let Some(pattern) = braced_value(options, "dash pattern={") {
        let key = descale_dash(pattern, width_for_style);
        match lookup(LINE_ALIASES, &key) {
            Some(style) => stroke.style = Some(style.to_string()),
            None => crate::log::warn!("dash pattern {key:?} was not converted, defaulting to a solid line"),
        }
    }
    if let Some(spec) = braced_value(options, "draw={") {
        if let Some((r, g, b)) = rgb_triple(spec) {
            stroke.color = Some(format!("rgb({r},{g},{b})"));
        }
    }
    Some(stroke)
}

/// Parse fill styling. `None` when the option text carries no fill marker.
pub(crate) fn parse_fill(options: &str) -> Option<Fill> {
    if !options.contains("fill") {
        return None;
    }
    let mut fill = Fill::default();
    if let Some(rest) = after_key(options, "fill opacity=") {
        let value = rest.split(',').next().unwrap_or("").trim().trim_end_matches(']');
        if let Ok(opacity) = value.parse::<f64>() {
            fill.opacity = Some(opacity);
        }
    }
    if let Some(spec) = braced_value(options, "fill={") {
        if let Some((r, g, b)) = rgb_triple(spec) {
            fill.color = Some(format!("rgb({r},{g},{b})"));
        }
    }
    Some(fill)
}

/// Recover rotation and scale intent from the axis-scale flags.
///
/// The source only sometimes states rotation explicitly; a lone xscale means
/// a 180-degree rotation with both axes negated, a lone yscale means an
/// x-flip, and a full xscale/yscale pair without rotation is plain shape
/// scaling. The five cases are mutually exclusive.
pub(crate) fn parse_rotation(options: &str) -> (Option<f64>, Option<Scale>) {
    let x = after_key(options, "xscale=").and_then(capture_number);
    let y = after_key(options, "yscale=").and_then(capture_number);
    let rotate = after_key(options, "rotate=").and_then(capture_number);
    match (x, y, rotate) {
        (Some(x), Some(y), Some(r)) => (Some(r), Some(Scale { x, y })),
        (Some(x), None, None) => (Some(-180.0), Some(Scale { x: -x, y: -x })),
        (None, Some(y), None) => (None, Some(Scale { x: -y, y })),
        (Some(x), Some(y), None) => (None, Some(Scale { x, y })),
        (_, _, Some(r)) => (Some(r), None),
        (None, None, None) => (None, None),
    }
}

/// The `line width=<n>pt` option: the raw width string and its numeric value.
pub(crate) fn line_width(options: &str) -> Option<(String, f64)> {
    let rest = after_key(options, "line width=")?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || !rest[end..].starts_with("pt") {
        return None;
    }
    let numeric = digits.parse().ok()?;
    Some((format!("{digits}pt"), numeric))
}

/// Arrow heads of a wire option group, already canonicalized. `with_width`
/// selects between the two source shapes: an arrow spec following other
/// options, or a lone `[start-end]` group.
pub(crate) fn parse_arrows(options: &str, with_width: bool) -> (Option<String>, Option<String>) {
    let (start, end) = if with_width {
        arrows_after_comma(options)
    } else {
        arrows_bare(options)
    };
    (canonical_arrow(start, "start"), canonical_arrow(end, "end"))
}

fn canonical_arrow(key: Option<&str>, side: &str) -> Option<String> {
    let key = key?;
    if key.is_empty() {
        return None;
    }
    match lookup(ARROW_ALIASES, key) {
        Some(alias) => Some(alias.to_string()),
        None => {
            crate::log::warn!("{side} arrow head {key:?} has no alias, omitting it");
            None
        }
    }
}

/// `, start-end` following other options: start is a run of letters, end runs
/// to the next comma or closing bracket.
fn arrows_after_comma(options: &str) -> (Option<&str>, Option<&str>) {
    for (at, _) in options.match_indices(',') {
        let rest = options[at + 1..].trim_start();
        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if split == 0 || !rest[split..].starts_with('-') {
            continue;
        }
        let start = &rest[..split];
        let tail = &rest[split + 1..];
        let end = &tail[..tail.find([',', ']']).unwrap_or(tail.len())];
        return (Some(start), Some(end));
    }
    (None, None)
}

/// A lone `start-end` group: split at the first dash.
fn arrows_bare(options: &str) -> (Option<&str>, Option<&str>) {
    match options.split_once('-') {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    }
}

/// Split option text on top-level commas, honoring brace nesting, math
/// spans, and backslash escapes. Outer brackets are stripped when present.
///
/// `[american voltage source, l_={$e(t), a(t)$}]`
/// → `["american voltage source", "l_={$e(t), a(t)$}"]`
pub(crate) fn split_options(text: &str) -> Vec<String> {
    let mut text = text;
    if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
        text = &text[1..text.len() - 1];
    }
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut in_math = false;
    let mut escape = false;
    for ch in text.chars() {
        if escape {
            current.push(ch);
            escape = false;
            continue;
        }
        match ch {
            '\\' => {
                current.push(ch);
                escape = true;
            }
            '$' => {
                in_math = !in_math;
                current.push(ch);
            }
            '{' if !in_math => {
                depth += 1;
                current.push(ch);
            }
            '}' if !in_math => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 && !in_math => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// `anchor=<value>` from annotation clause options.
pub(crate) fn anchor(options: &str) -> Option<String> {
    let rest = after_key(options, "anchor=")?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == ',' || c == ']')
        .unwrap_or(rest.len());
    (end > 0).then(|| rest[..end].to_string())
}

/// An explicit RGB triple in the source's 0-255 channel notation:
/// `rgb,255:red,R;green,G;blue,B`.
pub(crate) fn rgb_triple(spec: &str) -> Option<(u32, u32, u32)> {
    let rest = spec.split("rgb,255:red,").nth(1)?;
    let (r, rest) = leading_integer(rest)?;
    let rest = rest.strip_prefix(";green,")?;
    let (g, rest) = leading_integer(rest)?;
    let rest = rest.strip_prefix(";blue,")?;
    let (b, _) = leading_integer(rest)?;
    Some((r, g, b))
}

fn leading_integer(text: &str) -> Option<(u32, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    Some((text[..end].parse().ok()?, &text[end..]))
}

/// Divide every `<n>pt` length in a dash pattern by the stroke width,
/// producing the normalized key the line-style table is indexed by.
fn descale_dash(pattern: &str, width: f64) -> String {
    let mut out = String::new();
    let mut rest = pattern;
    while !rest.is_empty() {
        let Some(start) = rest.find(|c: char| c.is_ascii_digit()) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let end = number_run(tail);
        if tail[end..].starts_with("pt") {
            let length: f64 = tail[..end].parse().unwrap_or(0.0);
            out.push_str(&format!("{}pt", (length / width).round() as i64));
            rest = &tail[end + 2..];
        } else {
            out.push_str(&tail[..end]);
            rest = &tail[end..];
        }
    }
    out
}

/// Length of a leading `\d+\.?\d*` run.
fn number_run(text: &str) -> usize {
    let mut end = 0;
    let mut seen_dot = false;
    for c in text.chars() {
        match c {
            c if c.is_ascii_digit() => end += 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    end
}

fn lookup(table: &'static [(&str, &str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, alias)| *alias)
}

/// Value text following the first occurrence of `key`.
fn after_key<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.find(key).map(|at| &text[at + key.len()..])
}

/// Content between `key` (which ends with the opening brace) and the next
/// closing brace.
fn braced_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let rest = after_key(text, key)?;
    rest.find('}').map(|close| &rest[..close])
}

/// A signed simple decimal at the start of `rest`.
fn capture_number(rest: &str) -> Option<f64> {
    let (signed, body) = match rest.as_bytes().first() {
        Some(b'-' | b'+') => (true, &rest[1..]),
        _ => (false, rest),
    };
    // shrink to the longest prefix that is a valid decimal
    let mut end = number_run(body);
    while end > 0 && !transform::is_plain_number(&body[..end]) {
        end -= 1;
    }
    if end == 0 {
        return None;
    }
    let span = if signed { &rest[..end + 1] } else { &rest[..end] };
    span.parse().ok()
}
