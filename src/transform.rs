//! Coordinate transformation from source units to output units.
//!
//! Positions scale by [`SCALE_X`]/[`SCALE_Y`] with the y axis inverted;
//! widths and heights scale by the distinct [`SCALE_SHAPE`] factor. All
//! output values round to 3 decimals exactly once, after all arithmetic,
//! and negative zero normalizes to positive zero.

use glam::DVec2;

use crate::scene::Point;

/// Horizontal position scale, calibrated against the target editor.
pub const SCALE_X: f64 = 37.795286;
/// Vertical position scale. Currently equal to [`SCALE_X`] but kept separate;
/// callers must not assume they stay equal.
pub const SCALE_Y: f64 = 37.795286;
/// Size (width/height) scale. Shapes scale differently than positions; this
/// is not reducible to the position factors.
pub const SCALE_SHAPE: f64 = 38.88379;

/// Round to 3 decimals and normalize `-0.0` to `0.0`.
pub(crate) fn clean(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Map a raw source-space coordinate pair into the output space.
pub(crate) fn to_scene(raw: DVec2) -> Point {
    Point {
        x: clean(raw.x * SCALE_X),
        y: clean(-raw.y * SCALE_Y),
    }
}

/// Scale a raw width/height value into output units.
pub(crate) fn scale_size(raw: f64) -> f64 {
    clean(raw * SCALE_SHAPE)
}

/// Parse coordinate text (parentheses already stripped) as an absolute
/// numeric pair. Anchor-relative coordinates (`N1.text`,
/// `[yshift=0.63cm]X1.north east`) return `None` and are excluded from
/// coordinate lists rather than substituted with a default.
pub(crate) fn parse_coordinate(text: &str) -> Option<DVec2> {
    let (x, y) = text.split_once(',')?;
    let (x, y) = (x.trim(), y.trim());
    if !is_plain_number(x) || !is_plain_number(y) {
        return None;
    }
    Some(DVec2::new(numeric(x), numeric(y)))
}

/// True for simple decimals of the shape `-?\d*\.?\d+`: an optional leading
/// minus, at most one dot, and a trailing digit. No exponents, no `inf`.
pub(crate) fn is_plain_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.ends_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '.' if seen_dot => return false,
            '.' => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    true
}

/// Numeric conversion with a zero fallback. The fallback silently corrupts
/// data if it ever fires, so it is logged loudly.
fn numeric(text: &str) -> f64 {
    text.parse().unwrap_or_else(|_| {
        crate::log::warn!("non-numeric coordinate component {text:?}, falling back to 0");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_and_rounds() {
        let p = to_scene(DVec2::new(3.5, 8.75));
        assert_eq!(p, Point { x: 132.284, y: -330.709 });
    }

    #[test]
    fn normalizes_negative_zero() {
        let p = to_scene(DVec2::new(0.0, 0.0));
        assert!(p.x.is_sign_positive());
        assert!(p.y.is_sign_positive());
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn rounding_is_idempotent_under_reserialization() {
        for raw in [3.5, 8.75, 9.54, -0.035, 12.648, 0.001, -7.125] {
            let once = to_scene(DVec2::new(raw, raw));
            let text = format!("{}, {}", once.x, once.y);
            // re-parsing the rounded value and re-rounding changes nothing
            let again = parse_coordinate(&text).unwrap();
            assert_eq!(clean(again.x), once.x);
            assert_eq!(clean(again.y), once.y);
        }
    }

    #[test]
    fn rejects_relative_coordinates() {
        assert!(parse_coordinate("N1.text").is_none());
        assert!(parse_coordinate("[yshift=0.63cm]my text.text").is_none());
        assert!(parse_coordinate("1, 2, 3").is_none());
        assert!(parse_coordinate("").is_none());
    }

    #[test]
    fn accepts_absolute_pairs() {
        assert_eq!(parse_coordinate("3.5, 8.75"), Some(DVec2::new(3.5, 8.75)));
        assert_eq!(parse_coordinate("-0.5,.25"), Some(DVec2::new(-0.5, 0.25)));
    }

    #[test]
    fn plain_number_shape() {
        assert!(is_plain_number("12"));
        assert!(is_plain_number("-0.5"));
        assert!(is_plain_number(".5"));
        assert!(!is_plain_number("5."));
        assert!(!is_plain_number("+5"));
        assert!(!is_plain_number("1e3"));
        assert!(!is_plain_number("1.2.3"));
    }

    #[test]
    fn size_scaling() {
        assert_eq!(scale_size(1.308), 50.86);
        assert_eq!(scale_size(-0.035), -1.361);
    }
}
