//! Math-mode-aware label and text handling.
//!
//! Source labels freely mix plain text with `$...$` math spans. A math span
//! is opaque: nothing inside it may be split on, and a backslash escapes the
//! following character on either side of the delimiter, so `\$` never
//! toggles math mode. The splitter is a two-state scanner rather than one
//! composite pattern.

use crate::options;
use crate::scene::TextBlock;

/// Split label text into alternating non-math/math spans. Math spans keep
/// their `$` delimiters. A span that is just the `\\` line-break command is
/// rewritten to a line feed.
pub(crate) fn split_mixed_math(text: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut current = String::new();
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
            '$' if in_math => {
                current.push('$');
                spans.push(std::mem::take(&mut current));
                in_math = false;
            }
            '$' => {
                if !current.is_empty() {
                    spans.push(std::mem::take(&mut current));
                }
                current.push('$');
                in_math = true;
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        spans.push(current);
    }
    spans
        .into_iter()
        .map(|span| if span.trim() == "\\\\" { "\n".to_string() } else { span })
        .collect()
}

/// Split a leading `\command` off a span, returning the command name and the
/// remainder with leading whitespace dropped. `None` when the span does not
/// begin with a backslash followed by letters.
pub(crate) fn leading_command(span: &str) -> Option<(&str, &str)> {
    let rest = span.strip_prefix('\\')?;
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some((&rest[..end], rest[end..].trim_start()))
}

/// First `$`-to-last-`$` span of `text`, delimiters stripped.
pub(crate) fn math_span(text: &str) -> Option<String> {
    let first = text.find('$')?;
    let last = text.rfind('$')?;
    (last > first).then(|| text[first + 1..last].to_string())
}

/// Extract label text from `l={...}` or `l_={...}` options.
///
/// Returns `(other_side, text)`: `other_side` is true for the `l_` spelling.
/// A single pair of outermost `$` delimiters is removed when the remaining
/// `$` signs stay balanced. Variants like `l^=` are not handled.
pub(crate) fn extract_label(option: &str) -> Option<(bool, Option<String>)> {
    let (other_side, rest) = if let Some(rest) = option.strip_prefix("l_=") {
        (true, rest)
    } else if let Some(rest) = option.strip_prefix("l=") {
        (false, rest)
    } else {
        return None;
    };
    let rest = rest.trim();
    let Some(body) = rest
        .strip_prefix('{')
        .and_then(|r| r.strip_suffix('}'))
    else {
        return Some((other_side, None));
    };
    let out = body.trim();
    let stripped = out
        .strip_prefix('$')
        .and_then(|r| r.strip_suffix('$'))
        .filter(|inner| inner.matches('$').count() % 2 == 0)
        .unwrap_or(out);
    Some((other_side, Some(stripped.to_string())))
}

/// Parse a shape's text content into a [`TextBlock`]: optional
/// `\textcolor{rgb,255:...}{...}` color, optional leading font-size command,
/// math-aware span rejoin.
pub(crate) fn parse_text_block(token: &str) -> TextBlock {
    let mut block = TextBlock::default();
    let mut token = token.to_string();

    if let Some(at) = token.find("\\textcolor{") {
        let rest = &token[at + "\\textcolor{".len()..];
        if let Some(close) = rest.find('}') {
            if let Some((r, g, b)) = options::rgb_triple(&rest[..close]) {
                block.color = Some(format!("rgb({r},{g},{b})"));
            }
            let mut remainder = rest[close + 1..].to_string();
            if remainder.starts_with('{') && remainder.ends_with('}') && remainder.len() >= 2 {
                remainder = remainder[1..remainder.len() - 1].to_string();
            }
            token = remainder;
        }
    }

    let mut spans = split_mixed_math(&token);
    let command = spans
        .first()
        .and_then(|s| leading_command(s).map(|(c, r)| (c.to_string(), r.to_string())));
    if let Some((command, remainder)) = command {
        block.font_size = Some(command);
        spans[0] = remainder;
    }
    block.text = Some(spans.join(" "));
    block
}
