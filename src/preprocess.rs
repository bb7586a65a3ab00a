//! Comment stripping and drawing-environment isolation.

/// Strip comments, then return the body of the first drawing environment
/// with a matching end marker. `None` is the trigger for the error-record
/// document shape.
pub(crate) fn isolate(source: &str) -> Option<String> {
    let stripped = strip_comments(source);
    drawing_block(&stripped).map(str::to_string)
}

/// Remove same-line trailing comments: an unescaped `%` to end of line.
/// `\%` is literal text, not a comment start.
pub(crate) fn strip_comments(source: &str) -> String {
    source
        .lines()
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (at, &byte) in bytes.iter().enumerate() {
        if byte == b'%' && (at == 0 || bytes[at - 1] != b'\\') {
            return &line[..at];
        }
    }
    line
}

/// The two recognized environment spellings are equivalent; opening and
/// closing markers must match. The earliest opening with a matching close
/// wins.
fn drawing_block(source: &str) -> Option<&str> {
    let mut begins: Vec<(usize, &str)> = Vec::new();
    for env in ["circuitikz", "tikzpicture"] {
        let marker = format!("\\begin{{{env}}}");
        let mut from = 0;
        while let Some(found) = source[from..].find(&marker) {
            begins.push((from + found, env));
            from += found + marker.len();
        }
    }
    begins.sort_by_key(|(at, _)| *at);
    for (at, env) in begins {
        let start = at + "\\begin{}".len() + env.len();
        let end_marker = format!("\\end{{{env}}}");
        if let Some(close) = source[start..].find(&end_marker) {
            return Some(&source[start..start + close]);
        }
    }
    None
}
