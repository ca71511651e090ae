//! Storage encoding for artist genres.
//!
//! Artists keep their genres in a single text column using array-literal
//! syntax: `{Jazz,Rock}`. Labels that contain a delimiter, a quote, a
//! backslash or surrounding whitespace are double-quoted with `\` escapes,
//! e.g. `{"Rock, Pop",Jazz}`.
//!
//! [`decode`] also accepts square brackets as the wrapping pair and bare
//! unwrapped lists, so rows written by hand still read back.

/// Encode a list of labels into the stored column value.
pub fn encode<S: AsRef<str>>(labels: &[S]) -> String {
    let mut out = String::from("{");
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let label = label.as_ref();
        if needs_quoting(label) {
            out.push('"');
            for c in label.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        } else {
            out.push_str(label);
        }
    }
    out.push('}');
    out
}

/// Decode a stored column value back into labels.
///
/// Unquoted items are trimmed and empty items dropped, so `{}` and `""`
/// both decode to no genres.
pub fn decode(raw: &str) -> Vec<String> {
    let inner = strip_wrapping(raw.trim());

    let mut labels = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '"' => {
                if !in_quotes && !quoted && current.trim().is_empty() {
                    current.clear();
                }
                in_quotes = !in_quotes;
                quoted = true;
            }
            ',' if !in_quotes => {
                push_label(&mut labels, &mut current, quoted);
                quoted = false;
            }
            // padding between a closing quote and the next comma
            _ if quoted && !in_quotes && c.is_whitespace() => {}
            _ => current.push(c),
        }
    }
    push_label(&mut labels, &mut current, quoted);

    labels
}

fn strip_wrapping(s: &str) -> &str {
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let Some(rest) = s.strip_prefix(open) {
            return rest.strip_suffix(close).unwrap_or(rest);
        }
    }
    s
}

fn push_label(labels: &mut Vec<String>, current: &mut String, quoted: bool) {
    let label = std::mem::take(current);
    if quoted {
        labels.push(label);
    } else {
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            labels.push(trimmed.to_string());
        }
    }
}

fn needs_quoting(label: &str) -> bool {
    label.is_empty()
        || label.trim() != label
        || label
            .chars()
            .any(|c| matches!(c, ',' | '"' | '\\' | '{' | '}' | '[' | ']'))
}
