/// Argument list parser
///
/// Turns `INPUT` into an ordered list of [`ParsedArgument`]s. Parsing never
/// fails: anything that is not a recognizable number, quoted string or
/// homogeneous array is kept as a string.
use super::ParsedArgument;

/// Parse a raw argument list. Empty input yields no arguments.
pub fn parse(raw: &str) -> Vec<ParsedArgument> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(raw).into_iter().map(parse_segment).collect()
}

/// Split on commas that sit outside `[...]` and `"..."`.
pub fn split_top_level(raw: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '[' if !in_quote => depth += 1,
            ']' if !in_quote => depth = depth.saturating_sub(1),
            ',' if !in_quote && depth == 0 => {
                segments.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&raw[start..]);
    segments
}

fn parse_segment(segment: &str) -> ParsedArgument {
    let value = strip_name(segment.trim());

    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        if let Some(array) = parse_array(&value[1..value.len() - 1]) {
            return array;
        }
    }

    if let Some(unquoted) = unquote(value) {
        return ParsedArgument::Str(unquoted.to_string());
    }

    let number = if value.contains('.') {
        value.parse::<f64>().ok().map(ParsedArgument::Float)
    } else {
        value.parse::<i64>().ok().map(ParsedArgument::Integer)
    };
    number.unwrap_or_else(|| ParsedArgument::Str(value.to_string()))
}

/// Drop a leading `name =` when the text before the first `=` is an identifier.
fn strip_name(segment: &str) -> &str {
    match segment.split_once('=') {
        Some((name, value)) if is_identifier(name.trim()) => value.trim(),
        _ => segment,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn unquote(value: &str) -> Option<&str> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

fn parse_array(inner: &str) -> Option<ParsedArgument> {
    if inner.trim().is_empty() {
        return Some(ParsedArgument::IntegerArray(Vec::new()));
    }
    let elements: Vec<&str> = split_top_level(inner).into_iter().map(str::trim).collect();

    let integers: Option<Vec<i64>> = elements.iter().map(|e| e.parse().ok()).collect();
    if let Some(integers) = integers {
        return Some(ParsedArgument::IntegerArray(integers));
    }

    let nested = |e: &&str| e.is_empty() || e.contains('[') || e.contains(']');
    if elements.iter().any(nested) {
        return None;
    }
    let strings = elements
        .iter()
        .map(|&e| unquote(e).unwrap_or(e).to_string())
        .collect();
    Some(ParsedArgument::StringArray(strings))
}
