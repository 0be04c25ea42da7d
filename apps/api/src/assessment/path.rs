//! Path resolver: reads a nested value out of a raw assessment record.
//!
//! Supported forms:
//! - dotted traversal: `vitalsMap.vitals.heart_rate`
//! - array index on a segment: `setList[0].time`
//! - one array filter: `exercises[?(@.id==235)].setList[0].time`
//!
//! This is a fixed subset, not a JSONPath evaluator: no wildcards, no
//! nested or repeated filters.

use serde_json::Value;

const FILTER_OPEN: &str = "[?(@.";
const FILTER_CLOSE: &str = ")]";

/// Resolves `path` against `record`.
///
/// Returns `None` when the path is empty, the record is null, any segment is
/// absent, or the resolved value is itself JSON `null`.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() || record.is_null() {
        return None;
    }

    let resolved = match path.find(FILTER_OPEN) {
        Some(idx) => resolve_filtered(record, &path[..idx], &path[idx + FILTER_OPEN.len()..])?,
        None => walk(record, path)?,
    };

    (!resolved.is_null()).then_some(resolved)
}

/// Owned variant used when assembling reports: absent values become `Value::Null`.
pub fn resolve_path_or_null(record: &Value, path: &str) -> Value {
    resolve_path(record, path).cloned().unwrap_or(Value::Null)
}

/// Handles `array_path[?(@.field==literal)].remaining`. `filter_tail` is
/// everything after the `[?(@.` opener.
fn resolve_filtered<'a>(record: &'a Value, array_path: &str, filter_tail: &str) -> Option<&'a Value> {
    if array_path.is_empty() {
        return None;
    }

    let close = filter_tail.find(FILTER_CLOSE)?;
    let (field, literal) = filter_tail[..close].split_once("==")?;
    let field = field.trim();
    let literal = literal.trim().trim_matches(|c: char| c == '\'' || c == '"');
    if field.is_empty() {
        return None;
    }

    let remaining = &filter_tail[close + FILTER_CLOSE.len()..];
    let remaining = match remaining {
        "" => None,
        rest => Some(rest.strip_prefix('.')?),
    };

    let items = walk(record, array_path)?.as_array()?;
    let item = items
        .iter()
        .find(|item| item.get(field).is_some_and(|v| loosely_equals(v, literal)))?;

    match remaining {
        Some(rest) => walk(item, rest),
        None => Some(item),
    }
}

/// Dot traversal. Each segment is `name` optionally followed by `[N]` indices.
fn walk<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in path.split('.') {
        current = step(current, segment)?;
    }
    Some(current)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    let (name, mut indices) = match segment.find('[') {
        Some(idx) => (&segment[..idx], &segment[idx..]),
        None => (segment, ""),
    };

    let mut value = if name.is_empty() {
        if indices.is_empty() {
            return None;
        }
        current
    } else {
        current.as_object()?.get(name)?
    };

    while !indices.is_empty() {
        let inner = indices.strip_prefix('[')?;
        let close = inner.find(']')?;
        let index: usize = inner[..close].trim().parse().ok()?;
        value = value.as_array()?.get(index)?;
        indices = &inner[close + 1..];
    }

    Some(value)
}

/// Loose comparison between a record value and a filter literal:
/// numbers compare numerically, strings textually, bools by name.
fn loosely_equals(candidate: &Value, literal: &str) -> bool {
    match candidate {
        Value::Number(n) => match (n.as_f64(), literal.parse::<f64>()) {
            (Some(lhs), Ok(rhs)) => lhs == rhs,
            _ => false,
        },
        Value::String(s) => s == literal,
        Value::Bool(b) => literal.parse::<bool>() == Ok(*b),
        _ => false,
    }
}
