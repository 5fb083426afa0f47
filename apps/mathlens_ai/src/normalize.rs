//! Recovery of expression records from free-form model text.
//!
//! The model is told to answer with a raw JSON list, but it regularly wraps the
//! list in markdown fences, uses Python-style single quotes or `True`/`False`,
//! or leaves a trailing comma. One direct parse is attempted first; only if that
//! fails is the text cleaned up and parsed again. Anything that still does not
//! parse yields no records.
//!
//! Re-quoting is a heuristic. An apostrophe inside a *single*-quoted string
//! (`'can't'`) closes the string early and the reply is dropped.

use serde_json::Value;
use tracing::{debug, warn};

use crate::serializers::mathlens_calculate::ExpressionRecord;

pub fn normalize_response(raw: &str) -> Vec<ExpressionRecord> {
    let raw = raw.trim();
    debug!(raw = %raw, "normalizing model reply");

    let parsed = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(first) => {
            let cleaned = clean(raw);
            debug!(cleaned = %cleaned, error = %first, "direct parse failed, retrying cleaned text");
            match serde_json::from_str::<Value>(&cleaned) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "model reply is not parseable, returning no records");
                    return Vec::new();
                }
            }
        }
    };

    records_from_value(parsed)
}

fn records_from_value(value: Value) -> Vec<ExpressionRecord> {
    let items = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        other => {
            warn!(reply = %other, "model reply is not a list of records");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let shown = item.to_string();
            let record = ExpressionRecord::from_value(item);
            if record.is_none() {
                warn!(index, item = %shown, "skipping malformed record");
            }
            record
        })
        .collect()
}

/// Fence stripping, prose trimming and re-quoting, in that order.
pub(crate) fn clean(raw: &str) -> String {
    requote(outermost_span(strip_fences(raw)))
}

fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        // language tag, if any: ```json, ```python, ```JSON
        s = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    }
    s = s.trim();
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Cut leading/trailing prose down to the outermost `[...]` or `{...}`.
fn outermost_span(text: &str) -> &str {
    let Some(start) = text.find(&['[', '{'][..]) else {
        return text;
    };
    let close = if text[start..].starts_with('[') { ']' } else { '}' };
    match text.rfind(close) {
        Some(end) if end > start => &text[start..=end],
        _ => text,
    }
}

fn requote(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => i = copy_double_quoted(&chars, i, &mut out),
            '\'' => i = convert_single_quoted(&chars, i, &mut out),
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    out.push(',');
                }
                i += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Copies a `"..."` string verbatim; returns the index after its closing quote.
fn copy_double_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' => {
                if let Some(&escaped) = chars.get(i) {
                    out.push(escaped);
                    i += 1;
                }
            }
            '"' => break,
            _ => {}
        }
    }
    i
}

/// Rewrites a `'...'` string as `"..."`; returns the index after its closing quote.
fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '\\' => match chars.get(i) {
                // \' is not a JSON escape
                Some('\'') => {
                    out.push('\'');
                    i += 1;
                }
                Some(&escaped) => {
                    out.push('\\');
                    out.push(escaped);
                    i += 1;
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            '\'' => {
                out.push('"');
                return i;
            }
            other => out.push(other),
        }
    }
    i
}
