//! Value extraction from Attio attribute values.
//!
//! Attio returns every attribute as an array of typed value objects whose
//! shape depends on the attribute type (`text`, `select`, `status`,
//! `personal-name`, `email-address`, `domain`, `currency`, ...). The
//! functions here flatten any of those shapes, or a plain scalar, into a
//! single string or number. They are total: malformed input yields `None`.

use serde_json::{Map, Value};

/// Nesting beyond this depth is treated as having no value.
const MAX_DEPTH: usize = 8;

/// Keys whose nested `title` is the display value (select options, statuses).
const TAGGED_KEYS: [&str; 2] = ["option", "status"];

/// Generic keys, in priority order.
const PRIORITY_KEYS: [&str; 4] = ["value", "name", "title", "label"];

/// Attribute-type specific keys, consulted after the generic ones.
const ATTRIBUTE_KEYS: [&str; 5] = [
    "full_name",
    "email_address",
    "domain",
    "currency_value",
    "original_url",
];

/// Keys that carry a numeric amount, in priority order.
const AMOUNT_KEYS: [&str; 3] = ["currency_value", "value", "amount"];

/// Extract the first non-empty scalar from a JSON value.
///
/// Priority inside an object is: tagged option/status title, then `value`,
/// `name`, `title`, `label`, then the attribute-specific keys. Arrays yield
/// their first element that extracts to something.
///
/// ```
/// use attio_apollo_sync::mapping::extract_value;
/// use serde_json::json;
///
/// assert_eq!(extract_value(&json!([{ "option": { "title": "VP Sales" } }])).as_deref(), Some("VP Sales"));
/// assert_eq!(extract_value(&json!([{ "value": "Acme" }])).as_deref(), Some("Acme"));
/// assert_eq!(extract_value(&json!("5551234")).as_deref(), Some("5551234"));
/// assert_eq!(extract_value(&json!(null)), None);
/// ```
pub fn extract_value(value: &Value) -> Option<String> {
    extract_at_depth(value, 0)
}

fn extract_at_depth(value: &Value, depth: usize) -> Option<String> {
    if depth > MAX_DEPTH {
        return None;
    }

    match value {
        Value::Null => None,
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| extract_at_depth(item, depth + 1)),
        Value::Object(map) => extract_from_object(map, depth),
    }
}

fn extract_from_object(map: &Map<String, Value>, depth: usize) -> Option<String> {
    let tagged = TAGGED_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|tag| tagged_title(tag, depth));
    if tagged.is_some() {
        return tagged;
    }

    PRIORITY_KEYS
        .iter()
        .chain(ATTRIBUTE_KEYS.iter())
        .filter_map(|key| map.get(*key))
        .find_map(|candidate| extract_at_depth(candidate, depth + 1))
}

/// `{"option": {"title": ..}}` on reads, `{"option": ".."}` on some writes.
fn tagged_title(tag: &Value, depth: usize) -> Option<String> {
    match tag {
        Value::Object(inner) => inner
            .get("title")
            .and_then(|title| extract_at_depth(title, depth + 1)),
        Value::String(s) => non_empty(s),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract a numeric amount, e.g. a deal value.
///
/// Strings are parsed after dropping currency symbols, thousands separators
/// and whitespace, so `"$1,250.50"` yields `1250.5`. Strings that are not
/// plain numbers after that (`"3.5k"`, `"1.250,50"`) yield `None`.
pub fn extract_number(value: &Value) -> Option<f64> {
    number_at_depth(value, 0)
}

fn number_at_depth(value: &Value, depth: usize) -> Option<f64> {
    if depth > MAX_DEPTH {
        return None;
    }

    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_amount(s),
        Value::Array(items) => items
            .iter()
            .find_map(|item| number_at_depth(item, depth + 1)),
        Value::Object(map) => AMOUNT_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|candidate| number_at_depth(candidate, depth + 1))
            .or_else(|| extract_from_object(map, depth).and_then(|s| parse_amount(&s))),
        _ => None,
    }
}

const CURRENCY_SYMBOLS: [char; 6] = ['$', '€', '£', '¥', '₹', '₩'];

/// Parse an amount string. Currency symbols and whitespace are dropped and
/// `,` is accepted only as a thousands separator in the integer part;
/// anything else (suffixes, decimal commas) yields `None`.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let plain = if cleaned.contains(',') {
        strip_thousands_separators(&cleaned)?
    } else {
        cleaned
    };
    if !plain.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    plain.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `"-1,250,000.5"` -> `"-1250000.5"`; `None` if the commas are not
/// three-digit groupings of the integer part.
fn strip_thousands_separators(s: &str) -> Option<String> {
    let (integer, fraction) = match s.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (s, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let digits = integer.strip_prefix('-').unwrap_or(integer);
    let mut groups = digits.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let mut out = integer.replace(',', "");
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}

/// Extract the referenced record id from a record-reference attribute.
pub fn extract_record_reference(value: &Value) -> Option<String> {
    extract_key(value, "target_record_id")
}

/// Extract `key` from the first value object that carries it.
///
/// Used for multi-part attribute types such as `personal-name`, where the
/// generic priority order would only ever surface `full_name`.
pub fn extract_key(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Array(items) => items.iter().find_map(|item| extract_key(item, key)),
        Value::Object(map) => map.get(key).and_then(extract_value),
        _ => None,
    }
}

/// Look up an attribute slug in a record's values and extract it.
pub fn extract_attribute(values: &Map<String, Value>, slug: &str) -> Option<String> {
    values.get(slug).and_then(extract_value)
}

/// Return the first of `slugs` that yields a value.
pub fn extract_first(values: &Map<String, Value>, slugs: &[&str]) -> Option<String> {
    slugs
        .iter()
        .find_map(|slug| extract_attribute(values, slug))
}
