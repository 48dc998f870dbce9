//! Attribute value coercion and attribute name conversion.

use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("Invalid numeric regex"));

static DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([a-z])").expect("Invalid dash regex"));

/// Convert a raw attribute string into a typed parameter value.
///
/// Never fails: anything that cannot be coerced comes back as the original string.
pub fn parse_attr_value(raw: &str) -> Value {
    if raw.is_empty() {
        // presence-only flag
        return Value::Bool(true);
    }

    let trimmed = raw.trim();
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if NUMERIC_RE.is_match(trimmed) {
        if let Some(number) = parse_number(trimmed) {
            return Value::Number(number);
        }
    }

    if is_json_shaped(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return value;
        }
    }

    Value::String(raw.to_string())
}

/// Parse a string of digits with an optional fraction.
///
/// Integers that fit stay integers so `"600"` compares equal to `600`.
pub(crate) fn parse_number(s: &str) -> Option<Number> {
    if !s.contains('.') {
        if let Ok(n) = s.parse::<u64>() {
            return Some(Number::from(n));
        }
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn is_json_shaped(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}

/// Convert a dash-separated attribute name to a camelCase parameter name.
pub fn dash_to_camel(name: &str) -> String {
    DASH_RE
        .replace_all(name, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Convert kebab-case to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_value_is_presence_flag() {
        assert_eq!(parse_attr_value(""), json!(true));
    }

    #[test]
    fn parses_booleans() {
        assert_eq!(parse_attr_value("true"), json!(true));
        assert_eq!(parse_attr_value(" false "), json!(false));
        assert_eq!(parse_attr_value("True"), json!("True"));
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_attr_value("600"), json!(600));
        assert_eq!(parse_attr_value("12.5"), json!(12.5));
        assert_eq!(parse_attr_value(" 42 "), json!(42));
    }

    #[test]
    fn leaves_non_matching_numbers_as_strings() {
        assert_eq!(parse_attr_value("-1"), json!("-1"));
        assert_eq!(parse_attr_value("1e3"), json!("1e3"));
        assert_eq!(parse_attr_value("12px"), json!("12px"));
    }

    #[test]
    fn parses_json_structures() {
        assert_eq!(
            parse_attr_value(r#"[{"name":"a"}]"#),
            json!([{ "name": "a" }])
        );
        assert_eq!(
            parse_attr_value(r#"{"top": 10, "left": 20}"#),
            json!({ "top": 10, "left": 20 })
        );
    }

    #[test]
    fn malformed_json_falls_back_to_raw_string() {
        assert_eq!(parse_attr_value("[1, 2"), json!("[1, 2"));
        assert_eq!(parse_attr_value("{not json}"), json!("{not json}"));
        assert_eq!(parse_attr_value(" [oops] "), json!(" [oops] "));
    }

    #[test]
    fn coercion_is_deterministic() {
        for raw in ["", "true", "7", "[1,2]", "{x", "hello"] {
            assert_eq!(parse_attr_value(raw), parse_attr_value(raw));
        }
    }

    #[test]
    fn dash_to_camel_works() {
        assert_eq!(dash_to_camel("legend-data"), "legendData");
        assert_eq!(dash_to_camel("sub-title-position"), "subTitlePosition");
        assert_eq!(dash_to_camel("title"), "title");
    }

    #[test]
    fn to_pascal_case_works() {
        assert_eq!(to_pascal_case("pfj-chart-bullet"), "PfjChartBullet");
        assert_eq!(to_pascal_case("simple"), "Simple");
    }
}
