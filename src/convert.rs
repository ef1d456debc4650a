use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::value::Value;

/// Bridge to the serde ecosystem. Parsed [`Value`] strings keep their
/// escape sequences verbatim, so conversion escapes on the way in and
/// unescapes on the way out.

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(character),
        }
    }
    escaped
}

fn unescape(stored: &str) -> String {
    let mut raw = String::with_capacity(stored.len());
    let mut characters = stored.chars();
    while let Some(character) = characters.next() {
        if character != '\\' {
            raw.push(character);
            continue;
        }
        match characters.next() {
            Some('"') => raw.push('"'),
            Some('\\') => raw.push('\\'),
            Some('/') => raw.push('/'),
            Some('b') => raw.push('\u{8}'),
            Some('f') => raw.push('\u{c}'),
            Some('n') => raw.push('\n'),
            Some('r') => raw.push('\r'),
            Some('t') => raw.push('\t'),
            Some(other) => {
                raw.push('\\');
                raw.push(other);
            }
            None => raw.push('\\'),
        }
    }
    raw
}

impl From<&serde_json::Value> for Value {
    fn from(element: &serde_json::Value) -> Self {
        match element {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(boolean) => Value::Bool(*boolean),
            serde_json::Value::Number(number) => match number.as_f64() {
                Some(number) => Value::Number(number),
                None => Value::Null,
            },
            serde_json::Value::String(string) => Value::String(escape(string)),
            serde_json::Value::Array(elements) => {
                Value::Array(elements.iter().map(Value::from).collect())
            }
            serde_json::Value::Object(members) => Value::Object(
                members
                    .iter()
                    .map(|(name, member)| (escape(name), Value::from(member)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(element: serde_json::Value) -> Self {
        Value::from(&element)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(boolean) => serde_json::Value::Bool(*boolean),
            Value::Number(number) => match serde_json::Number::from_f64(*number) {
                Some(number) => serde_json::Value::Number(number),
                None => serde_json::Value::Null,
            },
            Value::String(string) => serde_json::Value::String(unescape(string)),
            Value::Array(elements) => {
                serde_json::Value::Array(elements.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(members) => serde_json::Value::Object(
                members
                    .iter()
                    .map(|(name, member)| (unescape(name), serde_json::Value::from(member)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        serde_json::Value::from(&value)
    }
}

impl Value {
    /// Build a [`Value`] from anything serde can serialize.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Value, Error> {
        let element = serde_json::to_value(value)?;
        Ok(Value::from(element))
    }

    /// Deserialize this value into a concrete Rust type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let element = serde_json::Value::from(self);
        Ok(serde_json::from_value(element)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Config {
        name: String,
        threshold: f64,
        enabled: bool,
        tags: Vec<String>,
    }

    #[test]
    fn serialize_round_trip() {
        let config = Config {
            name: "probe".to_string(),
            threshold: 0.5,
            enabled: true,
            tags: vec!["a".to_string(), "b".to_string()],
        };

        let value = Value::from_serialize(&config).unwrap();
        assert_eq!(value["name"].as_str(), Some("probe"));
        assert_eq!(value["tags"].size(), 2);

        let back: Config = value.deserialize_into().unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn strings_are_escaped_on_entry() {
        let value = Value::from_serialize(&"line\nbreak").unwrap();
        assert_eq!(value.as_str(), Some("line\\nbreak"));
        assert_eq!(value.dump(0, ' '), "\"line\\nbreak\"");

        let back: String = value.deserialize_into().unwrap();
        assert_eq!(back, "line\nbreak");
    }

    #[test]
    fn parsed_document_reaches_serde_unescaped() {
        let value = Value::parse(r#"{"text": "a\tb"}"#);
        let json = serde_json::Value::from(&value);
        assert_eq!(json["text"], serde_json::json!("a\tb"));
    }
}
