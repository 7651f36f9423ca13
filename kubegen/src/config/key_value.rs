use std::str::FromStr;

use snafu::{OptionExt, Snafu, ensure};

/// A `KEY=VALUE` pair given on the command line. The value may be empty and
/// may itself contain `=`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyValue {
    pub key: String,

    pub value: String,
}

impl KeyValue {
    /// Interprets the value as JSON, falling back to a plain string.
    ///
    /// `replicas=3` yields the number 3, `tags=["a","b"]` an array and
    /// `greeting=hello` the string `"hello"`.
    pub fn json_value(&self) -> serde_json::Value {
        serde_json::from_str(&self.value)
            .unwrap_or_else(|_| serde_json::Value::String(self.value.clone()))
    }
}

impl FromStr for KeyValue {
    type Err = KeyValueError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (key, value) = input.split_once('=').context(MissingSeparatorSnafu { input })?;
        let key = key.trim();
        ensure!(!key.is_empty(), EmptyKeySnafu { input });
        Ok(Self { key: key.to_string(), value: value.to_string() })
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum KeyValueError {
    #[snafu(display("Invalid format: expected 'KEY=VALUE', got '{input}'"))]
    MissingSeparator { input: String },

    #[snafu(display("Invalid format: key is empty in '{input}'"))]
    EmptyKey { input: String },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_key_value() {
        let kv: KeyValue = "app=cheese".parse().unwrap();
        assert_eq!(kv, KeyValue { key: "app".to_string(), value: "cheese".to_string() });

        let kv: KeyValue = "JAVA_OPTS=-Dfoo=bar".parse().unwrap();
        assert_eq!(kv.key, "JAVA_OPTS");
        assert_eq!(kv.value, "-Dfoo=bar");

        let kv: KeyValue = "EMPTY=".parse().unwrap();
        assert_eq!(kv.value, "");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "app".parse::<KeyValue>().unwrap_err(),
            KeyValueError::MissingSeparator { .. }
        ));
        assert!(matches!("=x".parse::<KeyValue>().unwrap_err(), KeyValueError::EmptyKey { .. }));
    }

    #[test]
    fn test_json_value() {
        let value = |input: &str| input.parse::<KeyValue>().unwrap().json_value();
        assert_eq!(value("replicas=3"), json!(3));
        assert_eq!(value("tags=[\"a\",\"b\"]"), json!(["a", "b"]));
        assert_eq!(value("enabled=true"), json!(true));
        assert_eq!(value("greeting=hello"), json!("hello"));
        assert_eq!(value("empty="), json!(""));
    }
}
