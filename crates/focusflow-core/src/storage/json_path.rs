//! Dot-path access into serde_json values.
//!
//! Used by `config get/set` and `settings get/set`: the target struct is
//! converted to a `serde_json::Value`, edited in place, then deserialized back.
//! The existing value's JSON type decides how the input string is parsed.

use serde_json::Value;

use crate::error::ConfigError;

pub fn get_by_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Render a leaf for display: strings unquoted, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn set_by_path(root: &mut Value, key: &str, value: &str) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    if key.is_empty() {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let invalid = |message: String| ConfigError::InvalidValue {
                key: key.to_string(),
                message,
            };
            let new_value = match existing {
                Value::Bool(_) => Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                Value::Object(_) | Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_nested_and_missing() {
        let v = json!({"ui": {"dark": true}});
        assert_eq!(get_by_path(&v, "ui.dark"), Some(&Value::Bool(true)));
        assert!(get_by_path(&v, "ui.missing").is_none());
        assert!(get_by_path(&v, "").is_none());
    }

    #[test]
    fn set_parses_by_existing_type() {
        let mut v = json!({"a": {"flag": false, "n": 1, "s": "x"}});
        set_by_path(&mut v, "a.flag", "true").unwrap();
        set_by_path(&mut v, "a.n", "42").unwrap();
        set_by_path(&mut v, "a.s", "#FF5733").unwrap();
        assert_eq!(v, json!({"a": {"flag": true, "n": 42, "s": "#FF5733"}}));
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_type() {
        let mut v = json!({"flag": false});
        assert!(matches!(
            set_by_path(&mut v, "nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_by_path(&mut v, "flag", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn display_value_unquotes_strings() {
        assert_eq!(display_value(&json!("dark")), "dark");
        assert_eq!(display_value(&json!(25)), "25");
    }
}
