//! Deserialization with the failing JSON path in the error text.
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses `src` to a [`Value`] first, then hands it to [`from_value_with_path`].
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let value = serde_json::from_str::<Value>(src).map_err(|err| format!("malformed JSON → {err}"))?;
    from_value_with_path(value)
}

pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, String> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        format!("at JSON path {path} → {}", err.into_inner())
    })
}
