pub mod application;
pub mod ranking;
pub mod user;
pub mod video_session;

pub use application::*;
pub use ranking::*;
pub use user::*;
pub use video_session::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Id de uma linha exatamente como veio do banco (uuid em string ou bigint em número).
/// Serializa de volta na mesma forma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowId(serde_json::Value);

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            value @ (serde_json::Value::String(_) | serde_json::Value::Number(_)) => Ok(RowId(value)),
            _ => Err(serde::de::Error::custom("Expected string or number id")),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId(serde_json::Value::String(id.to_string()))
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        RowId(serde_json::Value::from(id))
    }
}

/// PostgREST devolve ids como uuid (string) ou bigint (número) dependendo da tabela
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("Expected string or number id")),
    }
}

pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom("Expected string or number id")),
    }
}
