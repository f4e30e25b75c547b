use anyhow::Result;
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use strum::{EnumMessage, IntoEnumIterator};

/// Contract for the tagged configuration enums (`{"type": .., "params": ..}`).
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    /// JSON Schema for the whole tagged enum.
    fn schema() -> Schema;

    /// Heading used when listing the available kinds.
    fn label() -> &'static str;

    /// Default `params` JSON for a given kind.
    fn default_params(kind: Self::Kind) -> Value;

    /// Builds the typed enum from kind + params.
    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        let v = json!({ "type": key, "params": params });
        Ok(serde_json::from_value(v)?)
    }

    /// Every kind with its default configuration.
    fn defaults() -> Result<Vec<Self>> {
        Self::Kind::iter()
            .map(|k| Self::from_parts(k, Self::default_params(k)))
            .collect()
    }
}

/// Serializes a parameter struct, `null` if that fails.
pub(crate) fn params_of<T: Serialize>(params: T) -> Value {
    serde_json::to_value(params).unwrap_or(Value::Null)
}
