use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub type EntityId = i64;

/// A record type managed through one REST resource.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Request payload for create and update.
    type Input: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static;

    /// Sub-path of the resource under the API base URL, e.g. `/brand`.
    const PATH: &'static str;

    /// Human readable singular name, e.g. `Brand`.
    const NAME: &'static str;

    fn id(&self) -> EntityId;

    /// Payload that would recreate this record. Used to prefill edit forms.
    fn to_input(&self) -> Self::Input;
}

/// Embedded reference to a related record (`{ "id": 1, "name": "Audi" }`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NamedRef {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}
