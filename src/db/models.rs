//! Restaurant document model and identifier type.
//!
//! A restaurant record has two fields the application actually inspects
//! (`name` and `borough`) plus an open-ended set of descriptive fields
//! (cuisine, address, grades, ...) that pass through the system opaquely.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::repository::RepositoryError;

/// Opaque, storage-assigned restaurant identifier.
///
/// Wraps a BSON ObjectId and travels as a 24-character hex string in JSON.
/// Parsing is the single place malformed identifiers are detected; every
/// failure maps to [`RepositoryError::InvalidId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestaurantId(ObjectId);

impl RestaurantId {
    /// Generate a fresh identifier. Used by storage backends only.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for RestaurantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for RestaurantId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for RestaurantId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| RepositoryError::invalid_id(s))
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

// Serialized as the plain hex string, not extended-JSON `{"$oid": ...}`,
// so API responses carry `"_id": "5eb3d668b31de5d588f42930"`.
impl Serialize for RestaurantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for RestaurantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A restaurant record.
///
/// `name` and `borough` are the only fields the application interprets;
/// everything else lives in `extra` and round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<RestaurantId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub borough: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Restaurant {
    /// Build a record from a raw client field map.
    ///
    /// The identifier is never client-supplied: any `_id` in the body is
    /// dropped. String-typed `name`/`borough` values are lifted into the
    /// typed fields; non-string values stay in `extra`.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        fields.remove("_id");
        let name = take_string(&mut fields, "name");
        let borough = take_string(&mut fields, "borough");
        Self {
            id: None,
            name,
            borough,
            extra: fields,
        }
    }

    /// Apply a partial update: fields present in `changes` are overwritten,
    /// everything else retains its stored value. `_id` is immutable and
    /// ignored if supplied.
    ///
    /// A `name`/`borough` value that is not a string demotes the field to
    /// `extra`, so every key has exactly one representation afterwards.
    pub fn apply_update(&mut self, changes: &Map<String, Value>) {
        for (key, value) in changes {
            match key.as_str() {
                "_id" => {}
                "name" => {
                    self.name = set_or_demote(&mut self.extra, "name", value);
                }
                "borough" => {
                    self.borough = set_or_demote(&mut self.extra, "borough", value);
                }
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

fn set_or_demote(
    extra: &mut Map<String, Value>,
    key: &str,
    value: &Value,
) -> Option<String> {
    match value {
        Value::String(s) => {
            extra.remove(key);
            Some(s.clone())
        }
        other => {
            extra.insert(key.to_string(), other.clone());
            None
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(_)) => match fields.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}
