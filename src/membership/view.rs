//! Wire form of a membership snapshot.
//!
//! A view travels as a JSON object whose keys are node addresses. Values carry
//! nothing: we write `{}` for each and ignore whatever a peer sends.
use std::collections::{BTreeSet, HashMap};

use serde::de::{self, IgnoredAny};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SerializationError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MembershipView {
    members: BTreeSet<String>,
}

#[derive(Serialize)]
struct Presence {}

impl MembershipView {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.members.contains(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.members.iter()
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| SerializationError::Encode(e).into())
    }

    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| SerializationError::Decode(e).into())
    }
}

impl FromIterator<String> for MembershipView {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MembershipView {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl Serialize for MembershipView {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for address in &self.members {
            map.serialize_entry(address, &Presence {})?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MembershipView {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: HashMap<String, IgnoredAny> = HashMap::deserialize(deserializer)?;
        if raw.keys().any(|address| address.trim().is_empty()) {
            return Err(de::Error::custom("empty node address in membership view"));
        }
        Ok(raw.into_keys().collect())
    }
}
