use super::{EdgeAttributes, NetworkError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// id of an interned [`EdgeAttributes`] collection. kept at 16 bits so that
/// it packs alongside the edge distance in compact storage.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct ProfileId(pub u16);

impl Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// interning table for edge attribute profiles. many edges share a handful
/// of attribute combinations, so edges reference a profile by id.
#[derive(Default, Debug, Clone)]
pub struct EdgeProfiles {
    profiles: Vec<EdgeAttributes>,
    lookup: HashMap<EdgeAttributes, ProfileId>,
}

impl EdgeProfiles {
    /// returns the id of an identical, previously interned collection, or
    /// stores this collection under the next free id.
    pub fn add(&mut self, attributes: EdgeAttributes) -> Result<ProfileId, NetworkError> {
        if let Some(id) = self.lookup.get(&attributes) {
            return Ok(*id);
        }
        let next = self.profiles.len();
        if next > u16::MAX as usize {
            return Err(NetworkError::ProfileTableFull(next));
        }
        let id = ProfileId(next as u16);
        self.profiles.push(attributes.clone());
        self.lookup.insert(attributes, id);
        Ok(id)
    }

    pub fn get(&self, id: ProfileId) -> Option<&EdgeAttributes> {
        self.profiles.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileId, &EdgeAttributes)> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(idx, attrs)| (ProfileId(idx as u16), attrs))
    }
}
