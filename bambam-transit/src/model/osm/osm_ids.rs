use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OsmNodeId(pub i64);

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OsmWayId(pub i64);

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OsmRelationId(pub i64);

/// the three OSM element kinds a relation member can reference.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OsmGeoType {
    Node,
    Way,
    Relation,
}

/// identifies an OSM element across element kinds, since ids are only
/// unique per kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash)]
pub struct OsmGeoKey {
    pub geo_type: OsmGeoType,
    pub id: i64,
}

impl OsmGeoKey {
    pub fn new(geo_type: OsmGeoType, id: i64) -> OsmGeoKey {
        OsmGeoKey { geo_type, id }
    }
}

impl From<OsmNodeId> for OsmGeoKey {
    fn from(value: OsmNodeId) -> Self {
        OsmGeoKey::new(OsmGeoType::Node, value.0)
    }
}

impl From<OsmWayId> for OsmGeoKey {
    fn from(value: OsmWayId) -> Self {
        OsmGeoKey::new(OsmGeoType::Way, value.0)
    }
}

impl From<OsmRelationId> for OsmGeoKey {
    fn from(value: OsmRelationId) -> Self {
        OsmGeoKey::new(OsmGeoType::Relation, value.0)
    }
}

impl From<osmpbf::elements::RelMemberType> for OsmGeoType {
    fn from(value: osmpbf::elements::RelMemberType) -> Self {
        match value {
            osmpbf::elements::RelMemberType::Node => OsmGeoType::Node,
            osmpbf::elements::RelMemberType::Way => OsmGeoType::Way,
            osmpbf::elements::RelMemberType::Relation => OsmGeoType::Relation,
        }
    }
}

impl Display for OsmNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for OsmWayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for OsmRelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for OsmGeoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsmGeoType::Node => write!(f, "node"),
            OsmGeoType::Way => write!(f, "way"),
            OsmGeoType::Relation => write!(f, "relation"),
        }
    }
}

impl Display for OsmGeoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.geo_type, self.id)
    }
}
