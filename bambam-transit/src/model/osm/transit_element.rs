use super::{OsmGeoKey, OsmGeoType, OsmNodeId, OsmRelationId, OsmWayId};
use geo::Coord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// a node referenced by a transit relation. identity and coordinates are
/// optional since source data may be incomplete; such nodes are skipped
/// when collecting stops.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitNode {
    pub id: Option<OsmNodeId>,
    /// x = longitude, y = latitude
    pub coordinate: Option<Coord<f32>>,
}

/// a way referenced by a transit relation. only the node sequence matters
/// here; the first and last node are the stops it connects.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitWay {
    pub id: Option<OsmWayId>,
    pub nodes: Vec<OsmNodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMember {
    pub member_type: OsmGeoType,
    pub id: i64,
    pub role: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitRelation {
    pub id: Option<OsmRelationId>,
    pub tags: HashMap<String, String>,
    pub members: Vec<RelationMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransitElement {
    Node(TransitNode),
    Way(TransitWay),
    Relation(TransitRelation),
}

impl TransitNode {
    pub fn new(id: i64, lon: f32, lat: f32) -> TransitNode {
        TransitNode {
            id: Some(OsmNodeId(id)),
            coordinate: Some(Coord { x: lon, y: lat }),
        }
    }
}

impl TransitWay {
    pub fn new(id: i64, nodes: &[i64]) -> TransitWay {
        TransitWay {
            id: Some(OsmWayId(id)),
            nodes: nodes.iter().map(|n| OsmNodeId(*n)).collect_vec(),
        }
    }

    /// the first and last node of this way, if it has any.
    pub fn endpoints(&self) -> Option<(OsmNodeId, OsmNodeId)> {
        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    }
}

impl RelationMember {
    pub fn new(member_type: OsmGeoType, id: i64, role: &str) -> RelationMember {
        RelationMember {
            member_type,
            id,
            role: String::from(role),
        }
    }

    pub fn key(&self) -> OsmGeoKey {
        OsmGeoKey::new(self.member_type, self.id)
    }
}

impl TransitRelation {
    pub const TYPE_TAG: &'static str = "type";
    pub const ROUTE_TAG: &'static str = "route";

    /// creates a `type=route` relation with the given route type.
    pub fn route(id: i64, route_type: &str, members: Vec<RelationMember>) -> TransitRelation {
        let tags = HashMap::from([
            (String::from(Self::TYPE_TAG), String::from("route")),
            (String::from(Self::ROUTE_TAG), String::from(route_type)),
        ]);
        TransitRelation {
            id: Some(OsmRelationId(id)),
            tags,
            members,
        }
    }

    /// the value of the `route` tag, if this is tagged as a `type=route` relation.
    pub fn route_type(&self) -> Option<&str> {
        match self.tags.get(Self::TYPE_TAG) {
            Some(t) if t == "route" => self.tags.get(Self::ROUTE_TAG).map(|r| r.as_str()),
            _ => None,
        }
    }

    pub fn members_of_type(&self, member_type: OsmGeoType) -> impl Iterator<Item = &RelationMember> {
        self.members
            .iter()
            .filter(move |m| m.member_type == member_type)
    }
}

impl TransitElement {
    /// key used to look this element up as a relation member. elements
    /// without an identity have no key.
    pub fn key(&self) -> Option<OsmGeoKey> {
        match self {
            TransitElement::Node(n) => n.id.map(OsmGeoKey::from),
            TransitElement::Way(w) => w.id.map(OsmGeoKey::from),
            TransitElement::Relation(r) => r.id.map(OsmGeoKey::from),
        }
    }
}

/// OSM uses 0 as a placeholder for a missing identity
fn osm_id(id: i64) -> Option<i64> {
    if id == 0 {
        None
    } else {
        Some(id)
    }
}

impl From<&osmpbf::elements::Node<'_>> for TransitNode {
    fn from(node: &osmpbf::elements::Node<'_>) -> Self {
        TransitNode {
            id: osm_id(node.id()).map(OsmNodeId),
            coordinate: Some(Coord {
                x: node.lon() as f32,
                y: node.lat() as f32,
            }),
        }
    }
}

impl From<&osmpbf::dense::DenseNode<'_>> for TransitNode {
    fn from(node: &osmpbf::dense::DenseNode<'_>) -> Self {
        TransitNode {
            id: osm_id(node.id()).map(OsmNodeId),
            coordinate: Some(Coord {
                x: node.lon() as f32,
                y: node.lat() as f32,
            }),
        }
    }
}

impl From<&osmpbf::elements::Way<'_>> for TransitWay {
    fn from(way: &osmpbf::elements::Way<'_>) -> Self {
        TransitWay {
            id: osm_id(way.id()).map(OsmWayId),
            nodes: way.refs().map(OsmNodeId).collect_vec(),
        }
    }
}

impl From<&osmpbf::elements::Relation<'_>> for TransitRelation {
    fn from(relation: &osmpbf::elements::Relation<'_>) -> Self {
        let tags = relation
            .tags()
            .map(|(k, v)| (String::from(k), String::from(v.trim())))
            .collect::<HashMap<_, _>>();
        let members = relation
            .members()
            .map(|m| {
                let role = m.role().map(String::from).unwrap_or_default();
                RelationMember {
                    member_type: OsmGeoType::from(m.member_type.clone()),
                    id: m.member_id,
                    role,
                }
            })
            .collect_vec();
        TransitRelation {
            id: osm_id(relation.id()).map(OsmRelationId),
            tags,
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_type_requires_type_route() {
        let bus = TransitRelation::route(1, "bus", vec![]);
        assert_eq!(bus.route_type(), Some("bus"));

        let mut multipolygon = bus.clone();
        multipolygon
            .tags
            .insert(String::from("type"), String::from("multipolygon"));
        assert_eq!(multipolygon.route_type(), None);

        let mut untyped = bus;
        untyped.tags.remove("route");
        assert_eq!(untyped.route_type(), None);
    }

    #[test]
    fn test_way_endpoints() {
        assert_eq!(
            TransitWay::new(1, &[3, 4, 5]).endpoints(),
            Some((OsmNodeId(3), OsmNodeId(5)))
        );
        assert_eq!(TransitWay::new(2, &[]).endpoints(), None);
    }
}
