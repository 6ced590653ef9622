use super::{OsmGeoKey, OsmNodeId, OsmWayId, TransitElement, TransitNode, TransitWay};
use std::collections::HashMap;

/// resolves relation members to their element records.
pub trait MemberLookup {
    fn get_member(&self, key: &OsmGeoKey) -> Option<&TransitElement>;

    fn get_node(&self, id: OsmNodeId) -> Option<&TransitNode> {
        match self.get_member(&OsmGeoKey::from(id)) {
            Some(TransitElement::Node(node)) => Some(node),
            _ => None,
        }
    }

    fn get_way(&self, id: OsmWayId) -> Option<&TransitWay> {
        match self.get_member(&OsmGeoKey::from(id)) {
            Some(TransitElement::Way(way)) => Some(way),
            _ => None,
        }
    }
}

impl MemberLookup for HashMap<OsmGeoKey, TransitElement> {
    fn get_member(&self, key: &OsmGeoKey) -> Option<&TransitElement> {
        self.get(key)
    }
}
