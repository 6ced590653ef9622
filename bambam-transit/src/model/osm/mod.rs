mod member_lookup;
mod osm_ids;
pub mod road_import;
mod transit_element;
mod transit_index;

pub use member_lookup::MemberLookup;
pub use osm_ids::{OsmGeoKey, OsmGeoType, OsmNodeId, OsmRelationId, OsmWayId};
pub use transit_element::{
    RelationMember, TransitElement, TransitNode, TransitRelation, TransitWay,
};
pub use transit_index::{RouteFilter, TransitIndex};
