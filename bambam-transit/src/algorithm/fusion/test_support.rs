//! a small road network along an east-west street with bus stops just
//! north of it.
use crate::model::{
    network::{EdgeAttributes, GraphStore, RoutingNetwork, VertexId},
    osm::{
        OsmGeoKey, OsmGeoType, OsmNodeId, RelationMember, TransitElement, TransitNode,
        TransitRelation, TransitWay,
    },
    resolve::NetworkResolver,
};
use geo::Coord;
use std::collections::HashMap;

/// a stop ~1km north of the street, out of reach of the resolver
pub const FAR_STOP: OsmNodeId = OsmNodeId(9);
/// a node used as a way endpoint that is not a stop of any relation
pub const NOT_A_STOP: OsmNodeId = OsmNodeId(5);

pub const WAY_1_2: i64 = 10;
pub const WAY_2_3: i64 = 11;
pub const WAY_CLOSED: i64 = 12;
pub const WAY_TO_NOT_A_STOP: i64 = 13;
pub const WAY_EMPTY: i64 = 14;
pub const WAY_1_3: i64 = 15;

pub struct Fixture {
    pub network: RoutingNetwork,
    pub resolver: NetworkResolver,
    pub members: HashMap<OsmGeoKey, TransitElement>,
}

impl Fixture {
    pub fn new() -> Fixture {
        Fixture::with_max_edge_distance(5000.0)
    }

    /// street vertices every 0.001 degrees of longitude (~70m) from 4.350 to
    /// 4.353, stops 1, 2 and 3 ~5.5m north of the middle of each segment.
    pub fn with_max_edge_distance(max_edge_distance: f32) -> Fixture {
        let mut network = RoutingNetwork::new(max_edge_distance);
        let street = network
            .intern_attribute_profile(EdgeAttributes::new().with("highway", "residential"))
            .unwrap();
        let vertices = (0..4)
            .map(|i| {
                let x = 4.350 + 0.001 * i as f32;
                network.insert_vertex(Coord { x, y: 50.840 }).unwrap()
            })
            .collect::<Vec<VertexId>>();
        for pair in vertices.windows(2) {
            network.insert_edge(pair[0], pair[1], 70.2, street, 0).unwrap();
        }
        let resolver = NetworkResolver::new(&network, 50.0);

        let elements = vec![
            TransitElement::Node(TransitNode::new(1, 4.3505, 50.84005)),
            TransitElement::Node(TransitNode::new(2, 4.3515, 50.84005)),
            TransitElement::Node(TransitNode::new(3, 4.3525, 50.84005)),
            TransitElement::Node(TransitNode::new(NOT_A_STOP.0, 4.3530, 50.8410)),
            TransitElement::Node(TransitNode::new(FAR_STOP.0, 4.3515, 50.8500)),
            TransitElement::Way(TransitWay::new(WAY_1_2, &[1, 6, 2])),
            TransitElement::Way(TransitWay::new(WAY_2_3, &[2, 7, 3])),
            TransitElement::Way(TransitWay::new(WAY_CLOSED, &[1, 2, 1])),
            TransitElement::Way(TransitWay::new(WAY_TO_NOT_A_STOP, &[3, NOT_A_STOP.0])),
            TransitElement::Way(TransitWay::new(WAY_EMPTY, &[])),
            TransitElement::Way(TransitWay::new(WAY_1_3, &[1, 3])),
        ];
        let members = elements
            .into_iter()
            .filter_map(|e| e.key().map(|k| (k, e)))
            .collect::<HashMap<_, _>>();

        Fixture {
            network,
            resolver,
            members,
        }
    }

    /// bus route 100 serving stops 1, 2 and 3 over two ways
    pub fn bus_route(&self) -> TransitRelation {
        route(100, "bus", &[1, 2, 3], &[WAY_1_2, WAY_2_3])
    }

    /// tram route 101 from stop 2 to the unreachable far stop
    pub fn tram_route_via_far_stop(&self) -> TransitRelation {
        route(101, "tram", &[2, FAR_STOP.0], &[])
    }
}

pub fn route(id: i64, route_type: &str, stops: &[i64], ways: &[i64]) -> TransitRelation {
    let members = stops
        .iter()
        .map(|n| RelationMember::new(OsmGeoType::Node, *n, "stop"))
        .chain(ways.iter().map(|w| RelationMember::new(OsmGeoType::Way, *w, "")))
        .collect();
    TransitRelation::route(id, route_type, members)
}
