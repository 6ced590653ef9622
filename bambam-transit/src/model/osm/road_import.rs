//! builds a [`RoutingNetwork`] from the highway ways of a .pbf file. this is
//! the road graph that transit data is fused into when running the CLI.
use super::OsmNodeId;
use crate::model::{
    network::{network_ops, EdgeAttributes, GraphStore, ProfileId, RoutingNetwork, VertexId},
    TransitError,
};
use geo::Coord;
use kdam::tqdm;
use osmpbf::{Element, ElementReader};
use std::{collections::HashMap, path::Path};

/// way tags copied onto the road edge profile
const ROAD_TAGS: [&str; 5] = ["highway", "access", "foot", "bicycle", "motor_vehicle"];

/// a highway way with the subset of tags relevant to routing.
#[derive(Debug, Clone)]
pub struct RoadWay {
    pub nodes: Vec<OsmNodeId>,
    pub attributes: EdgeAttributes,
}

/// reads nodes and highway ways from a .pbf file and builds the road network.
pub fn read_road_network(
    filepath: &Path,
    max_edge_distance: f32,
) -> Result<RoutingNetwork, TransitError> {
    log::info!("reading road network from {}", filepath.display());
    let reader =
        ElementReader::from_path(filepath).map_err(|e| TransitError::PbfLibError { source: e })?;

    let mut nodes: HashMap<OsmNodeId, Coord<f32>> = HashMap::new();
    let mut ways: Vec<RoadWay> = vec![];
    reader
        .for_each(|e| match e {
            Element::Node(node) => {
                let coordinate = Coord {
                    x: node.lon() as f32,
                    y: node.lat() as f32,
                };
                nodes.insert(OsmNodeId(node.id()), coordinate);
            }
            Element::DenseNode(dense) => {
                let coordinate = Coord {
                    x: dense.lon() as f32,
                    y: dense.lat() as f32,
                };
                nodes.insert(OsmNodeId(dense.id()), coordinate);
            }
            Element::Way(way) => {
                if let Some(attributes) = road_attributes(way.tags()) {
                    ways.push(RoadWay {
                        nodes: way.refs().map(OsmNodeId).collect(),
                        attributes,
                    });
                }
            }
            Element::Relation(_) => {}
        })
        .map_err(|e| TransitError::PbfLibError { source: e })?;

    if ways.is_empty() {
        return Err(TransitError::NoWaysFound);
    }
    log::info!("read {} nodes and {} highway ways", nodes.len(), ways.len());
    build_road_network(&nodes, &ways, max_edge_distance)
}

/// the routing-relevant tags of a way, or None if it is not a highway.
pub fn road_attributes<'a, I>(tags: I) -> Option<EdgeAttributes>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let attributes = tags
        .into_iter()
        .filter(|(k, _)| ROAD_TAGS.contains(k))
        .map(|(k, v)| (k, v.trim()))
        .collect::<EdgeAttributes>();
    if attributes.get("highway").is_some() {
        Some(attributes)
    } else {
        None
    }
}

/// inserts one vertex per node used by a way and one edge per consecutive
/// node pair. ways referencing nodes missing from `nodes` are broken at the
/// missing node.
pub fn build_road_network(
    nodes: &HashMap<OsmNodeId, Coord<f32>>,
    ways: &[RoadWay],
    max_edge_distance: f32,
) -> Result<RoutingNetwork, TransitError> {
    let mut network = RoutingNetwork::new(max_edge_distance);
    let mut vertices: HashMap<OsmNodeId, VertexId> = HashMap::new();
    let mut missing_nodes: usize = 0;

    for way in tqdm!(ways.iter(), total = ways.len(), desc = "build road network") {
        let profile = network.intern_attribute_profile(way.attributes.clone())?;
        let mut previous: Option<(VertexId, Coord<f32>)> = None;
        for node_id in way.nodes.iter() {
            let Some(coordinate) = nodes.get(node_id) else {
                missing_nodes += 1;
                previous = None;
                continue;
            };
            let vertex = match vertices.get(node_id) {
                Some(v) => *v,
                None => {
                    let v = network.insert_vertex(*coordinate)?;
                    vertices.insert(*node_id, v);
                    v
                }
            };
            if let Some((prev_vertex, prev_coordinate)) = previous {
                if prev_vertex != vertex {
                    add_segment(
                        &mut network,
                        (prev_vertex, prev_coordinate),
                        (vertex, *coordinate),
                        profile,
                    )?;
                }
            }
            previous = Some((vertex, *coordinate));
        }
    }
    eprintln!();

    if missing_nodes > 0 {
        log::warn!("{missing_nodes} way node references not found in source");
    }
    log::info!(
        "road network has {} vertices, {} edges and {} edge profiles",
        network.vertex_count(),
        network.edge_count(),
        network.profiles().len()
    );
    Ok(network)
}

/// adds the edge between two vertices, subdivided into equal pieces with
/// interpolated vertices when it exceeds the maximum edge distance.
fn add_segment(
    network: &mut RoutingNetwork,
    src: (VertexId, Coord<f32>),
    dst: (VertexId, Coord<f32>),
    profile: ProfileId,
) -> Result<(), TransitError> {
    let max = network.max_edge_distance();
    let distance = network_ops::distance_meters(&src.1, &dst.1);
    let pieces = if distance > max {
        (distance / max).ceil() as usize
    } else {
        1
    };
    let piece_distance = distance / pieces as f32;

    let mut from = src.0;
    for piece in 1..pieces {
        let fraction = piece as f32 / pieces as f32;
        let via = network.insert_vertex(network_ops::interpolate(&src.1, &dst.1, fraction))?;
        network.insert_edge(from, via, piece_distance, profile, 0)?;
        from = via;
    }
    network.insert_edge(from, dst.0, piece_distance, profile, 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn nodes() -> HashMap<OsmNodeId, Coord<f32>> {
        HashMap::from([
            (OsmNodeId(1), Coord { x: 4.350, y: 50.840 }),
            (OsmNodeId(2), Coord { x: 4.351, y: 50.840 }),
            (OsmNodeId(3), Coord { x: 4.352, y: 50.840 }),
            (OsmNodeId(4), Coord { x: 4.351, y: 50.841 }),
        ])
    }

    fn way(nodes: &[i64], highway: &str) -> RoadWay {
        RoadWay {
            nodes: nodes.iter().map(|n| OsmNodeId(*n)).collect_vec(),
            attributes: EdgeAttributes::new().with("highway", highway),
        }
    }

    #[test]
    fn test_road_attributes() {
        let tags = vec![
            ("highway", "residential "),
            ("name", "Rue Neuve"),
            ("foot", "no"),
        ];
        let attributes = road_attributes(tags).unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.get("highway"), Some("residential"));
        assert_eq!(attributes.get("foot"), Some("no"));

        assert!(road_attributes(vec![("railway", "rail")]).is_none());
    }

    #[test]
    fn test_shared_nodes_become_one_vertex() {
        let ways = vec![way(&[1, 2, 3], "residential"), way(&[2, 4], "footway")];
        let network = build_road_network(&nodes(), &ways, 5000.0).unwrap();
        assert_eq!(network.vertex_count(), 4);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.profiles().len(), 2);
    }

    #[test]
    fn test_missing_nodes_break_the_way() {
        let ways = vec![way(&[1, 99, 2, 3, 3], "residential")];
        let network = build_road_network(&nodes(), &ways, 5000.0).unwrap();
        // 1 is isolated, 2-3 is kept, the repeated 3 adds nothing
        assert_eq!(network.vertex_count(), 3);
        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn test_long_segments_are_subdivided() {
        // ~70m between node 1 and node 2
        let ways = vec![way(&[1, 2], "residential")];
        let network = build_road_network(&nodes(), &ways, 30.0).unwrap();
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.vertex_count(), 4);
        assert!(network.edges().all(|(_, e)| e.distance <= 30.0));
        let total: f32 = network.edges().map(|(_, e)| e.distance).sum();
        let expected =
            network_ops::distance_meters(&nodes()[&OsmNodeId(1)], &nodes()[&OsmNodeId(2)]);
        assert!((total - expected).abs() < 0.01);
    }
}
