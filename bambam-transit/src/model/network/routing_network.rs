use super::{
    hilbert, EdgeAttributes, EdgeId, EdgeProfiles, EdgeView, GraphStore, NetworkError, ProfileId,
    VertexId, DEFAULT_MAX_EDGE_DISTANCE,
};
use crate::model::resolve::SnappedLocation;
use geo::Coord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// an undirected edge, stored once and listed in the adjacency of both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    /// length in meters
    pub distance: f32,
    pub profile: ProfileId,
    pub meta: u32,
}

impl Edge {
    /// the endpoint opposite to `vertex`.
    pub fn other(&self, vertex: VertexId) -> VertexId {
        if self.from == vertex {
            self.to
        } else {
            self.from
        }
    }
}

/// in-memory routable network with dense vertex and edge indices.
#[derive(Debug, Clone)]
pub struct RoutingNetwork {
    vertices: Vec<Coord<f32>>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
    profiles: EdgeProfiles,
    max_edge_distance: f32,
    compressed: bool,
}

impl Default for RoutingNetwork {
    fn default() -> Self {
        RoutingNetwork::new(DEFAULT_MAX_EDGE_DISTANCE)
    }
}

impl RoutingNetwork {
    pub fn new(max_edge_distance: f32) -> RoutingNetwork {
        RoutingNetwork {
            vertices: vec![],
            edges: vec![],
            adjacency: vec![],
            profiles: EdgeProfiles::default(),
            max_edge_distance,
            compressed: false,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn get_edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(edge_id.as_usize())
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(idx, e)| (EdgeId(idx as u32), e))
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Coord<f32>)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, c)| (VertexId::from(idx), c))
    }

    pub fn profiles(&self) -> &EdgeProfiles {
        &self.profiles
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.as_usize() < self.vertices.len()
    }

    /// appends an edge without validation. callers guarantee both endpoints
    /// exist and the distance is within bounds.
    fn push_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        distance: f32,
        profile: ProfileId,
        meta: u32,
    ) -> EdgeId {
        let edge_id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            from,
            to,
            distance,
            profile,
            meta,
        });
        self.adjacency[from.as_usize()].push(edge_id);
        self.adjacency[to.as_usize()].push(edge_id);
        self.compressed = false;
        edge_id
    }

    /// splits an edge at the given (offset, vertex) pairs, which must be sorted
    /// by offset and lie strictly inside the edge. the first piece keeps the
    /// original edge id.
    fn split_edge(&mut self, edge_id: EdgeId, splits: &[(u16, VertexId)]) -> Result<(), NetworkError> {
        let original = *self
            .get_edge(edge_id)
            .ok_or(NetworkError::MissingEdge(edge_id))?;
        let Some((_, first_vertex)) = splits.first() else {
            return Ok(());
        };

        let mut prev_vertex = *first_vertex;
        let mut prev_fraction = fraction(splits[0].0);

        // shorten the original edge so it ends at the first split vertex
        let edge = &mut self.edges[edge_id.as_usize()];
        edge.to = *first_vertex;
        edge.distance = original.distance * prev_fraction;
        self.adjacency[original.to.as_usize()].retain(|e| *e != edge_id);
        self.adjacency[first_vertex.as_usize()].push(edge_id);

        for (offset, vertex) in splits.iter().skip(1) {
            let f = fraction(*offset);
            let distance = original.distance * (f - prev_fraction);
            self.push_edge(prev_vertex, *vertex, distance, original.profile, original.meta);
            prev_vertex = *vertex;
            prev_fraction = f;
        }
        let remaining = original.distance * (1.0 - prev_fraction);
        self.push_edge(
            prev_vertex,
            original.to,
            remaining,
            original.profile,
            original.meta,
        );
        Ok(())
    }

    /// transposes two vertex slots, rewriting every incident edge.
    fn swap_vertices(&mut self, a: VertexId, b: VertexId) {
        if a == b {
            return;
        }
        let swap_id = |v: VertexId| {
            if v == a {
                b
            } else if v == b {
                a
            } else {
                v
            }
        };
        let incident = self.adjacency[a.as_usize()]
            .iter()
            .chain(self.adjacency[b.as_usize()].iter())
            .copied()
            .unique()
            .collect_vec();
        for edge_id in incident {
            let edge = &mut self.edges[edge_id.as_usize()];
            edge.from = swap_id(edge.from);
            edge.to = swap_id(edge.to);
        }
        self.vertices.swap(a.as_usize(), b.as_usize());
        self.adjacency.swap(a.as_usize(), b.as_usize());
    }
}

fn fraction(offset: u16) -> f32 {
    offset as f32 / SnappedLocation::MAX_OFFSET as f32
}

impl GraphStore for RoutingNetwork {
    fn insert_vertex(&mut self, coordinate: Coord<f32>) -> Result<VertexId, NetworkError> {
        let next = self.vertices.len();
        if next >= VertexId::NO_VERTEX.as_usize() {
            return Err(NetworkError::VertexSpaceExhausted(next));
        }
        self.vertices.push(coordinate);
        self.adjacency.push(vec![]);
        self.compressed = false;
        Ok(VertexId::from(next))
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn get_coordinate(&self, vertex: VertexId) -> Option<Coord<f32>> {
        self.vertices.get(vertex.as_usize()).copied()
    }

    fn batch_insert_resolved_locations(
        &mut self,
        locations: &[SnappedLocation],
    ) -> Result<Vec<VertexId>, NetworkError> {
        let mut result = vec![VertexId::NO_VERTEX; locations.len()];

        // locations at an edge end map onto the existing vertex, the rest are
        // grouped per edge so each edge is split once, in offset order.
        let mut interior: BTreeMap<EdgeId, Vec<usize>> = BTreeMap::new();
        for (idx, location) in locations.iter().enumerate() {
            let edge = self
                .get_edge(location.edge_id)
                .ok_or(NetworkError::MissingEdge(location.edge_id))?;
            if location.offset == 0 {
                result[idx] = edge.from;
            } else if location.offset == SnappedLocation::MAX_OFFSET {
                result[idx] = edge.to;
            } else {
                interior.entry(location.edge_id).or_default().push(idx);
            }
        }

        for (edge_id, indices) in interior {
            let mut splits: Vec<(u16, VertexId)> = vec![];
            for idx in indices
                .into_iter()
                .sorted_by_key(|i| (locations[*i].offset, *i))
            {
                let location = &locations[idx];
                match splits.last() {
                    Some((offset, vertex)) if *offset == location.offset => {
                        result[idx] = *vertex;
                    }
                    _ => {
                        let vertex = self.insert_vertex(location.coordinate)?;
                        splits.push((location.offset, vertex));
                        result[idx] = vertex;
                    }
                }
            }
            self.split_edge(edge_id, &splits)?;
        }

        Ok(result)
    }

    fn reorder_vertices(&mut self, on_swap: &mut dyn FnMut(VertexId, VertexId)) {
        let n = self.vertices.len();
        let keys = self
            .vertices
            .iter()
            .map(|c| hilbert::distance(c, hilbert::DEFAULT_ORDER))
            .collect_vec();
        // order[new slot] = original slot
        let order = (0..n).sorted_by_key(|i| (keys[*i], *i)).collect_vec();

        let mut slot_of: Vec<usize> = (0..n).collect();
        let mut original_at: Vec<usize> = (0..n).collect();
        let mut swaps: usize = 0;
        for target in 0..n {
            let original = order[target];
            let current = slot_of[original];
            if current == target {
                continue;
            }
            let displaced = original_at[target];
            self.swap_vertices(VertexId::from(target), VertexId::from(current));
            original_at.swap(target, current);
            slot_of[original] = target;
            slot_of[displaced] = current;
            swaps += 1;
            on_swap(VertexId::from(target), VertexId::from(current));
        }
        log::debug!("reordered {n} vertices along hilbert curve with {swaps} swaps");
    }

    fn intern_attribute_profile(
        &mut self,
        attributes: EdgeAttributes,
    ) -> Result<ProfileId, NetworkError> {
        self.profiles.add(attributes)
    }

    fn get_attribute_profile(&self, profile: ProfileId) -> Option<&EdgeAttributes> {
        self.profiles.get(profile)
    }

    fn insert_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        distance: f32,
        profile: ProfileId,
        meta: u32,
    ) -> Result<EdgeId, NetworkError> {
        if from == to {
            return Err(NetworkError::SelfLoop(from));
        }
        if !self.contains_vertex(from) {
            return Err(NetworkError::MissingVertex(from));
        }
        if !self.contains_vertex(to) {
            return Err(NetworkError::MissingVertex(to));
        }
        // written to also reject NaN
        if !(distance <= self.max_edge_distance) {
            return Err(NetworkError::EdgeTooLong(distance, self.max_edge_distance));
        }
        Ok(self.push_edge(from, to, distance, profile, meta))
    }

    fn edges_from<'a>(&'a self, vertex: VertexId) -> Box<dyn Iterator<Item = EdgeView> + 'a> {
        match self.adjacency.get(vertex.as_usize()) {
            None => Box::new(std::iter::empty()),
            Some(adjacencies) => Box::new(adjacencies.iter().map(move |edge_id| {
                let edge = &self.edges[edge_id.as_usize()];
                EdgeView {
                    edge_id: *edge_id,
                    to: edge.other(vertex),
                    distance: edge.distance,
                    profile: edge.profile,
                    meta: edge.meta,
                    forward: edge.from == vertex,
                }
            })),
        }
    }

    fn max_edge_distance(&self) -> f32 {
        self.max_edge_distance
    }

    fn compress(&mut self) {
        let edges = &self.edges;
        for (idx, adjacencies) in self.adjacency.iter_mut().enumerate() {
            let vertex = VertexId::from(idx);
            adjacencies.sort_by_key(|e| (edges[e.as_usize()].other(vertex), *e));
            adjacencies.shrink_to_fit();
        }
        self.edges.shrink_to_fit();
        self.vertices.shrink_to_fit();
        self.compressed = true;
        log::debug!(
            "compressed network with {} vertices, {} edges, {} edge profiles",
            self.vertices.len(),
            self.edges.len(),
            self.profiles.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f32, y: f32) -> Coord<f32> {
        Coord { x, y }
    }

    fn road_profile(network: &mut RoutingNetwork) -> ProfileId {
        network
            .intern_attribute_profile(EdgeAttributes::new().with("highway", "residential"))
            .unwrap()
    }

    #[test]
    fn test_edges_are_listed_from_both_ends() {
        let mut network = RoutingNetwork::default();
        let a = network.insert_vertex(coord(4.35, 50.84)).unwrap();
        let b = network.insert_vertex(coord(4.36, 50.84)).unwrap();
        let p = road_profile(&mut network);
        network.insert_edge(a, b, 700.0, p, 0).unwrap();

        let from_a = network.edges_from(a).collect_vec();
        let from_b = network.edges_from(b).collect_vec();
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].to, b);
        assert!(from_a[0].forward);
        assert_eq!(from_b[0].to, a);
        assert!(!from_b[0].forward);
    }

    #[test]
    fn test_insert_edge_rejects_invalid_edges() {
        let mut network = RoutingNetwork::new(100.0);
        let a = network.insert_vertex(coord(0.0, 0.0)).unwrap();
        let b = network.insert_vertex(coord(0.0, 0.0005)).unwrap();
        let p = road_profile(&mut network);
        assert!(matches!(
            network.insert_edge(a, a, 1.0, p, 0),
            Err(NetworkError::SelfLoop(_))
        ));
        assert!(matches!(
            network.insert_edge(a, VertexId(9), 1.0, p, 0),
            Err(NetworkError::MissingVertex(_))
        ));
        assert!(matches!(
            network.insert_edge(a, b, 100.5, p, 0),
            Err(NetworkError::EdgeTooLong(_, _))
        ));
        assert!(network.insert_edge(a, b, 100.0, p, 0).is_ok());
    }

    #[test]
    fn test_batch_insert_splits_edges() {
        let mut network = RoutingNetwork::default();
        let a = network.insert_vertex(coord(0.0, 0.0)).unwrap();
        let b = network.insert_vertex(coord(0.01, 0.0)).unwrap();
        let p = road_profile(&mut network);
        let edge_id = network.insert_edge(a, b, 1000.0, p, 7).unwrap();

        let quarter = SnappedLocation::MAX_OFFSET / 4;
        let half = SnappedLocation::MAX_OFFSET / 2;
        let locations = vec![
            SnappedLocation::new(edge_id, half, coord(0.005, 0.0), 1.0),
            SnappedLocation::new(edge_id, 0, coord(0.0, 0.0), 2.0),
            SnappedLocation::new(edge_id, quarter, coord(0.0025, 0.0), 3.0),
            SnappedLocation::new(edge_id, half, coord(0.005, 0.0), 4.0),
            SnappedLocation::new(edge_id, SnappedLocation::MAX_OFFSET, coord(0.01, 0.0), 5.0),
        ];
        let vertices = network.batch_insert_resolved_locations(&locations).unwrap();

        assert_eq!(vertices[1], a);
        assert_eq!(vertices[4], b);
        assert_eq!(vertices[0], vertices[3], "equal offsets share a vertex");
        assert_eq!(network.vertex_count(), 4);
        assert_eq!(network.edge_count(), 3);

        let total: f32 = network.edges().map(|(_, e)| e.distance).sum();
        assert!((total - 1000.0).abs() < 0.01);
        assert!(network.edges().all(|(_, e)| e.profile == p && e.meta == 7));

        // a -> quarter -> half -> b
        let a_neighbors = network.edges_from(a).map(|e| e.to).collect_vec();
        assert_eq!(a_neighbors, vec![vertices[2]]);
        let mid_neighbors = network
            .edges_from(vertices[0])
            .map(|e| e.to)
            .sorted()
            .collect_vec();
        assert_eq!(mid_neighbors, vec![b, vertices[2]].into_iter().sorted().collect_vec());
    }

    #[test]
    fn test_batch_insert_unknown_edge_fails() {
        let mut network = RoutingNetwork::default();
        let location = SnappedLocation::new(EdgeId(3), 10, coord(0.0, 0.0), 0.0);
        assert!(matches!(
            network.batch_insert_resolved_locations(&[location]),
            Err(NetworkError::MissingEdge(_))
        ));
    }

    #[test]
    fn test_reorder_reports_every_swap() {
        let mut network = RoutingNetwork::default();
        let coords = vec![
            coord(10.0, 10.0),
            coord(-120.0, 45.0),
            coord(4.35, 50.84),
            coord(4.351, 50.841),
            coord(150.0, -30.0),
            coord(-120.01, 45.01),
        ];
        for c in coords.iter() {
            network.insert_vertex(*c).unwrap();
        }
        let p = road_profile(&mut network);
        network.insert_edge(VertexId(2), VertexId(3), 90.0, p, 0).unwrap();
        network.insert_edge(VertexId(1), VertexId(5), 1400.0, p, 0).unwrap();

        // replaying the reported swaps on a copy must reproduce the new order
        let mut replay = coords.clone();
        network.reorder_vertices(&mut |v1, v2| replay.swap(v1.as_usize(), v2.as_usize()));
        let reordered = network.vertices().map(|(_, c)| *c).collect_vec();
        assert_eq!(replay, reordered);

        // edges still connect the same coordinates
        let mut pairs = network
            .edges()
            .map(|(_, e)| {
                let a = network.get_coordinate(e.from).unwrap();
                let b = network.get_coordinate(e.to).unwrap();
                (a.x, b.x)
            })
            .collect_vec();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert_eq!(pairs, vec![(-120.0, -120.01), (4.35, 4.351)]);

        // nearby coordinates end up adjacent
        let brussels = network
            .vertices()
            .filter(|(_, c)| (c.x - 4.35).abs() < 0.01)
            .map(|(v, _)| v.0)
            .collect_vec();
        assert_eq!(brussels.len(), 2);
        assert_eq!(brussels[0].abs_diff(brussels[1]), 1);
    }

    #[test]
    fn test_compress_sorts_adjacencies() {
        let mut network = RoutingNetwork::default();
        let hub = network.insert_vertex(coord(0.0, 0.0)).unwrap();
        let spokes = (0..4)
            .map(|i| network.insert_vertex(coord(0.001 * i as f32, 0.001)).unwrap())
            .collect_vec();
        let p = road_profile(&mut network);
        for spoke in spokes.iter().rev() {
            network.insert_edge(*spoke, hub, 10.0, p, 0).unwrap();
        }
        network.compress();
        assert!(network.is_compressed());
        let targets = network.edges_from(hub).map(|e| e.to).collect_vec();
        assert_eq!(targets, spokes);
    }
}
