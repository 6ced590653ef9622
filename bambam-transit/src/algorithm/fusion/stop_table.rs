use super::{SkipReason, VertexPermutation};
use crate::model::{network::VertexId, osm::OsmNodeId};
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// a transit stop inserted into the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub node_id: OsmNodeId,
    pub coordinate: Coord<f32>,
    /// the vertex inserted at the stop coordinate
    pub vertex: VertexId,
    /// the vertex the stop was snapped to on the existing network
    pub resolved: Option<VertexId>,
}

/// bidirectional mapping between stops and their current vertex ids. the
/// stop at insertion index `i` keeps that index for the whole run.
#[derive(Debug, Clone, Default)]
pub struct StopTable {
    stops: Vec<Stop>,
    by_node: HashMap<OsmNodeId, usize>,
    by_vertex: HashMap<VertexId, usize>,
}

impl StopTable {
    /// adds a stop, failing with [`SkipReason::DuplicateStop`] if its node
    /// was already added.
    pub fn insert(
        &mut self,
        node_id: OsmNodeId,
        coordinate: Coord<f32>,
        vertex: VertexId,
    ) -> Result<usize, SkipReason> {
        if self.by_node.contains_key(&node_id) {
            return Err(SkipReason::DuplicateStop);
        }
        let index = self.stops.len();
        self.stops.push(Stop {
            node_id,
            coordinate,
            vertex,
            resolved: None,
        });
        self.by_node.insert(node_id, index);
        self.by_vertex.insert(vertex, index);
        Ok(index)
    }

    pub fn contains_node(&self, node_id: &OsmNodeId) -> bool {
        self.by_node.contains_key(node_id)
    }

    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    pub fn get_by_node(&self, node_id: &OsmNodeId) -> Option<&Stop> {
        self.by_node.get(node_id).and_then(|idx| self.stops.get(*idx))
    }

    /// the current vertex of the stop at this node, if it is a stop.
    pub fn vertex_of(&self, node_id: &OsmNodeId) -> Option<VertexId> {
        self.get_by_node(node_id).map(|s| s.vertex)
    }

    /// the stop owning this vertex, if any.
    pub fn stop_at_vertex(&self, vertex: &VertexId) -> Option<&Stop> {
        self.by_vertex.get(vertex).and_then(|idx| self.stops.get(*idx))
    }

    pub fn set_resolved(&mut self, index: usize, resolved: VertexId) {
        if let Some(stop) = self.stops.get_mut(index) {
            stop.resolved = Some(resolved);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// rewrites every stop and resolved vertex id through the permutation
    /// and rebuilds the vertex index, so no entry refers to a vertex slot
    /// the stop no longer owns.
    pub fn apply_permutation(&mut self, permutation: &VertexPermutation) {
        self.by_vertex.clear();
        for (index, stop) in self.stops.iter_mut().enumerate() {
            stop.vertex = permutation.permute(stop.vertex);
            stop.resolved = stop.resolved.map(|r| permutation.permute(r));
            self.by_vertex.insert(stop.vertex, index);
        }
    }
}
