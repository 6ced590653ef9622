use super::{EdgeAttributes, EdgeId, NetworkError, ProfileId, VertexId};
use crate::model::resolve::SnappedLocation;
use geo::Coord;

/// a single adjacency as seen from the vertex that was enumerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView {
    pub edge_id: EdgeId,
    /// the opposite endpoint of the edge
    pub to: VertexId,
    pub distance: f32,
    pub profile: ProfileId,
    pub meta: u32,
    /// true if the edge was stored in the direction of enumeration
    pub forward: bool,
}

/// the routable graph storage that transit data is fused into. coordinates
/// are WGS84 with x = longitude and y = latitude.
///
/// implementations own their vertex index space and may permute it during
/// [`GraphStore::reorder_vertices`]; callers tracking vertex ids across that
/// call must follow the reported swaps.
pub trait GraphStore {
    /// adds a vertex at the next free index.
    fn insert_vertex(&mut self, coordinate: Coord<f32>) -> Result<VertexId, NetworkError>;

    fn vertex_count(&self) -> usize;

    fn get_coordinate(&self, vertex: VertexId) -> Option<Coord<f32>>;

    /// adds each snapped location as a vertex on the network, splitting the
    /// edges they were snapped onto where needed. a location at either end
    /// of its edge returns the existing endpoint. the output is aligned with
    /// the input.
    fn batch_insert_resolved_locations(
        &mut self,
        locations: &[SnappedLocation],
    ) -> Result<Vec<VertexId>, NetworkError>;

    /// permutes the vertex storage order for spatial locality. `on_swap` is
    /// called once per transposition of two vertex slots, after the swap.
    fn reorder_vertices(&mut self, on_swap: &mut dyn FnMut(VertexId, VertexId));

    /// interns an attribute collection, returning the id of an identical
    /// collection if one was already added.
    fn intern_attribute_profile(
        &mut self,
        attributes: EdgeAttributes,
    ) -> Result<ProfileId, NetworkError>;

    fn get_attribute_profile(&self, profile: ProfileId) -> Option<&EdgeAttributes>;

    /// adds an undirected edge. distances above [`GraphStore::max_edge_distance`]
    /// and self loops are rejected.
    fn insert_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        distance: f32,
        profile: ProfileId,
        meta: u32,
    ) -> Result<EdgeId, NetworkError>;

    /// every edge incident to `vertex`, in either storage direction.
    fn edges_from<'a>(&'a self, vertex: VertexId) -> Box<dyn Iterator<Item = EdgeView> + 'a>;

    /// maximum distance in meters a single edge may carry.
    fn max_edge_distance(&self) -> f32;

    /// finalizes storage for querying.
    fn compress(&mut self);
}
