use super::{
    add_route_edges, add_transfer_edges, collect_stops, FusionState, FusionStats,
    VertexPermutation,
};
use crate::{
    config::TransitFusionConfiguration,
    model::{
        network::GraphStore,
        osm::{MemberLookup, TransitRelation},
        resolve::SpatialResolver,
        TransitError,
    },
};

/// fuses transit route relations into the network:
///   1. stop vertices are inserted and resolved onto the network
///   2. the network reorders its vertices, the stop table follows
///   3. transfer edges link each resolved stop to the network
///   4. route edges link the stops at the ends of each route way
///   5. the network is compressed
///
/// malformed input is skipped and counted in the returned [`FusionStats`].
/// only rejections by the graph store fail the run.
pub fn add_public_transport<G, R, L>(
    store: &mut G,
    relations: &[TransitRelation],
    members: &L,
    resolver: &R,
    config: &TransitFusionConfiguration,
) -> Result<FusionStats, TransitError>
where
    G: GraphStore,
    R: SpatialResolver,
    L: MemberLookup,
{
    let mut state = FusionState::default();
    state.stats.relations = relations.len();

    collect_stops(
        relations,
        members,
        store,
        resolver,
        &config.travel_modes,
        config.parallelize,
        &mut state,
    )?;
    compact_vertices(store, &mut state);
    add_transfer_edges(store, &config.travel_modes, &mut state)?;
    add_route_edges(relations, members, store, &mut state)?;
    store.compress();

    state.stats.log_summary();
    Ok(state.stats)
}

/// reorders the store's vertices and moves every stop table entry along
/// with its vertex.
pub fn compact_vertices<G: GraphStore>(store: &mut G, state: &mut FusionState) {
    let mut permutation = VertexPermutation::identity(store.vertex_count());
    store.reorder_vertices(&mut |v1, v2| permutation.record_swap(v1, v2));
    state.stops.apply_permutation(&permutation);
    log::debug!(
        "vertex reordering applied {} swaps to {} stops",
        permutation.swap_count(),
        state.stops.len()
    );
}
