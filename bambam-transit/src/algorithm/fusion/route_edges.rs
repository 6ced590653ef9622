use super::{transfer_edges::capped_distance, FusionState, SkipReason, StopTable};
use crate::model::{
    network::{GraphStore, VertexId},
    osm::{MemberLookup, OsmGeoType, OsmWayId, TransitRelation, TransitWay},
    TransitError,
};
use kdam::tqdm;

/// the stop vertices at the first and last node of a way, or why the way
/// cannot become a route edge.
pub fn route_edge_endpoints(
    way: &TransitWay,
    stops: &StopTable,
) -> Result<(VertexId, VertexId), SkipReason> {
    let (first, last) = way.endpoints().ok_or(SkipReason::EmptyWay)?;
    let from = stops
        .vertex_of(&first)
        .ok_or(SkipReason::EndpointNotAStop)?;
    let to = stops.vertex_of(&last).ok_or(SkipReason::EndpointNotAStop)?;
    if from.is_placeholder() || to.is_placeholder() {
        return Err(SkipReason::NoVertex);
    }
    if from == to {
        return Err(SkipReason::SelfLoop);
    }
    Ok((from, to))
}

/// links the stops at both ends of every way of every relation with an
/// edge carrying the profile of the relation's route type. runs after the
/// stop vertices have been reordered, using their current vertex ids.
pub fn add_route_edges<G, L>(
    relations: &[TransitRelation],
    members: &L,
    store: &mut G,
    state: &mut FusionState,
) -> Result<(), TransitError>
where
    G: GraphStore,
    L: MemberLookup,
{
    let iter = tqdm!(
        relations.iter(),
        total = relations.len(),
        desc = "add route edges"
    );
    for relation in iter {
        let Some(route_type) = relation.route_type() else {
            state.stats.record_skip(SkipReason::NotARouteRelation);
            continue;
        };
        for member in relation.members_of_type(OsmGeoType::Way) {
            let Some(way) = members.get_way(OsmWayId(member.id)) else {
                state.stats.record_skip(SkipReason::MissingMember);
                continue;
            };
            let (from, to) = match route_edge_endpoints(way, &state.stops) {
                Ok(endpoints) => endpoints,
                Err(reason) => {
                    state.stats.record_skip(reason);
                    continue;
                }
            };
            // every route type with a linkable way gets a profile
            let profile = state.route_profile(store, route_type)?;
            if store.edges_from(from).any(|e| e.to == to) {
                state.stats.record_skip(SkipReason::DuplicateEdge);
                continue;
            }
            let (distance, capped) = capped_distance(store, from, to)?;
            if capped {
                state.stats.record_skip(SkipReason::DistanceCapped);
            }
            store.insert_edge(from, to, distance, profile, 0)?;
            state.stats.route_edges_inserted += 1;
        }
    }
    eprintln!();
    log::info!(
        "added {} route edges over {} route types",
        state.stats.route_edges_inserted,
        state.cached_route_types()
    );
    Ok(())
}
