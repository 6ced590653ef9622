use super::{FusionState, SkipReason};
use crate::model::{
    network::GraphStore,
    osm::{MemberLookup, OsmGeoType, OsmNodeId, RelationMember, TransitRelation},
    resolve::{ResolveError, SnappedLocation, SpatialResolver},
    TransitError, TravelMode,
};
use geo::Coord;
use itertools::Itertools;
use kdam::{tqdm, Bar, BarExt};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};

/// the node id and coordinate of a stop member, or why it cannot be one.
pub fn stop_candidate<L: MemberLookup>(
    members: &L,
    member: &RelationMember,
) -> Result<(OsmNodeId, Coord<f32>), SkipReason> {
    let node = members
        .get_node(OsmNodeId(member.id))
        .ok_or(SkipReason::MissingMember)?;
    let node_id = node.id.ok_or(SkipReason::MissingIdentity)?;
    let coordinate = node.coordinate.ok_or(SkipReason::MissingCoordinates)?;
    Ok((node_id, coordinate))
}

/// inserts a vertex for every distinct stop node of the relations, then
/// resolves each stop onto the network and inserts the resolved locations.
/// stops that cannot be resolved are kept without a resolved vertex.
pub fn collect_stops<G, R, L>(
    relations: &[TransitRelation],
    members: &L,
    store: &mut G,
    resolver: &R,
    modes: &[TravelMode],
    parallelize: bool,
    state: &mut FusionState,
) -> Result<(), TransitError>
where
    G: GraphStore,
    R: SpatialResolver,
    L: MemberLookup,
{
    let iter = tqdm!(
        relations.iter(),
        total = relations.len(),
        desc = "collect transit stops"
    );
    for relation in iter {
        for member in relation.members_of_type(OsmGeoType::Node) {
            let (node_id, coordinate) = match stop_candidate(members, member) {
                Ok(candidate) => candidate,
                Err(reason) => {
                    state.stats.record_skip(reason);
                    continue;
                }
            };
            if state.stops.contains_node(&node_id) {
                state.stats.record_skip(SkipReason::DuplicateStop);
                continue;
            }
            let vertex = store.insert_vertex(coordinate)?;
            state
                .stops
                .insert(node_id, coordinate, vertex)
                .map_err(|e| TransitError::InternalError(format!("stop {node_id}: {e}")))?;
            state.stats.stops_inserted += 1;
        }
    }
    eprintln!();

    let coordinates = state.stops.iter().map(|s| s.coordinate).collect_vec();
    let results = if parallelize {
        resolve_parallel(&coordinates, resolver, modes)?
    } else {
        coordinates
            .iter()
            .map(|c| resolver.resolve(*c, modes))
            .collect_vec()
    };

    let mut resolved: Vec<(usize, SnappedLocation)> = vec![];
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(location) => resolved.push((index, location)),
            Err(e) => {
                log::debug!("stop {index} left unresolved: {e}");
                state.stats.record_skip(SkipReason::Unresolved);
                state.stats.stops_unresolved += 1;
            }
        }
    }

    let locations = resolved.iter().map(|(_, l)| *l).collect_vec();
    let vertices = store.batch_insert_resolved_locations(&locations)?;
    for ((index, _), vertex) in resolved.iter().zip(vertices) {
        state.stops.set_resolved(*index, vertex);
        state.stats.stops_resolved += 1;
    }
    log::info!(
        "collected {} stops, {} resolved onto the network",
        state.stops.len(),
        state.stats.stops_resolved
    );
    Ok(())
}

/// resolves every coordinate on the rayon pool. results are aligned with
/// the input.
fn resolve_parallel<R: SpatialResolver>(
    coordinates: &[Coord<f32>],
    resolver: &R,
    modes: &[TravelMode],
) -> Result<Vec<Result<SnappedLocation, ResolveError>>, TransitError> {
    let bar = Arc::new(Mutex::new(
        Bar::builder()
            .total(coordinates.len())
            .desc("resolve transit stops")
            .build()
            .map_err(TransitError::InternalError)?,
    ));
    let results = coordinates
        .par_iter()
        .map(|c| {
            let result = resolver.resolve(*c, modes);
            if let Ok(mut b) = bar.clone().lock() {
                let _ = b.update(1);
            }
            result
        })
        .collect::<Vec<_>>();
    eprintln!();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::super::test_support;
    use super::*;
    use crate::model::osm::{OsmGeoKey, TransitElement, TransitNode};
    use std::collections::HashMap;

    #[test]
    fn test_stop_candidate() {
        let mut members: HashMap<OsmGeoKey, TransitElement> = HashMap::new();
        let complete = TransitNode::new(1, 4.35, 50.84);
        let no_coordinates = TransitNode {
            id: Some(OsmNodeId(2)),
            coordinate: None,
        };
        members.insert(OsmGeoKey::from(OsmNodeId(1)), TransitElement::Node(complete));
        members.insert(
            OsmGeoKey::from(OsmNodeId(2)),
            TransitElement::Node(no_coordinates),
        );

        let member = |id| RelationMember::new(OsmGeoType::Node, id, "stop");
        assert!(stop_candidate(&members, &member(1)).is_ok());
        assert_eq!(
            stop_candidate(&members, &member(2)),
            Err(SkipReason::MissingCoordinates)
        );
        assert_eq!(
            stop_candidate(&members, &member(3)),
            Err(SkipReason::MissingMember)
        );
    }

    #[test]
    fn test_collect_and_resolve_stops() {
        for parallelize in [false, true] {
            let mut fixture = test_support::Fixture::new();
            let relations = vec![fixture.bus_route()];
            let mut state = FusionState::default();
            let before = fixture.network.vertex_count();
            collect_stops(
                &relations,
                &fixture.members,
                &mut fixture.network,
                &fixture.resolver,
                &[TravelMode::Pedestrian],
                parallelize,
                &mut state,
            )
            .unwrap();

            assert_eq!(state.stats.stops_inserted, 3);
            assert_eq!(state.stats.stops_resolved, 3);
            // one stop vertex and one split vertex per stop
            assert_eq!(fixture.network.vertex_count(), before + 6);
            for stop in state.stops.iter() {
                let resolved = stop.resolved.unwrap();
                let snapped = fixture.network.get_coordinate(resolved).unwrap();
                assert!((snapped.x - stop.coordinate.x).abs() < 1e-5);
                assert!(snapped.y < stop.coordinate.y);
            }
        }
    }

    #[test]
    fn test_unresolvable_and_duplicate_stops() {
        let mut fixture = test_support::Fixture::new();
        let relations = vec![fixture.bus_route(), fixture.tram_route_via_far_stop()];
        let mut state = FusionState::default();
        collect_stops(
            &relations,
            &fixture.members,
            &mut fixture.network,
            &fixture.resolver,
            &[TravelMode::Pedestrian],
            false,
            &mut state,
        )
        .unwrap();

        assert_eq!(state.stats.stops_inserted, 4);
        assert_eq!(state.stats.stops_unresolved, 1);
        assert_eq!(state.stats.skip_count(SkipReason::DuplicateStop), 1);
        let far = state.stops.get_by_node(&test_support::FAR_STOP).unwrap();
        assert_eq!(far.resolved, None);
    }
}
