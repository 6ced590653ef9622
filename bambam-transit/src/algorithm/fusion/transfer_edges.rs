use super::{FusionState, SkipReason};
use crate::model::{
    network::{network_ops, EdgeAttributes, GraphStore, NetworkError, VertexId},
    TransitError, TravelMode,
};
use itertools::Itertools;

/// `type=transfer` plus a `<mode>=yes` flag for each travel mode.
pub fn transfer_attributes(modes: &[TravelMode]) -> EdgeAttributes {
    modes.iter().fold(
        EdgeAttributes::new().with(EdgeAttributes::TYPE_KEY, EdgeAttributes::TRANSFER_TYPE),
        |attributes, mode| attributes.with(mode.name(), "yes"),
    )
}

/// great-circle distance between two vertices, capped at the store maximum.
/// the flag is true when the distance was capped.
pub(super) fn capped_distance<G: GraphStore>(
    store: &G,
    from: VertexId,
    to: VertexId,
) -> Result<(f32, bool), NetworkError> {
    let src = store
        .get_coordinate(from)
        .ok_or(NetworkError::MissingVertex(from))?;
    let dst = store
        .get_coordinate(to)
        .ok_or(NetworkError::MissingVertex(to))?;
    let distance = network_ops::distance_meters(&src, &dst);
    let max = store.max_edge_distance();
    if distance > max {
        Ok((max, true))
    } else {
        Ok((distance, false))
    }
}

/// links every resolved stop to the network location it was resolved to.
/// the transfer profile is interned even when no stop resolved.
pub fn add_transfer_edges<G: GraphStore>(
    store: &mut G,
    modes: &[TravelMode],
    state: &mut FusionState,
) -> Result<(), TransitError> {
    let profile = state.transfer_profile(store, modes)?;
    let pairs = state
        .stops
        .iter()
        .filter_map(|s| s.resolved.map(|r| (s.vertex, r)))
        .collect_vec();
    if pairs.is_empty() {
        log::info!("no resolved stops, no transfer edges added");
        return Ok(());
    }

    for (stop_vertex, resolved) in pairs {
        if stop_vertex == resolved {
            state.stats.record_skip(SkipReason::SelfLoop);
            continue;
        }
        let (distance, capped) = capped_distance(store, stop_vertex, resolved)?;
        if capped {
            state.stats.record_skip(SkipReason::DistanceCapped);
        }
        store.insert_edge(stop_vertex, resolved, distance, profile, 0)?;
        state.stats.transfer_edges_inserted += 1;
    }
    log::info!(
        "added {} transfer edges",
        state.stats.transfer_edges_inserted
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::{collect_stops, test_support};
    use super::*;

    #[test]
    fn test_transfer_attributes() {
        let attributes = transfer_attributes(&[TravelMode::Pedestrian, TravelMode::Bicycle]);
        assert!(attributes.is_transfer());
        assert_eq!(attributes.get("pedestrian"), Some("yes"));
        assert_eq!(attributes.get("bicycle"), Some("yes"));
        assert_eq!(attributes.get("car"), None);
        assert!(TravelMode::Pedestrian.can_traverse(&attributes));
        assert!(!TravelMode::Car.can_traverse(&attributes));
    }

    #[test]
    fn test_one_transfer_edge_per_resolved_stop() {
        let mut fixture = test_support::Fixture::new();
        let relations = vec![fixture.bus_route(), fixture.tram_route_via_far_stop()];
        let modes = [TravelMode::Pedestrian];
        let mut state = FusionState::default();
        collect_stops(
            &relations,
            &fixture.members,
            &mut fixture.network,
            &fixture.resolver,
            &modes,
            false,
            &mut state,
        )
        .unwrap();
        let edges_before = fixture.network.edge_count();
        add_transfer_edges(&mut fixture.network, &modes, &mut state).unwrap();

        // the far stop is unresolved
        assert_eq!(state.stats.transfer_edges_inserted, 3);
        assert_eq!(fixture.network.edge_count(), edges_before + 3);
        for stop in state.stops.iter() {
            let edges = fixture.network.edges_from(stop.vertex).collect_vec();
            match stop.resolved {
                Some(resolved) => {
                    assert_eq!(edges.len(), 1);
                    assert_eq!(edges[0].to, resolved);
                    assert!(edges[0].distance > 5.0 && edges[0].distance < 6.0);
                    let profile = fixture
                        .network
                        .get_attribute_profile(edges[0].profile)
                        .unwrap();
                    assert!(profile.is_transfer());
                }
                None => assert!(edges.is_empty()),
            }
        }
    }

    #[test]
    fn test_transfer_profile_without_resolved_stops() {
        let mut fixture = test_support::Fixture::new();
        let relations = vec![test_support::route(
            400,
            "tram",
            &[test_support::FAR_STOP.0],
            &[],
        )];
        let modes = [TravelMode::Pedestrian];
        let mut state = FusionState::default();
        collect_stops(
            &relations,
            &fixture.members,
            &mut fixture.network,
            &fixture.resolver,
            &modes,
            false,
            &mut state,
        )
        .unwrap();
        assert_eq!(state.stats.stops_unresolved, 1);

        add_transfer_edges(&mut fixture.network, &modes, &mut state).unwrap();
        add_transfer_edges(&mut fixture.network, &modes, &mut state).unwrap();
        assert_eq!(state.stats.transfer_edges_inserted, 0);
        let transfer_profiles = fixture
            .network
            .profiles()
            .iter()
            .filter(|(_, p)| p.is_transfer())
            .count();
        assert_eq!(transfer_profiles, 1);
    }

    #[test]
    fn test_capped_distance() {
        let mut fixture = test_support::Fixture::with_max_edge_distance(100.0);
        let mut state = FusionState::default();
        collect_stops(
            &[fixture.bus_route()],
            &fixture.members,
            &mut fixture.network,
            &fixture.resolver,
            &[TravelMode::Pedestrian],
            false,
            &mut state,
        )
        .unwrap();

        let stop = *state.stops.get(0).unwrap();
        let resolved = stop.resolved.unwrap();
        let (distance, capped) = capped_distance(&fixture.network, stop.vertex, resolved).unwrap();
        assert!(!capped);
        assert!(distance < 6.0);

        // ~700m east of the stop
        let far = fixture
            .network
            .insert_vertex(geo::Coord { x: 4.3605, y: 50.84005 })
            .unwrap();
        let (distance, capped) = capped_distance(&fixture.network, stop.vertex, far).unwrap();
        assert!(capped);
        assert_eq!(distance, 100.0);
    }
}
