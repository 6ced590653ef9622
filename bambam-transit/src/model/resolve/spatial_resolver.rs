use super::SnappedLocation;
use crate::model::TravelMode;
use geo::Coord;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("cannot resolve a location without any travel modes")]
    NoModes,
    #[error("no edge traversable by {modes} within {distance} meters of ({x}, {y})")]
    NoEdgeWithinDistance {
        x: f32,
        y: f32,
        distance: f64,
        modes: String,
    },
}

/// snaps coordinates onto the nearest routable location of a network.
///
/// resolvers are queried once per stop and the queries are independent,
/// so they may run on a thread pool.
pub trait SpatialResolver: Sync {
    fn resolve(
        &self,
        coordinate: Coord<f32>,
        modes: &[TravelMode],
    ) -> Result<SnappedLocation, ResolveError>;
}
