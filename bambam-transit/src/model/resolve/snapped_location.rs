use crate::model::network::EdgeId;
use geo::Coord;
use serde::{Deserialize, Serialize};

/// a location on an existing network edge, produced by resolving a
/// coordinate onto the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnappedLocation {
    pub edge_id: EdgeId,
    /// position along the edge from its stored `from` vertex, as a fraction
    /// of [`SnappedLocation::MAX_OFFSET`].
    pub offset: u16,
    /// the snapped coordinate on the edge
    pub coordinate: Coord<f32>,
    /// distance in meters between the query and the snapped coordinate
    pub distance: f64,
}

impl SnappedLocation {
    pub const MAX_OFFSET: u16 = u16::MAX;

    pub fn new(edge_id: EdgeId, offset: u16, coordinate: Coord<f32>, distance: f64) -> Self {
        Self {
            edge_id,
            offset,
            coordinate,
            distance,
        }
    }

    /// encodes a fraction in [0, 1] as an offset.
    pub fn offset_from_fraction(fraction: f64) -> u16 {
        (fraction.clamp(0.0, 1.0) * Self::MAX_OFFSET as f64).round() as u16
    }
}
