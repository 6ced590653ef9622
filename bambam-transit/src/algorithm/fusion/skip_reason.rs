use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// why a relation member, stop or edge candidate did not make it into the
/// network. none of these abort a fusion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// the member record is not present in the source data
    MissingMember,
    MissingCoordinates,
    MissingIdentity,
    /// the stop node was already collected from this or another relation
    DuplicateStop,
    /// no routable edge within the search distance of the stop
    Unresolved,
    /// relation without a `type=route` and `route` tag
    NotARouteRelation,
    EmptyWay,
    /// a way endpoint is not one of the collected stops
    EndpointNotAStop,
    /// a stop maps to the unassigned vertex placeholder
    NoVertex,
    /// both endpoints resolve to the same vertex
    SelfLoop,
    /// an edge between the endpoints already exists
    DuplicateEdge,
    /// not a skip: the edge was inserted with its distance capped at the
    /// network maximum
    DistanceCapped,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkipReason::MissingMember => "missing member",
            SkipReason::MissingCoordinates => "missing coordinates",
            SkipReason::MissingIdentity => "missing identity",
            SkipReason::DuplicateStop => "duplicate stop",
            SkipReason::Unresolved => "unresolved stop",
            SkipReason::NotARouteRelation => "not a route relation",
            SkipReason::EmptyWay => "empty way",
            SkipReason::EndpointNotAStop => "way endpoint is not a stop",
            SkipReason::NoVertex => "no vertex",
            SkipReason::SelfLoop => "self loop",
            SkipReason::DuplicateEdge => "duplicate edge",
            SkipReason::DistanceCapped => "distance capped",
        };
        write!(f, "{s}")
    }
}
