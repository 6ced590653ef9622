//! fuses transit route relations into a routable network: stops become
//! vertices snapped onto the network with transfer edges, and consecutive
//! stops of a route are linked with route edges.
mod fusion_ops;
mod fusion_state;
mod fusion_stats;
mod route_edges;
mod skip_reason;
mod stop_collector;
mod stop_table;
mod transfer_edges;
mod vertex_permutation;

#[cfg(test)]
mod test_support;

pub use fusion_ops::{add_public_transport, compact_vertices};
pub use fusion_state::FusionState;
pub use fusion_stats::FusionStats;
pub use route_edges::{add_route_edges, route_edge_endpoints};
pub use skip_reason::SkipReason;
pub use stop_collector::{collect_stops, stop_candidate};
pub use stop_table::{Stop, StopTable};
pub use transfer_edges::{add_transfer_edges, transfer_attributes};
pub use vertex_permutation::VertexPermutation;
