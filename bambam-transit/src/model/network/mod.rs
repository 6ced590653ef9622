mod edge_attributes;
mod edge_profiles;
mod graph_store;
mod hilbert;
mod network_error;
pub mod network_ops;
mod network_writer;
mod routing_network;
mod vertex_id;

pub use edge_attributes::EdgeAttributes;
pub use edge_profiles::{EdgeProfiles, ProfileId};
pub use graph_store::{EdgeView, GraphStore};
pub use network_error::NetworkError;
pub use network_writer::NetworkWriter;
pub use routing_network::{Edge, RoutingNetwork};
pub use vertex_id::{EdgeId, VertexId};

/// default upper bound on the length of a single edge, in meters.
pub const DEFAULT_MAX_EDGE_DISTANCE: f32 = 5000.0;
