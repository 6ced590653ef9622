mod network_resolver;
mod snapped_location;
mod spatial_resolver;

pub use network_resolver::NetworkResolver;
pub use snapped_location::SnappedLocation;
pub use spatial_resolver::{ResolveError, SpatialResolver};

/// default search radius used when snapping stops, in meters.
pub const DEFAULT_SEARCH_DISTANCE: f64 = 50.0;
