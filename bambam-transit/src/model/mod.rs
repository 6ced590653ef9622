pub mod network;
pub mod osm;
pub mod resolve;
mod transit_cli_error;
mod transit_error;
mod travel_mode;

pub use transit_cli_error::TransitCliError;
pub use transit_error::TransitError;
pub use travel_mode::TravelMode;
