mod transit;

pub use transit::TransitFusionConfiguration;
