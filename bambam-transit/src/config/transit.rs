use crate::model::{
    network::DEFAULT_MAX_EDGE_DISTANCE, osm::RouteFilter, resolve::DEFAULT_SEARCH_DISTANCE,
    TransitCliError, TravelMode,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// defines behaviors for fusing transit routes into a road network
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct TransitFusionConfiguration {
    /// modes used to resolve stops onto the network. each one is flagged on
    /// the transfer edges.
    pub travel_modes: Vec<TravelMode>,
    pub search_distance_meters: f64,
    pub max_edge_distance_meters: f32,
    /// if provided, only route relations with one of these `route` tags are fused
    pub route_types: Option<HashSet<String>>,
    pub parallelize: bool,
    pub overwrite: bool,
}

impl Default for TransitFusionConfiguration {
    fn default() -> Self {
        Self {
            travel_modes: vec![TravelMode::Pedestrian],
            search_distance_meters: DEFAULT_SEARCH_DISTANCE,
            max_edge_distance_meters: DEFAULT_MAX_EDGE_DISTANCE,
            route_types: None,
            parallelize: true,
            overwrite: false,
        }
    }
}

impl TransitFusionConfiguration {
    pub fn route_filter(&self) -> RouteFilter {
        match &self.route_types {
            Some(route_types) => RouteFilter::RouteTypes {
                route_types: route_types.clone(),
            },
            None => RouteFilter::AllRoutes,
        }
    }

    /// rejects settings the fusion run cannot work with.
    pub fn validate(&self) -> Result<(), TransitCliError> {
        if self.travel_modes.is_empty() {
            return Err(TransitCliError::ConfigurationError(String::from(
                "at least one travel mode is required",
            )));
        }
        if !(self.search_distance_meters > 0.0) {
            return Err(TransitCliError::ConfigurationError(format!(
                "search_distance_meters must be positive, found {}",
                self.search_distance_meters
            )));
        }
        if !(self.max_edge_distance_meters > 0.0) {
            return Err(TransitCliError::ConfigurationError(format!(
                "max_edge_distance_meters must be positive, found {}",
                self.max_edge_distance_meters
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for TransitFusionConfiguration {
    type Error = TransitCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: TransitFusionConfiguration = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TransitCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                TransitCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TransitCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                TransitCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(TransitCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        conf.validate()?;
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_toml_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
travel_modes = ["pedestrian", "bicycle"]
route_types = ["bus"]
"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();
        let conf = TransitFusionConfiguration::try_from(&path).unwrap();
        assert_eq!(
            conf.travel_modes,
            vec![TravelMode::Pedestrian, TravelMode::Bicycle]
        );
        assert_eq!(conf.search_distance_meters, 50.0);
        assert_eq!(conf.max_edge_distance_meters, 5000.0);
        assert!(conf.parallelize);
        assert!(conf.route_filter().accept("bus"));
        assert!(!conf.route_filter().accept("tram"));
    }

    #[test]
    fn test_json_and_validation() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"travel_modes": [], "overwrite": true}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert!(matches!(
            TransitFusionConfiguration::try_from(&path),
            Err(TransitCliError::ConfigurationError(_))
        ));

        let unsupported = String::from("transit.yaml");
        assert!(TransitFusionConfiguration::try_from(&unsupported).is_err());
    }
}
