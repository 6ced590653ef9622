use super::network::EdgeAttributes;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// a travel-mode capability profile. stops are resolved onto edges that at
/// least one of the requested modes may traverse, and transfer edges are
/// flagged as traversable by each requested mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Pedestrian,
    Bicycle,
    Car,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            TravelMode::Pedestrian => "pedestrian",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Car => "car",
        }
    }

    /// the OSM access key that overrides the general `access` tag for this mode.
    fn access_key(&self) -> &'static str {
        match self {
            TravelMode::Pedestrian => "foot",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Car => "motor_vehicle",
        }
    }

    /// decides if an edge carrying these attributes may be used by this mode.
    pub fn can_traverse(&self, attributes: &EdgeAttributes) -> bool {
        if attributes.is_transfer() {
            return attributes.contains(self.name(), "yes");
        }
        if attributes.is_route() {
            return false;
        }
        let Some(highway) = attributes.get("highway") else {
            return false;
        };
        if let Some(value) = attributes.get(self.access_key()) {
            return access_granted(value);
        }
        if let Some(value) = attributes.get("access") {
            if !access_granted(value) {
                return false;
            }
        }
        self.default_highway_access(highway)
    }

    fn default_highway_access(&self, highway: &str) -> bool {
        match self {
            TravelMode::Pedestrian => !matches!(
                highway,
                "motorway" | "motorway_link" | "trunk" | "trunk_link" | "raceway" | "proposed"
                    | "construction"
            ),
            TravelMode::Bicycle => !matches!(
                highway,
                "motorway"
                    | "motorway_link"
                    | "trunk"
                    | "trunk_link"
                    | "footway"
                    | "pedestrian"
                    | "steps"
                    | "raceway"
                    | "proposed"
                    | "construction"
            ),
            TravelMode::Car => matches!(
                highway,
                "motorway"
                    | "motorway_link"
                    | "trunk"
                    | "trunk_link"
                    | "primary"
                    | "primary_link"
                    | "secondary"
                    | "secondary_link"
                    | "tertiary"
                    | "tertiary_link"
                    | "unclassified"
                    | "residential"
                    | "living_street"
                    | "service"
                    | "road"
            ),
        }
    }
}

fn access_granted(value: &str) -> bool {
    !matches!(value, "no" | "private" | "agricultural" | "forestry" | "delivery")
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pedestrian" | "walk" | "foot" => Ok(TravelMode::Pedestrian),
            "bicycle" | "bike" => Ok(TravelMode::Bicycle),
            "car" | "drive" => Ok(TravelMode::Car),
            other => Err(format!("unknown travel mode '{other}'")),
        }
    }
}
