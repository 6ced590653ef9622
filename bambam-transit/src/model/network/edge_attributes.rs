use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// an ordered set of key/value attributes describing an edge. ordering makes
/// two collections with the same entries equal and hash identically, which
/// is what profile interning relies on.
#[derive(Default, Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EdgeAttributes(BTreeMap<String, String>);

impl EdgeAttributes {
    pub const TYPE_KEY: &'static str = "type";
    pub const ROUTE_KEY: &'static str = "route";
    pub const TRANSFER_TYPE: &'static str = "transfer";
    pub const ROUTE_TYPE: &'static str = "route";

    pub fn new() -> EdgeAttributes {
        EdgeAttributes(BTreeMap::new())
    }

    /// builder-style insert that overwrites any existing value for the key.
    pub fn with(mut self, key: &str, value: &str) -> EdgeAttributes {
        self.add_or_replace(key, value);
        self
    }

    pub fn add_or_replace(&mut self, key: &str, value: &str) {
        let _ = self.0.insert(String::from(key), String::from(value));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// true if this collection describes a stop-to-network transfer link.
    pub fn is_transfer(&self) -> bool {
        self.contains(Self::TYPE_KEY, Self::TRANSFER_TYPE)
    }

    /// true if this collection describes a stop-to-stop transit route link.
    pub fn is_route(&self) -> bool {
        self.contains(Self::TYPE_KEY, Self::ROUTE_TYPE)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for EdgeAttributes {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut out = EdgeAttributes::new();
        for (k, v) in iter {
            out.add_or_replace(k, v);
        }
        out
    }
}

impl Display for EdgeAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";");
        write!(f, "{s}")
    }
}
