use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// dense index of a vertex in a [`super::GraphStore`]. indices may be
/// permuted by the store when it reorders vertices for locality.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct VertexId(pub u32);

impl VertexId {
    /// placeholder for "no vertex", never assigned to a live vertex.
    pub const NO_VERTEX: VertexId = VertexId(u32::MAX);

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::NO_VERTEX
    }
}

impl From<usize> for VertexId {
    fn from(value: usize) -> Self {
        VertexId(value as u32)
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
