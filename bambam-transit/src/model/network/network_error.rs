use super::{EdgeId, VertexId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("attempting to get vertex '{0}' not in network")]
    MissingVertex(VertexId),
    #[error("attempting to get edge '{0}' not in network")]
    MissingEdge(EdgeId),
    #[error("refusing to add edge from vertex '{0}' to itself")]
    SelfLoop(VertexId),
    #[error("edge distance {0} exceeds the network maximum of {1} meters")]
    EdgeTooLong(f32, f32),
    #[error("edge profile table is full, cannot intern profile #{0}")]
    ProfileTableFull(usize),
    #[error("vertex index space exhausted at {0} vertices")]
    VertexSpaceExhausted(usize),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure writing network: {0}")]
    IoError(String),
}
