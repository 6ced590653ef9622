use super::network::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransitError {
    #[error("invalid transit fusion configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading .pbf file: {source}")]
    PbfLibError { source: osmpbf::Error },
    #[error("pbf does not contain any transit route relations")]
    NoRoutesFound,
    #[error("pbf does not contain any routable highway ways")]
    NoWaysFound,
    #[error("graph store rejected an operation: {source}")]
    NetworkError {
        #[from]
        source: NetworkError,
    },
    #[error("failure writing fusion output: {0}")]
    OutputError(String),
    #[error("{0}")]
    InternalError(String),
}
