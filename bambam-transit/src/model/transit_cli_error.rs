use super::{network::NetworkError, TransitError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransitCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure fusing transit data: {source}")]
    TransitError {
        #[from]
        source: TransitError,
    },
    #[error("failure writing network: {source}")]
    NetworkError {
        #[from]
        source: NetworkError,
    },
}
