pub mod fleet;
pub mod invariants;
pub mod launch;
pub mod network;

use thiserror::Error;

use crate::ports::PortError;

#[derive(Debug, Error)]
pub enum TopologyBuildError {
    #[error(transparent)]
    Invariants(#[from] invariants::TopologyInvariantError),
    #[error(transparent)]
    Ports(#[from] PortError),
}
