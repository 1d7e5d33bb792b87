use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::ports::PortKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyInvariantError {
    #[error("network {network} must have at least one node")]
    EmptyNetwork { network: String },
    #[error("network name {network} is used more than once")]
    DuplicateNetworkName { network: String },
    #[error("node name {name} appears more than once in network {network}")]
    DuplicateNodeName { network: String, name: String },
    #[error("port {port} is assigned to both {first} and {second}")]
    PortCollision {
        port: u16,
        first: PortOwner,
        second: PortOwner,
    },
}

/// Identifies who holds a port, for collision reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortOwner {
    pub network: String,
    pub node: String,
    pub kind: PortKind,
}

impl std::fmt::Display for PortOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({})", self.network, self.node, self.kind)
    }
}

/// Check the node list of one network before any port is handed out.
pub fn validate_node_names(network: &str, names: &[String]) -> Result<(), TopologyInvariantError> {
    if names.is_empty() {
        return Err(TopologyInvariantError::EmptyNetwork {
            network: network.to_owned(),
        });
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(TopologyInvariantError::DuplicateNodeName {
                network: network.to_owned(),
                name: name.clone(),
            });
        }
    }

    Ok(())
}

/// Network names label node base paths, so they must not repeat across the
/// fleet (the relay chain's label included).
pub fn validate_network_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), TopologyInvariantError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TopologyInvariantError::DuplicateNetworkName {
                network: name.to_owned(),
            });
        }
    }
    Ok(())
}

/// Tracks every port claimed across the fleet, regardless of kind.
#[derive(Debug, Default)]
pub struct PortRegistry {
    claimed: HashMap<u16, PortOwner>,
}

impl PortRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, port: u16, owner: PortOwner) -> Result<(), TopologyInvariantError> {
        if let Some(first) = self.claimed.get(&port) {
            return Err(TopologyInvariantError::PortCollision {
                port,
                first: first.clone(),
                second: owner,
            });
        }
        self.claimed.insert(port, owner);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
