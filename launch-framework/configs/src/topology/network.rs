use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use serde_with::{DisplayFromStr, serde_as};
use tracing::{debug, info};

use crate::{
    flags::FlagLayers,
    nodes::{NodeDescriptor, NodePosition, build_node},
    ports::PortAllocator,
    topology::{
        TopologyBuildError,
        fleet::NetworkSpec,
        invariants::validate_node_names,
    },
};

/// Role of a network within the fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkKind {
    Relaychain,
    Parachain {
        id: u32,
        balance: u128,
        /// Metrics port exposed by the parachain's primary node.
        prometheus_port: u16,
    },
}

impl NetworkKind {
    fn flag_layers(&self, primary: bool) -> FlagLayers {
        match self {
            Self::Relaychain => FlagLayers::relaychain(primary),
            Self::Parachain {
                prometheus_port, ..
            } => FlagLayers::parachain(primary.then_some(*prometheus_port)),
        }
    }
}

/// One chain to launch, in the launcher's JSON format.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkDescriptor {
    pub bin: String,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub chain: String,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<u128>,
    pub nodes: Vec<NodeDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genesis: Option<Map<String, Value>>,
}

impl NetworkDescriptor {
    /// The node that received the network's extra flags.
    #[must_use]
    pub fn primary(&self) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|node| node.primary)
    }
}

/// Build a network, allocating node ports in list order so the primary node
/// gets the bases.
pub fn build_network(
    kind: NetworkKind,
    label: &str,
    spec: &NetworkSpec,
    allocator: &mut PortAllocator,
    base_path_root: Option<&Path>,
) -> Result<NetworkDescriptor, TopologyBuildError> {
    validate_node_names(label, &spec.nodes)?;

    let nodes = spec
        .nodes
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let position = NodePosition::from_index(index);
            let allocation = allocator.next_allocation()?;
            let layers = kind
                .flag_layers(position.is_primary())
                .with_extra(spec.extra_flags(name).iter().cloned());
            let node = build_node(name, position, allocation, base_path_root, label, layers);
            debug!(
                network = label,
                node = %node.name,
                port = node.port,
                rpc_port = node.rpc_port,
                ws_port = node.ws_port,
                primary = node.primary,
                "node descriptor built"
            );
            Ok::<_, TopologyBuildError>(node)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (id, balance, genesis) = match kind {
        NetworkKind::Relaychain => (None, None, Some(spec.genesis.clone().unwrap_or_default())),
        NetworkKind::Parachain { id, balance, .. } => (Some(id), Some(balance), spec.genesis.clone()),
    };

    info!(network = label, chain = %spec.chain, nodes = nodes.len(), "network descriptor built");

    Ok(NetworkDescriptor {
        bin: spec.bin.clone(),
        id,
        chain: spec.chain.clone(),
        balance,
        nodes,
        genesis,
    })
}
