use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    constants::RELAYCHAIN_LABEL,
    nodes::NodeDescriptor,
    ports::PortKind,
    topology::{
        TopologyBuildError,
        fleet::FleetSpec,
        invariants::{PortOwner, PortRegistry, validate_network_names},
        network::{NetworkDescriptor, NetworkKind, build_network},
    },
};

/// Root object handed to the launcher.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfiguration {
    pub relaychain: NetworkDescriptor,
    pub parachains: Vec<NetworkDescriptor>,
    pub simple_parachains: Vec<Value>,
    pub hrmp_channels: Vec<Value>,
    pub types: Map<String, Value>,
    pub finalization: bool,
}

impl LaunchConfiguration {
    /// Relay chain plus the imbue parachain with default node sets.
    pub fn imbue_dev(base_path_root: Option<&Path>) -> Result<Self, TopologyBuildError> {
        build_configuration(&FleetSpec::default(), base_path_root)
    }

    /// All networks, relay chain first.
    pub fn networks(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        std::iter::once(&self.relaychain).chain(&self.parachains)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.networks().flat_map(|network| &network.nodes)
    }
}

/// Build the whole fleet. Each call owns its allocators, so repeated calls
/// with the same inputs produce identical configurations.
pub fn build_configuration(
    fleet: &FleetSpec,
    base_path_root: Option<&Path>,
) -> Result<LaunchConfiguration, TopologyBuildError> {
    validate_network_names(
        std::iter::once(RELAYCHAIN_LABEL)
            .chain(fleet.parachains.iter().map(|parachain| parachain.name.as_str())),
    )?;

    let plan = fleet.ports;
    let mut registry = PortRegistry::new();

    let mut allocator = plan.relaychain_allocator();
    let relaychain = build_network(
        NetworkKind::Relaychain,
        RELAYCHAIN_LABEL,
        &fleet.relaychain,
        &mut allocator,
        base_path_root,
    )?;
    claim_network_ports(&mut registry, RELAYCHAIN_LABEL, &relaychain)?;

    let mut parachains = Vec::with_capacity(fleet.parachains.len());
    for (index, parachain) in fleet.parachains.iter().enumerate() {
        let prometheus_port = plan.parachain_prometheus_port(index)?;
        let kind = NetworkKind::Parachain {
            id: parachain.id,
            balance: parachain.balance,
            prometheus_port,
        };
        let mut allocator = plan.parachain_allocator(index)?;
        let network = build_network(
            kind,
            &parachain.name,
            &parachain.network,
            &mut allocator,
            base_path_root,
        )?;
        claim_network_ports(&mut registry, &parachain.name, &network)?;
        if let Some(primary) = network.primary() {
            registry.claim(
                prometheus_port,
                owner(&parachain.name, &primary.name, PortKind::Prometheus),
            )?;
        }
        parachains.push(network);
    }

    info!(
        parachains = parachains.len(),
        ports = registry.len(),
        base_paths = base_path_root.is_some_and(|root| !root.as_os_str().is_empty()),
        "launch configuration built"
    );

    Ok(LaunchConfiguration {
        relaychain,
        parachains,
        simple_parachains: Vec::new(),
        hrmp_channels: Vec::new(),
        types: Map::new(),
        finalization: false,
    })
}

fn claim_network_ports(
    registry: &mut PortRegistry,
    label: &str,
    network: &NetworkDescriptor,
) -> Result<(), TopologyBuildError> {
    for node in &network.nodes {
        for (kind, port) in node.allocation().ports() {
            registry.claim(port, owner(label, &node.name, kind))?;
        }
    }
    Ok(())
}

fn owner(network: &str, node: &str, kind: PortKind) -> PortOwner {
    PortOwner {
        network: network.to_owned(),
        node: node.to_owned(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        ports::PortBases,
        topology::{fleet::ParachainSpec, invariants::TopologyInvariantError},
    };

    #[test]
    fn default_fleet_ports_are_unique() {
        let config = LaunchConfiguration::imbue_dev(None).unwrap();
        let mut seen = HashSet::new();
        for node in config.nodes() {
            for (_, port) in node.allocation().ports() {
                assert!(seen.insert(port), "port {port} reused");
            }
        }
        assert_eq!(seen.len(), 8 * 3);
    }

    #[test]
    fn repeated_builds_are_identical() {
        let root = Path::new("/tmp/launch");
        let first = LaunchConfiguration::imbue_dev(Some(root)).unwrap();
        let second = LaunchConfiguration::imbue_dev(Some(root)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn additional_parachains_get_their_own_ranges() {
        let mut fleet = FleetSpec::default();
        let mut sibling = ParachainSpec::default();
        sibling.name = "sibling".into();
        sibling.id = 2103;
        fleet.parachains.push(sibling);

        let config = build_configuration(&fleet, None).unwrap();
        let sibling = &config.parachains[1];
        assert_eq!(sibling.nodes[0].port, 30500);
        assert_eq!(sibling.nodes[0].rpc_port, 10030);
        assert_eq!(sibling.nodes[0].ws_port, 10042);
        assert_eq!(sibling.nodes[0].flags[0], "--prometheus-port=9611");
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        let mut fleet = FleetSpec::default();
        fleet.ports.parachain = PortBases {
            p2p: 30302,
            rpc: 9930,
            ws: 9942,
        };

        let err = build_configuration(&fleet, None).unwrap_err();
        assert!(matches!(
            err,
            TopologyBuildError::Invariants(TopologyInvariantError::PortCollision { port: 30302, .. })
        ));
    }

    #[test]
    fn repeated_parachain_names_are_rejected() {
        let mut fleet = FleetSpec::default();
        let mut twin = ParachainSpec::default();
        twin.id = 2103;
        fleet.parachains.push(twin);

        let err = build_configuration(&fleet, Some(Path::new("/data"))).unwrap_err();
        assert!(matches!(
            err,
            TopologyBuildError::Invariants(TopologyInvariantError::DuplicateNetworkName { ref network })
                if network == "imbue"
        ));
    }

    #[test]
    fn parachain_named_like_the_relay_chain_is_rejected() {
        let mut fleet = FleetSpec::default();
        fleet.parachains[0].name = RELAYCHAIN_LABEL.to_owned();

        let err = build_configuration(&fleet, None).unwrap_err();
        assert!(matches!(
            err,
            TopologyBuildError::Invariants(TopologyInvariantError::DuplicateNetworkName { .. })
        ));
    }

    #[test]
    fn empty_root_degrades_to_no_base_path() {
        let config = LaunchConfiguration::imbue_dev(Some(Path::new(""))).unwrap();
        assert!(config.nodes().all(|node| node.base_path.is_none()));
    }

    #[test]
    fn placeholders_are_empty() {
        let config = LaunchConfiguration::imbue_dev(None).unwrap();
        assert!(config.simple_parachains.is_empty());
        assert!(config.hrmp_channels.is_empty());
        assert!(config.types.is_empty());
        assert!(!config.finalization);
    }
}
