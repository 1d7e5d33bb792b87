use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{flags::FlagLayers, ports::PortAllocation};

/// One node process for the launcher to spawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub name: String,
    pub ws_port: u16,
    pub port: u16,
    pub rpc_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,
    pub flags: Vec<String>,
    /// Set for the first node of its network; not part of the launcher format.
    #[serde(skip)]
    pub primary: bool,
}

impl NodeDescriptor {
    #[must_use]
    pub const fn allocation(&self) -> PortAllocation {
        PortAllocation {
            p2p: self.port,
            rpc: self.rpc_port,
            ws: self.ws_port,
        }
    }
}

/// Where a node sits in its network's launch order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePosition {
    Primary,
    /// Zero-based index among the non-primary nodes.
    Secondary(usize),
}

impl NodePosition {
    /// The first node of a network is its primary.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index.checked_sub(1) {
            None => Self::Primary,
            Some(secondary) => Self::Secondary(secondary),
        }
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Build a node descriptor. An empty `base_path_root` counts as absent.
#[must_use]
pub fn build_node(
    name: &str,
    position: NodePosition,
    allocation: PortAllocation,
    base_path_root: Option<&Path>,
    network_label: &str,
    layers: FlagLayers,
) -> NodeDescriptor {
    let base_path = base_path_root
        .filter(|root| !root.as_os_str().is_empty())
        .map(|root| node_base_path(root, name, position, network_label));
    NodeDescriptor {
        name: name.to_owned(),
        ws_port: allocation.ws,
        port: allocation.p2p,
        rpc_port: allocation.rpc,
        base_path,
        flags: layers.compose(),
        primary: position.is_primary(),
    }
}

/// `<root>/<name>-<label>` for the primary node, `<root>/<name>-<i>-<label>`
/// for the `i`-th secondary.
#[must_use]
pub fn node_base_path(
    root: &Path,
    name: &str,
    position: NodePosition,
    network_label: &str,
) -> PathBuf {
    let dir = match position {
        NodePosition::Primary => format!("{name}-{network_label}"),
        NodePosition::Secondary(i) => format!("{name}-{i}-{network_label}"),
    };
    root.join(dir)
}
