use std::path::PathBuf;

use launch_framework_env as lf_env;

use crate::ports::PortBases;

/// Port bases for relay-chain nodes.
pub const RELAYCHAIN_PORT_BASES: PortBases = PortBases {
    p2p: 30300,
    rpc: 9900,
    ws: 9914,
};

/// Port bases for the first parachain; later parachains are shifted by
/// [`PARACHAIN_PORT_STRIDE`].
pub const PARACHAIN_PORT_BASES: PortBases = PortBases {
    p2p: 30400,
    rpc: 9930,
    ws: 9942,
};

/// Offset between the port ranges of consecutive parachains.
pub const PARACHAIN_PORT_STRIDE: u16 = 100;

/// Prometheus port exposed by the first parachain's primary node.
pub const PARACHAIN_PRIMARY_PROMETHEUS_PORT: u16 = 9610;

/// Label used in relay-chain node base paths.
pub const RELAYCHAIN_LABEL: &str = "relaychain";

pub const DEFAULT_RELAYCHAIN_BIN: &str = "/polkadot";
pub const DEFAULT_RELAYCHAIN_CHAIN: &str = "rococo-dev";
pub const DEFAULT_RELAYCHAIN_NODES: [&str; 6] = ["alice", "bob", "charlie", "dave", "eve", "ferdie"];

pub const DEFAULT_PARACHAIN_NAME: &str = "imbue";
pub const DEFAULT_PARACHAIN_BIN: &str = "/imbue";
pub const DEFAULT_PARACHAIN_CHAIN: &str = "imbue-dev";
pub const DEFAULT_PARACHAIN_ID: u32 = 2102;
pub const DEFAULT_PARACHAIN_BALANCE: u128 = 1_000_000_000_000_000_000_000;
pub const DEFAULT_PARACHAIN_NODES: [&str; 2] = ["alice", "bob"];

/// Resolve the node base-path root from `POLKADOT_LAUNCH_BASE_PATH_BASE`.
/// Unset (or empty) means nodes get no base path.
pub fn base_path_root() -> Option<PathBuf> {
    lf_env::base_path_root()
}
