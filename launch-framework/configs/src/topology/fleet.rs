use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use thiserror::Error;

use crate::{
    constants::{
        DEFAULT_PARACHAIN_BALANCE, DEFAULT_PARACHAIN_BIN, DEFAULT_PARACHAIN_CHAIN,
        DEFAULT_PARACHAIN_ID, DEFAULT_PARACHAIN_NAME, DEFAULT_PARACHAIN_NODES,
        DEFAULT_RELAYCHAIN_BIN, DEFAULT_RELAYCHAIN_CHAIN, DEFAULT_RELAYCHAIN_NODES,
    },
    ports::PortPlan,
};

#[derive(Debug, Error)]
pub enum FleetLoadError {
    #[error("failed to read fleet file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse fleet file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Which networks to launch and which nodes each one runs.
///
/// Every field is optional in the YAML form; missing fields fall back to the
/// imbue development fleet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetSpec {
    pub relaychain: NetworkSpec,
    pub parachains: Vec<ParachainSpec>,
    pub ports: PortPlan,
}

impl Default for FleetSpec {
    fn default() -> Self {
        Self {
            relaychain: NetworkSpec::relaychain_default(),
            parachains: vec![ParachainSpec::default()],
            ports: PortPlan::default(),
        }
    }
}

impl FleetSpec {
    pub fn load_from_file(path: &Path) -> Result<Self, FleetLoadError> {
        let content = fs::read_to_string(path).map_err(|source| FleetLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| FleetLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Missing fields take the relay-chain defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkSpec {
    pub bin: String,
    pub chain: String,
    /// Node names in launch order; the first one is the primary node.
    pub nodes: Vec<String>,
    /// Additional flags appended to specific nodes, keyed by node name.
    pub node_flags: BTreeMap<String, Vec<String>>,
    pub genesis: Option<Map<String, Value>>,
}

impl NetworkSpec {
    #[must_use]
    pub fn relaychain_default() -> Self {
        Self {
            bin: DEFAULT_RELAYCHAIN_BIN.to_owned(),
            chain: DEFAULT_RELAYCHAIN_CHAIN.to_owned(),
            nodes: names(&DEFAULT_RELAYCHAIN_NODES),
            node_flags: BTreeMap::new(),
            genesis: Some(Map::new()),
        }
    }

    #[must_use]
    pub fn extra_flags(&self, node: &str) -> &[String] {
        self.node_flags.get(node).map_or(&[], Vec::as_slice)
    }
}

impl Default for NetworkSpec {
    fn default() -> Self {
        Self::relaychain_default()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "ParachainFields")]
pub struct ParachainSpec {
    /// Used in node base-path directory names.
    pub name: String,
    pub id: u32,
    pub balance: u128,
    pub network: NetworkSpec,
}

impl Default for ParachainSpec {
    fn default() -> Self {
        ParachainFields::default().into()
    }
}

/// Flat YAML form of a parachain entry; missing fields take the imbue
/// defaults.
#[serde_as]
#[derive(Deserialize)]
#[serde(default)]
struct ParachainFields {
    name: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    id: u32,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    balance: u128,
    bin: String,
    chain: String,
    nodes: Vec<String>,
    node_flags: BTreeMap<String, Vec<String>>,
    genesis: Option<Map<String, Value>>,
}

impl Default for ParachainFields {
    fn default() -> Self {
        Self {
            name: DEFAULT_PARACHAIN_NAME.to_owned(),
            id: DEFAULT_PARACHAIN_ID,
            balance: DEFAULT_PARACHAIN_BALANCE,
            bin: DEFAULT_PARACHAIN_BIN.to_owned(),
            chain: DEFAULT_PARACHAIN_CHAIN.to_owned(),
            nodes: names(&DEFAULT_PARACHAIN_NODES),
            node_flags: BTreeMap::new(),
            genesis: None,
        }
    }
}

impl From<ParachainFields> for ParachainSpec {
    fn from(fields: ParachainFields) -> Self {
        Self {
            name: fields.name,
            id: fields.id,
            balance: fields.balance,
            network: NetworkSpec {
                bin: fields.bin,
                chain: fields.chain,
                nodes: fields.nodes,
                node_flags: fields.node_flags,
                genesis: fields.genesis,
            },
        }
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}
