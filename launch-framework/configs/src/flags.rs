/// Flags passed to every node in the fleet.
pub const COMMON_FLAGS: [&str; 4] = [
    "--unsafe-ws-external",
    "--rpc-cors=all",
    "--rpc-external",
    "--rpc-methods=Unsafe",
];

pub const RELAYCHAIN_FAMILY_FLAGS: [&str; 1] = ["--wasm-execution=Compiled"];

/// Extra flag for the relay chain's primary node, appended last.
pub const RELAYCHAIN_PRIMARY_FLAG: &str = "--prometheus-external";

/// Parachain node flags. Everything after `--` is forwarded to the embedded
/// relay-chain node.
pub const PARACHAIN_FAMILY_FLAGS: [&str; 5] = [
    "--prometheus-external",
    "--allow-private-ipv4",
    "--execution=wasm",
    "--",
    "--prometheus-external",
];

#[must_use]
pub fn prometheus_port_flag(port: u16) -> String {
    format!("--prometheus-port={port}")
}

/// Flag sources for one node, composed in fixed precedence order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagLayers {
    /// Node-specific flags that must precede the common block.
    pub prefix: Vec<String>,
    pub common: Vec<String>,
    pub family: Vec<String>,
    /// Node-specific flags appended after the family block.
    pub suffix: Vec<String>,
}

impl FlagLayers {
    #[must_use]
    pub fn new(family: &[&str]) -> Self {
        Self {
            prefix: Vec::new(),
            common: to_owned(&COMMON_FLAGS),
            family: to_owned(family),
            suffix: Vec::new(),
        }
    }

    #[must_use]
    pub fn relaychain(primary: bool) -> Self {
        let mut layers = Self::new(&RELAYCHAIN_FAMILY_FLAGS);
        if primary {
            layers.suffix.push(RELAYCHAIN_PRIMARY_FLAG.to_owned());
        }
        layers
    }

    /// `prometheus_port` is only set for the primary node.
    #[must_use]
    pub fn parachain(prometheus_port: Option<u16>) -> Self {
        let mut layers = Self::new(&PARACHAIN_FAMILY_FLAGS);
        layers.prefix.extend(prometheus_port.map(prometheus_port_flag));
        layers
    }

    #[must_use]
    pub fn with_extra(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        self.suffix.extend(extra);
        self
    }

    /// Concatenate all layers. Repeats are kept as-is.
    #[must_use]
    pub fn compose(self) -> Vec<String> {
        let Self {
            prefix,
            common,
            family,
            suffix,
        } = self;
        prefix
            .into_iter()
            .chain(common)
            .chain(family)
            .chain(suffix)
            .collect()
    }
}

fn to_owned(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|flag| (*flag).to_owned()).collect()
}
