use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    PARACHAIN_PORT_BASES, PARACHAIN_PORT_STRIDE, PARACHAIN_PRIMARY_PROMETHEUS_PORT,
    RELAYCHAIN_PORT_BASES,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("{kind} port range starting at {base} overflows after {count} nodes")]
    Overflow {
        kind: PortKind,
        base: u16,
        count: usize,
    },
    #[error("no port range for parachain #{index}")]
    ParachainRangeExhausted { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortKind {
    P2p,
    Rpc,
    Ws,
    Prometheus,
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::P2p => "p2p",
            Self::Rpc => "rpc",
            Self::Ws => "ws",
            Self::Prometheus => "prometheus",
        })
    }
}

/// First port of each kind for one network family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBases {
    pub p2p: u16,
    pub rpc: u16,
    pub ws: u16,
}

impl PortBases {
    fn shifted(self, offset: u16) -> Option<Self> {
        Some(Self {
            p2p: self.p2p.checked_add(offset)?,
            rpc: self.rpc.checked_add(offset)?,
            ws: self.ws.checked_add(offset)?,
        })
    }
}

/// Ports assigned to a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortAllocation {
    pub p2p: u16,
    pub rpc: u16,
    pub ws: u16,
}

impl PortAllocation {
    #[must_use]
    pub const fn ports(&self) -> [(PortKind, u16); 3] {
        [
            (PortKind::P2p, self.p2p),
            (PortKind::Rpc, self.rpc),
            (PortKind::Ws, self.ws),
        ]
    }
}

/// Allocate `count` consecutive triples; the i-th is `bases + i`.
pub fn allocate_ports(bases: PortBases, count: usize) -> Result<Vec<PortAllocation>, PortError> {
    let mut allocator = PortAllocator::new(bases);
    (0..count).map(|_| allocator.next_allocation()).collect()
}

/// Sequential allocator for a single network family.
///
/// Owned by one build pass, so rebuilding always starts from the bases again.
#[derive(Debug)]
pub struct PortAllocator {
    bases: PortBases,
    issued: usize,
}

impl PortAllocator {
    #[must_use]
    pub const fn new(bases: PortBases) -> Self {
        Self { bases, issued: 0 }
    }

    #[must_use]
    pub const fn bases(&self) -> PortBases {
        self.bases
    }

    pub fn next_allocation(&mut self) -> Result<PortAllocation, PortError> {
        let offset = self.issued;
        let allocation = PortAllocation {
            p2p: offset_port(PortKind::P2p, self.bases.p2p, offset)?,
            rpc: offset_port(PortKind::Rpc, self.bases.rpc, offset)?,
            ws: offset_port(PortKind::Ws, self.bases.ws, offset)?,
        };
        self.issued += 1;
        Ok(allocation)
    }
}

fn offset_port(kind: PortKind, base: u16, offset: usize) -> Result<u16, PortError> {
    u16::try_from(offset)
        .ok()
        .and_then(|offset| base.checked_add(offset))
        .ok_or(PortError::Overflow {
            kind,
            base,
            count: offset + 1,
        })
}

/// Port ranges partitioned per network family before any node is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortPlan {
    pub relaychain: PortBases,
    pub parachain: PortBases,
    pub parachain_stride: u16,
    pub parachain_prometheus: u16,
}

impl Default for PortPlan {
    fn default() -> Self {
        Self {
            relaychain: RELAYCHAIN_PORT_BASES,
            parachain: PARACHAIN_PORT_BASES,
            parachain_stride: PARACHAIN_PORT_STRIDE,
            parachain_prometheus: PARACHAIN_PRIMARY_PROMETHEUS_PORT,
        }
    }
}

impl PortPlan {
    #[must_use]
    pub const fn relaychain_allocator(&self) -> PortAllocator {
        PortAllocator::new(self.relaychain)
    }

    /// Allocator for the `index`-th parachain.
    pub fn parachain_allocator(&self, index: usize) -> Result<PortAllocator, PortError> {
        let bases = u16::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(self.parachain_stride))
            .and_then(|offset| self.parachain.shifted(offset))
            .ok_or(PortError::ParachainRangeExhausted { index })?;
        Ok(PortAllocator::new(bases))
    }

    /// Metrics port for the primary node of the `index`-th parachain.
    pub fn parachain_prometheus_port(&self, index: usize) -> Result<u16, PortError> {
        u16::try_from(index)
            .ok()
            .and_then(|i| self.parachain_prometheus.checked_add(i))
            .ok_or(PortError::ParachainRangeExhausted { index })
    }
}
