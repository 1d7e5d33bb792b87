//! Builds the launch configuration for a local relay chain and its
//! parachains: one port triple per node, optional per-node base paths and
//! layered command-line flags.

pub mod constants;
pub mod flags;
pub mod nodes;
pub mod ports;
pub mod topology;

pub use topology::{
    TopologyBuildError,
    fleet::{FleetLoadError, FleetSpec, NetworkSpec, ParachainSpec},
    launch::{LaunchConfiguration, build_configuration},
    network::{NetworkDescriptor, NetworkKind, build_network},
};
