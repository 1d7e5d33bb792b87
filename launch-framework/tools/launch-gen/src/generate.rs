use std::path::{Path, PathBuf};

use launch_framework_config::{
    FleetLoadError, FleetSpec, LaunchConfiguration, TopologyBuildError, build_configuration,
    constants,
};
use launch_framework_env as lf_env;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Fleet(#[from] FleetLoadError),
    #[error("failed to build launch configuration: {0}")]
    Topology(#[from] TopologyBuildError),
}

/// Inputs for one generation run. Unset fields fall back to the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// YAML fleet definition; the imbue development fleet when absent.
    pub config: Option<PathBuf>,
    /// Root for per-node base paths; nodes get none when absent.
    pub base_path_root: Option<PathBuf>,
}

impl GenerateOptions {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            config: lf_env::launch_config_file(),
            base_path_root: constants::base_path_root(),
        }
    }

    /// Fill unset fields from `fallback`. Empty paths count as unset.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            config: non_empty(self.config).or_else(|| non_empty(fallback.config)),
            base_path_root: non_empty(self.base_path_root)
                .or_else(|| non_empty(fallback.base_path_root)),
        }
    }
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

pub fn load_fleet(config: Option<&Path>) -> Result<FleetSpec, FleetLoadError> {
    match config {
        Some(path) => {
            info!(path = %path.display(), "loading fleet definition");
            FleetSpec::load_from_file(path)
        }
        None => {
            debug!("no fleet definition given, using the imbue development fleet");
            Ok(FleetSpec::default())
        }
    }
}

pub fn generate(options: &GenerateOptions) -> Result<LaunchConfiguration, GenerateError> {
    let fleet = load_fleet(options.config.as_deref())?;
    let base_path_root = non_empty(options.base_path_root.clone());
    Ok(build_configuration(&fleet, base_path_root.as_deref())?)
}
