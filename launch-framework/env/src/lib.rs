use std::{env, path::PathBuf};

/// Root directory under which every node gets its own working directory.
///
/// An empty value counts as unset, so nodes fall back to the launcher's
/// default base path.
#[must_use]
pub fn base_path_root() -> Option<PathBuf> {
    non_empty(env::var("POLKADOT_LAUNCH_BASE_PATH_BASE").ok()).map(PathBuf::from)
}

#[must_use]
pub fn launch_config_file() -> Option<PathBuf> {
    non_empty(env::var("LAUNCH_CONFIG_FILE").ok()).map(PathBuf::from)
}

#[must_use]
pub fn rust_log() -> Option<String> {
    env::var("RUST_LOG").ok()
}

/// Treats an empty string the same as a missing variable.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
