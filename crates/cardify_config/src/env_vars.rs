//! Environment variable handling for the Cardify application.
//!
//! Configuration values can be overridden through prefixed, nested variables
//! (`CARDIFY__SERVER__PORT`) or, for a few settings that predate the layered
//! configuration, through flat legacy names such as `WEBSITE_URL`.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "CARDIFY";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Config paths that may also be set through a flat legacy variable.
pub const LEGACY_OVERRIDES: &[(&str, &str)] = &[
    ("website.url", "WEBSITE_URL"),
    ("graphql.api_url", "API_URL"),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "server.host")
///
/// # Returns
///
/// The environment variable name (e.g., "CARDIFY__SERVER__HOST")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Look up the flat legacy variable name for a configuration path, if any.
pub fn legacy_env_var(path: &str) -> Option<&'static str> {
    LEGACY_OVERRIDES
        .iter()
        .find(|(config_path, _)| *config_path == path)
        .map(|(_, var)| *var)
}

/// Get the legacy override for a configuration path.
///
/// Empty values are treated as unset.
pub fn get_legacy_env_var(path: &str) -> Option<String> {
    legacy_env_var(path)
        .and_then(|name| env::var(name).ok())
        .filter(|value| !value.trim().is_empty())
}
