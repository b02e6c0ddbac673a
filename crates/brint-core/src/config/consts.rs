//! Constants shared by config discovery

/// Name of the config file searched in parent directories
pub const CONFIG_FILE_NAME: &str = "Brint.toml";
