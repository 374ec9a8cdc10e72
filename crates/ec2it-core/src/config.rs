//! Configuration file loading and parsing
//!
//! Defaults live in `ec2it.toml`, searched for in the working directory and
//! its parents, then in the user config directory. Every field is optional;
//! a host with no config file gets empty defaults and only `launch` cares.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Configuration file name searched for in the working directory and parents
const CONFIG_FILE_NAME: &str = "ec2it.toml";

/// File name under the user config directory (`<config>/ec2it/config.toml`)
const USER_CONFIG_DIR: &str = "ec2it";
const USER_CONFIG_FILE: &str = "config.toml";

/// Loaded ec2it configuration, immutable after load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ec2itConfig {
    /// Instance launch defaults
    #[serde(default)]
    pub instance: InstanceDefaults,

    /// VPC placement defaults
    #[serde(default)]
    pub vpc: VpcDefaults,
}

/// `[instance]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDefaults {
    /// Instance type used by `launch` when none is given
    #[serde(default)]
    pub default_instance_type: Option<String>,

    /// Security group always included in launched instances
    #[serde(default)]
    pub default_security_group: Option<String>,
}

/// `[vpc]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcDefaults {
    /// Availability zone used by `launch` when none is given
    #[serde(default)]
    pub default_availability_zone: Option<String>,
}

impl Ec2itConfig {
    /// Load configuration from the specified path or search for it
    ///
    /// An explicit path that does not exist is an error; an unsuccessful
    /// search yields the empty default config.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(p.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            return Self::parse(&content);
        }

        match Self::find_config()? {
            Some((path, content)) => {
                debug!(config = %path, "loaded configuration");
                Self::parse(&content)
            }
            None => {
                debug!("no configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Find `ec2it.toml` in the current directory or parent directories,
    /// then `config.toml` under the user config directory
    fn find_config() -> Result<Option<(Utf8PathBuf, String)>> {
        let cwd = std::env::current_dir().map_err(Error::Io)?;
        if let Ok(cwd) = Utf8PathBuf::try_from(cwd) {
            let mut current = cwd.as_path();
            loop {
                let path = current.join(CONFIG_FILE_NAME);
                if path.exists() {
                    let content = fs::read_to_string(&path)?;
                    return Ok(Some((path, content)));
                }
                match current.parent() {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
        }

        if let Some(dir) = dirs::config_dir() {
            let path = dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let path = Utf8PathBuf::try_from(path)
                    .unwrap_or_else(|_| Utf8PathBuf::from(USER_CONFIG_FILE));
                return Ok(Some((path, content)));
            }
        }

        Ok(None)
    }
}
