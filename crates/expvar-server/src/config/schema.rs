use std::net::SocketAddr;

use serde::Deserialize;
use expvar_core::error::{ExpvarError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub publish: PublishSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExpvarError::UnsupportedVersion);
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_vars_path")]
    pub vars_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            vars_path: default_vars_path(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.vars_path.starts_with('/') {
            return Err(ExpvarError::Config(
                "server.vars_path must start with '/'".into(),
            ));
        }
        if self.vars_path == "/healthz" {
            return Err(ExpvarError::Config(
                "server.vars_path must not shadow /healthz".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ExpvarError::Config(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_vars_path() -> String {
    "/debug/vars".into()
}

/// Which environment accessors get published at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishSection {
    #[serde(default = "default_true")]
    pub cmdline: bool,

    #[serde(default = "default_true")]
    pub memstats: bool,
}

impl Default for PublishSection {
    fn default() -> Self {
        Self {
            cmdline: true,
            memstats: true,
        }
    }
}

fn default_true() -> bool {
    true
}
