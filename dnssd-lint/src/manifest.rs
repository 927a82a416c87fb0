use std::path::Path;
use serde::Deserialize;
use anyhow::{bail, Context, Result};
use dnssd_validate::protocol::LOCAL_DOMAIN;
use dnssd_validate::validate;

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub defaults: Defaults,
    /// Raw `[[service]]` tables. Each one is decoded on its own so a
    /// malformed entry is reported without hiding the rest.
    #[serde(default, rename = "service")]
    pub services: Vec<toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    /// Host label used when a service doesn't name one
    pub host: Option<String>,
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_domain() -> String {
    LOCAL_DOMAIN.to_string()
}

impl Defaults {
    /// The domain must be fully qualified and every part a valid label
    pub fn validate(&self) -> Result<()> {
        let Some(labels) = self.domain.strip_suffix('.') else {
            bail!("Domain '{}' must end with '.'", self.domain);
        };
        for part in labels.split('.') {
            validate::label_as(part, "Domain")?;
        }
        if let Some(host) = &self.host {
            validate::label_as(host, "Hostname")?;
        }
        Ok(())
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            host: None,
            domain: default_domain(),
        }
    }
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(contents)?;
        manifest.defaults.validate()?;
        Ok(manifest)
    }
}
