use std::fmt::Write as _;
use serde::{Deserialize, Serialize};
use dnssd_validate::ServiceDefinition;
use crate::manifest::Manifest;
use crate::mdns::advertise;

#[derive(Debug, Serialize)]
pub struct Report {
    pub passed: usize,
    pub failed: usize,
    pub services: Vec<ServiceReport>,
}

#[derive(Debug, Serialize)]
pub struct ServiceReport {
    pub instance: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Ok { fullname: String, txt_entries: usize },
    Error { message: String },
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for service in &self.services {
            let _ = match &service.outcome {
                Outcome::Ok { fullname, .. } => writeln!(out, "ok    {}", fullname),
                Outcome::Error { message } => {
                    writeln!(out, "error {}: {}", service.instance, message)
                }
            };
        }
        let _ = writeln!(out, "{} passed, {} failed", self.passed, self.failed);
        out
    }
}

/// Validates every service in the manifest. A failing service never stops
/// the others. `fallback_host` is used when neither the service nor the
/// manifest defaults name a host.
pub fn lint(manifest: &Manifest, fallback_host: &str) -> Report {
    let mut services = Vec::with_capacity(manifest.services.len());

    for (idx, raw) in manifest.services.iter().enumerate() {
        let instance = raw
            .get("instance")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("<service #{}>", idx + 1));

        let outcome = match ServiceDefinition::deserialize(raw.clone()) {
            Ok(def) => check(&def, manifest, fallback_host),
            Err(e) => Outcome::Error {
                message: format!("invalid service entry: {}", e.message()),
            },
        };

        if let Outcome::Error { message } = &outcome {
            tracing::warn!("{}: {}", instance, message);
        }

        services.push(ServiceReport { instance, outcome });
    }

    let failed = services
        .iter()
        .filter(|s| matches!(s.outcome, Outcome::Error { .. }))
        .count();
    let passed = services.len() - failed;

    tracing::info!("Checked {} services: {} passed, {} failed", services.len(), passed, failed);

    Report { passed, failed, services }
}

fn check(def: &ServiceDefinition, manifest: &Manifest, fallback_host: &str) -> Outcome {
    let host = def
        .host
        .as_deref()
        .or(manifest.defaults.host.as_deref())
        .unwrap_or(fallback_host);

    match advertise::build_service_info(def, host, &manifest.defaults.domain) {
        Ok(info) => Outcome::Ok {
            fullname: info.get_fullname().to_string(),
            txt_entries: def.txt.len(),
        },
        Err(e) => Outcome::Error {
            message: format!("{:#}", e),
        },
    }
}
