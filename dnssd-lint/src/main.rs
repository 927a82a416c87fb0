mod lint;
mod manifest;
mod mdns;

use anyhow::{Context, Result};
use crate::manifest::Manifest;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dnssd_lint=info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let manifest_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "dnssd.toml".to_string());

    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest from {}", manifest_path))?;

    tracing::info!("Loaded {} services from {}", manifest.services.len(), manifest_path);

    let fallback_host = system_host_label()?;
    let report = lint::lint(&manifest, &fallback_host);

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        print!("{}", report.to_text());
    }

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

/// First label of the system hostname
fn system_host_label() -> Result<String> {
    let hostname = hostname::get()
        .context("Failed to get system hostname")?
        .to_string_lossy()
        .to_string();

    Ok(hostname
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string())
}
