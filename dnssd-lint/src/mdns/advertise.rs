use mdns_sd::{ServiceInfo, TxtProperty};
use anyhow::{Context, Result};
use dnssd_validate::{validate, ServiceDefinition, TxtRecord};

/// Builds the mDNS registration record for an advertisement.
///
/// The definition is validated first; nothing is registered.
pub fn build_service_info(def: &ServiceDefinition, host: &str, domain: &str) -> Result<ServiceInfo> {
    def.validate()?;
    validate::label_as(host, "Hostname")?;
    let port = validate::port_number(def.port)?;

    // mdns-sd carries at most one subtype, as part of the type domain
    let ty_domain = def
        .service_type
        .subtype_domains(domain)
        .into_iter()
        .next()
        .unwrap_or_else(|| def.service_type.qualified(domain));

    let host_name = format!("{}.{}", host, domain);
    let addresses = def.addresses.join(",");

    let service_info = ServiceInfo::new(
        &ty_domain,
        &def.instance,
        &host_name,
        addresses.as_str(),
        port,
        txt_properties(&def.txt),
    )
    .with_context(|| {
        format!("Failed to create ServiceInfo for {} with addresses '{}'", def.instance, addresses)
    })?;

    let service_info = if def.addresses.is_empty() {
        service_info.enable_addr_auto()
    } else {
        service_info
    };

    tracing::debug!(
        "Built {} as {} on port {}",
        ty_domain,
        service_info.get_fullname(),
        port
    );

    Ok(service_info)
}

/// Booleans become bare keys, everything else `key=value`
fn txt_properties(txt: &TxtRecord) -> Vec<TxtProperty> {
    txt.iter()
        .map(|(key, value)| match value.encoded() {
            None => TxtProperty::from(key),
            Some(bytes) => TxtProperty::from((key, bytes.into_owned())),
        })
        .collect()
}
