use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| owned.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

// =============================================================================
// from_lookup
// =============================================================================

#[test]
fn defaults_when_unset() {
    let cfg = PortalConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn parses_overrides() {
    let cfg = PortalConfig::from_lookup(lookup(&[("PORTAL_HOST", "127.0.0.1"), ("PORT", " 8080 ")])).unwrap();
    assert_eq!(cfg.addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = PortalConfig::from_lookup(lookup(&[("PORTAL_HOST", "  "), ("PORT", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.host.is_unspecified());
}

#[test]
fn invalid_port_is_reported() {
    let err = PortalConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".to_owned() });
    assert_eq!(err.to_string(), "invalid PORT: \"eighty\"");
}

#[test]
fn out_of_range_port_is_reported() {
    let err = PortalConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
}

#[test]
fn invalid_host_is_reported() {
    let err = PortalConfig::from_lookup(lookup(&[("PORTAL_HOST", "not-an-ip")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORTAL_HOST", .. }));
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_reads_process_environment() {
    let saved_port = std::env::var("PORT").ok();
    let saved_host = std::env::var("PORTAL_HOST").ok();
    unsafe {
        std::env::set_var("PORT", "4010");
        std::env::set_var("PORTAL_HOST", "127.0.0.1");
    }

    let cfg = PortalConfig::from_env().unwrap();
    assert_eq!(cfg.addr().to_string(), "127.0.0.1:4010");

    unsafe {
        match saved_port {
            Some(v) => std::env::set_var("PORT", v),
            None => std::env::remove_var("PORT"),
        }
        match saved_host {
            Some(v) => std::env::set_var("PORTAL_HOST", v),
            None => std::env::remove_var("PORTAL_HOST"),
        }
    }
}
