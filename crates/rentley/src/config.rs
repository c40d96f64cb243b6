//! Profile + flag resolution into client settings.
//!
//! The config file provides profiles; global CLI flags override. The
//! CLI never talks to figment directly beyond this module.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use rentley_api::TransportConfig;
use rentley_config::{Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything needed to build an `ApiClient` plus login context.
pub struct ClientSettings {
    pub base_url: Url,
    pub transport: TransportConfig,
    pub profile_name: String,
    pub username: Option<String>,
}

/// The profile name in effect: flag > config default > "default".
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the server URL and transport from config + flags.
pub fn resolve_client_settings(global: &GlobalOpts) -> Result<ClientSettings, CliError> {
    let config = rentley_config::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    // An explicitly named profile must exist; the implicit default may not.
    if global.profile.is_some() && !config.profiles.contains_key(&profile_name) {
        let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    let profile = config.profiles.get(&profile_name);

    let server = global
        .server
        .clone()
        .or_else(|| profile.map(|p| p.server.clone()))
        .ok_or_else(|| CliError::NoConfig {
            path: rentley_config::config_path().display().to_string(),
        })?;

    let base_url: Url = server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;

    let insecure = global.insecure
        || profile
            .and_then(|p| p.insecure)
            .unwrap_or(config.defaults.insecure);

    let timeout = profile.and_then(|p| p.timeout).unwrap_or(global.timeout);

    Ok(ClientSettings {
        base_url,
        transport: TransportConfig {
            timeout: Duration::from_secs(timeout),
            danger_accept_invalid_certs: insecure,
        },
        username: profile.and_then(|p| p.username.clone()),
        profile_name,
    })
}

/// Resolve a login password without prompting, if any source has one.
pub fn resolve_password_quiet(profile_name: &str) -> Option<SecretString> {
    let config = rentley_config::load_config_or_default();
    config
        .profiles
        .get(profile_name)
        .and_then(|profile: &Profile| {
            rentley_config::resolve_password(profile, profile_name).ok()
        })
        .or_else(|| std::env::var("RENTLEY_PASSWORD").ok().map(SecretString::from))
}
