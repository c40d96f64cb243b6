//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use rentley_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = rentley_config::config_path();
            eprintln!("rentley — configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let server: String = Input::new()
                .with_prompt("API base URL")
                .default("http://localhost:8080/api".into())
                .interact_text()
                .map_err(prompt_err)?;

            let username: String = Input::new()
                .with_prompt("Username")
                .interact_text()
                .map_err(prompt_err)?;

            let password = rpassword::prompt_password("Password (empty to skip): ")
                .map_err(prompt_err)?;

            let password_field = if password.is_empty() {
                None
            } else {
                let store_choices = &[
                    "Store in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let store_selection = Select::new()
                    .with_prompt("Where to store the password?")
                    .items(store_choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;

                if store_selection == 0 {
                    rentley_config::store_password(
                        &profile_name,
                        &SecretString::from(password),
                    )?;
                    eprintln!("   password stored in system keyring");
                    None
                } else {
                    Some(password)
                }
            };

            let mut cfg = rentley_config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    server,
                    username: Some(username),
                    password: password_field,
                    password_env: None,
                    insecure: None,
                    timeout: None,
                },
            );
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            rentley_config::save_config(&cfg)?;

            eprintln!("\nProfile '{profile_name}' saved. Next: rentley login");
            Ok(())
        }

        // ── Show resolved config ────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = rentley_config::load_config_or_default();
            let toml_str = toml::to_string_pretty(&redacted(&cfg)).map_err(|e| {
                CliError::Validation {
                    field: "config".into(),
                    reason: format!("failed to serialize config: {e}"),
                }
            })?;
            output::print_output(&toml_str, global.quiet);
            Ok(())
        }

        // ── List profiles ───────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = rentley_config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("");
            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort_unstable();
            for name in names {
                let marker = if name == default { " (default)" } else { "" };
                let server = cfg
                    .profiles
                    .get(name)
                    .map(|p| p.server.as_str())
                    .unwrap_or("");
                println!("{name}{marker}\t{server}");
            }
            Ok(())
        }

        // ── Set default profile ─────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = rentley_config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<&str> =
                    cfg.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            cfg.default_profile = Some(name.clone());
            rentley_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── Store password in keyring ───────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = rentley_config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let password =
                rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            rentley_config::store_password(&profile_name, &SecretString::from(password))?;
            if !global.quiet {
                eprintln!("Password for '{profile_name}' stored in system keyring");
            }
            Ok(())
        }
    }
}

/// Copy of the config with plaintext passwords masked for display.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: rentley_config::Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            insecure: cfg.defaults.insecure,
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                (
                    name.clone(),
                    Profile {
                        server: p.server.clone(),
                        username: p.username.clone(),
                        password: p.password.as_ref().map(|_| "********".into()),
                        password_env: p.password_env.clone(),
                        insecure: p.insecure,
                        timeout: p.timeout,
                    },
                )
            })
            .collect(),
    }
}
