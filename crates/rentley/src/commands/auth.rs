//! Login, logout, and whoami handlers.

use owo_colors::OwoColorize;
use secrecy::SecretString;

use rentley_api::ApiClient;
use rentley_core::{Principal, SessionStore};

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::session;

pub async fn login(
    client: &ApiClient,
    store: &SessionStore,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cfg = rentley_config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let username = match args
        .username
        .or_else(|| cfg.profiles.get(&profile_name).and_then(|p| p.username.clone()))
    {
        Some(name) => name,
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };

    let password = match config::resolve_password_quiet(&profile_name) {
        Some(secret) => secret,
        None => SecretString::from(
            rpassword::prompt_password("Password: ")
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
        ),
    };

    let login = client
        .login(&username, &password)
        .await
        .map_err(|err| match err {
            rentley_api::Error::Authentication { message } => CliError::AuthFailed { message },
            other => other.into(),
        })?;

    rentley_config::store_token(&SecretString::from(login.token.clone()))?;

    let principal = Principal::from(login.user);
    let who = principal.display_name();
    let role = principal
        .raw_role_name()
        .unwrap_or("no role")
        .to_owned();
    store.replace(principal);

    if !global.quiet {
        if output::should_color(&global.color) {
            eprintln!("{} Logged in as {who} ({role})", "✓".green());
        } else {
            eprintln!("Logged in as {who} ({role})");
        }
    }
    Ok(())
}

pub async fn logout(client: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    session::attach_token(client);

    if client.has_token() {
        // Best-effort server-side logout; the local token dies either way.
        if let Err(err) = client.logout().await {
            tracing::warn!(error = %err, "server logout failed (non-fatal)");
        }
    }
    rentley_config::clear_token()?;

    if !global.quiet {
        eprintln!("Logged out");
    }
    Ok(())
}

pub async fn register(
    client: &ApiClient,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    let request = rentley_api::types::RegisterRequest {
        username: args.username.clone(),
        email: args.email,
        password,
        first_name: args.first_name,
        last_name: args.last_name,
        phone_number: args.phone,
        address: None,
        city_id: None,
    };
    client.register(&request).await?;

    if !global.quiet {
        eprintln!("Account '{}' created. Next: rentley login", args.username);
    }
    Ok(())
}

pub async fn change_password(
    client: &ApiClient,
    store: &SessionStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session::restore(client, store).await?;

    let old = rpassword::prompt_password("Current password: ")
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    let new = rpassword::prompt_password("New password: ")
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    if new.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "new password cannot be empty".into(),
        });
    }

    client
        .change_password(&SecretString::from(old), &SecretString::from(new))
        .await?;

    if !global.quiet {
        eprintln!("Password changed");
    }
    Ok(())
}

pub async fn whoami(
    client: &ApiClient,
    store: &SessionStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let principal = session::restore(client, store).await?;

    let out = output::render_single(
        &global.output,
        principal.as_ref(),
        |p| {
            let mut lines = vec![
                format!("User:     {} (id {})", p.display_name(), p.user_id),
                format!("Username: {}", p.username),
            ];
            if let Some(ref email) = p.email {
                lines.push(format!("Email:    {email}"));
            }
            match (p.raw_role_name(), p.canonical_role()) {
                (Some(raw), Some(role)) => lines.push(format!("Role:     {role} ({raw})")),
                (Some(raw), None) => lines.push(format!("Role:     {raw} (unrecognized)")),
                _ => lines.push("Role:     none".into()),
            }
            lines.join("\n")
        },
        |p| p.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
