//! Session restore and role gating for command entry points.
//!
//! The stored token is the analogue of the browser's persisted
//! credential: restore loads it, fetches the profile, and populates the
//! session store. The gate is re-evaluated on EVERY gated command --
//! never cached -- since the principal changes with login/logout.

use std::sync::Arc;

use rentley_api::ApiClient;
use rentley_core::{AccessDecision, Principal, Redirect, Role, SessionStore, check_access};

use crate::error::CliError;

/// Restore the persisted session: token -> profile -> session store.
///
/// A rejected token (401) is cleared on the spot so the next command
/// starts from a clean anonymous state.
pub async fn restore(client: &ApiClient, store: &SessionStore) -> Result<Arc<Principal>, CliError> {
    let Some(token) = rentley_config::load_token() else {
        return Err(CliError::NotLoggedIn);
    };
    client.set_token(token);

    match client.profile().await {
        Ok(dto) => {
            store.replace(Principal::from(dto));
            store
                .current()
                .ok_or_else(|| CliError::ApiError {
                    message: "session store empty after login".into(),
                })
        }
        Err(err) if err.is_auth_expired() => {
            let _ = rentley_config::clear_token();
            store.clear();
            Err(CliError::SessionExpired)
        }
        Err(err) => Err(err.into()),
    }
}

/// Attach the stored token if one exists, without requiring it.
///
/// Public reads work anonymously but send the credential when present
/// so the server can include account-specific data.
pub fn attach_token(client: &ApiClient) {
    if let Some(token) = rentley_config::load_token() {
        client.set_token(token);
    }
}

/// Evaluate the access gate for a role-restricted command.
pub fn require_roles(store: &SessionStore, allowed: &[Role]) -> Result<(), CliError> {
    let principal = store.current();
    match check_access(principal.as_deref(), Some(allowed)) {
        AccessDecision::Admitted => Ok(()),
        AccessDecision::Denied {
            redirect: Redirect::Login,
        } => Err(CliError::NotLoggedIn),
        AccessDecision::Denied {
            redirect: Redirect::Home,
        } => Err(CliError::AccessDenied {
            role: principal
                .as_deref()
                .and_then(|p| p.raw_role_name().map(str::to_owned))
                .unwrap_or_else(|| "none".into()),
            required: allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}
