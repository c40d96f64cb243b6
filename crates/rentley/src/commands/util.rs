//! Shared helpers for command handlers.

use std::path::Path;

use rentley_api::ApiClient;
use rentley_core::Vehicle;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Fetch a vehicle and convert to the domain type, with a friendly
/// not-found diagnosis.
pub async fn fetch_vehicle(client: &ApiClient, id: i64) -> Result<Vehicle, CliError> {
    match client.get_vehicle(id).await {
        Ok(dto) => Ok(Vehicle::from(dto)),
        Err(err) if err.is_not_found() => Err(CliError::NotFound {
            resource_type: "vehicle".into(),
            identifier: id.to_string(),
            list_command: "vehicles list".into(),
        }),
        Err(err) => Err(err.into()),
    }
}

/// Spinner for in-flight network steps; hidden in quiet mode.
pub fn spinner(message: &str, quiet: bool) -> indicatif::ProgressBar {
    if quiet {
        return indicatif::ProgressBar::hidden();
    }
    let bar = indicatif::ProgressBar::new_spinner();
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}
