//! Location command handlers.

use tabled::Tabled;
use tracing::warn;

use rentley_api::ApiClient;
use rentley_core::Location;

use crate::cli::{GlobalOpts, LocationsArgs, LocationsCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CITY")]
    city: String,
    #[tabled(rename = "ADDRESS")]
    address: String,
}

fn to_row(l: &Location) -> LocationRow {
    LocationRow {
        id: l.id,
        name: l.name.clone(),
        city: l.city.clone().unwrap_or_else(|| "-".into()),
        address: l.address.clone().unwrap_or_else(|| "-".into()),
    }
}

pub async fn handle(
    client: &ApiClient,
    args: LocationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LocationsCommand::List => {
            // Reference data: a failed read degrades to an empty list
            // rather than blocking the caller.
            let locations: Vec<Location> = match client.locations().await {
                Ok(dtos) => dtos.into_iter().map(Location::from).collect(),
                Err(err) => {
                    warn!(error = %err, "locations unavailable");
                    if !global.quiet {
                        eprintln!("warning: locations unavailable ({err})");
                    }
                    Vec::new()
                }
            };

            let out =
                output::render_list(&global.output, &locations, to_row, |l| l.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
