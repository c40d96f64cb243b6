//! Vehicle command handlers.

use tabled::Tabled;

use rentley_api::ApiClient;
use rentley_api::types::SearchFilters;
use rentley_core::{Role, SessionStore, Vehicle};

use crate::cli::{GlobalOpts, VehiclesArgs, VehiclesCommand};
use crate::error::CliError;
use crate::output;

use super::{session, util};

/// Roles permitted to mutate the fleet.
const MANAGEMENT_ROLES: &[Role] = &[Role::Administrator, Role::Manager];

#[derive(Tabled)]
struct VehicleRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "VEHICLE")]
    vehicle: String,
    #[tabled(rename = "REGISTRATION")]
    registration: String,
    #[tabled(rename = "RATE/DAY")]
    rate: String,
    #[tabled(rename = "LOCATION")]
    location: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

fn to_row(v: &Vehicle) -> VehicleRow {
    VehicleRow {
        id: v.id,
        vehicle: v.label(),
        registration: v.registration.clone(),
        rate: output::money(v.daily_rate),
        location: v.location_name().unwrap_or("-").to_owned(),
        status: v
            .status
            .as_ref()
            .map_or_else(|| "-".to_owned(), |s| s.name.clone()),
    }
}

fn detail(v: &Vehicle) -> String {
    let mut lines = vec![
        format!("Vehicle:      {} (id {})", v.label(), v.id),
        format!("Registration: {}", v.registration),
        format!("Daily rate:   {}", output::money(v.daily_rate)),
    ];
    if let Some(year) = v.year {
        lines.push(format!("Year:         {year}"));
    }
    if let Some(ref color) = v.color {
        lines.push(format!("Color:        {color}"));
    }
    if let Some(mileage) = v.mileage {
        lines.push(format!("Mileage:      {mileage} km"));
    }
    if let Some(location) = v.location_name() {
        lines.push(format!("Location:     {location}"));
    }
    if let Some(ref status) = v.status {
        lines.push(format!(
            "Status:       {}{}",
            status.name,
            if status.available_for_rent {
                " (rentable)"
            } else {
                ""
            }
        ));
    }
    lines.join("\n")
}

fn print_vehicles(vehicles: &[Vehicle], global: &GlobalOpts) {
    let out = output::render_list(&global.output, vehicles, to_row, |v| v.id.to_string());
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    client: &ApiClient,
    store: &SessionStore,
    args: VehiclesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VehiclesCommand::List { page, size } => {
            session::attach_token(client);
            let listing = client.list_vehicles(page, size).await?;
            let vehicles: Vec<Vehicle> =
                listing.content.into_iter().map(Vehicle::from).collect();
            print_vehicles(&vehicles, global);
            if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
                eprintln!(
                    "page {} of {} ({} vehicles total)",
                    listing.page + 1,
                    listing.total_pages.max(1),
                    listing.total_elements
                );
            }
            Ok(())
        }

        VehiclesCommand::Get { id } => {
            session::attach_token(client);
            let vehicle = util::fetch_vehicle(client, id).await?;
            let out = output::render_single(&global.output, &vehicle, detail, |v| {
                v.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VehiclesCommand::Available { from, to } => {
            if let (Some(from), Some(to)) = (from, to) {
                if to <= from {
                    return Err(CliError::Validation {
                        field: "dates".into(),
                        reason: "return date must be after the pickup date".into(),
                    });
                }
            }
            session::attach_token(client);
            let vehicles: Vec<Vehicle> = client
                .available_vehicles(from, to)
                .await?
                .into_iter()
                .map(Vehicle::from)
                .collect();
            print_vehicles(&vehicles, global);
            Ok(())
        }

        VehiclesCommand::Search {
            term,
            brand,
            category,
            location,
            min_price,
            max_price,
        } => {
            session::attach_token(client);
            let filters = SearchFilters {
                search_term: term,
                brand_id: brand,
                category_id: category,
                location_id: location,
                min_price,
                max_price,
                ..SearchFilters::default()
            };
            let vehicles: Vec<Vehicle> = client
                .search_vehicles(&filters)
                .await?
                .into_iter()
                .map(Vehicle::from)
                .collect();
            print_vehicles(&vehicles, global);
            Ok(())
        }

        VehiclesCommand::Create { from_file } => {
            session::restore(client, store).await?;
            session::require_roles(store, MANAGEMENT_ROLES)?;
            let payload = util::read_json_file(&from_file)?;
            let created = Vehicle::from(client.create_vehicle(&payload).await?);
            if !global.quiet {
                eprintln!("Vehicle created: {} (id {})", created.label(), created.id);
            }
            Ok(())
        }

        VehiclesCommand::Update { id, from_file } => {
            session::restore(client, store).await?;
            session::require_roles(store, MANAGEMENT_ROLES)?;
            let payload = util::read_json_file(&from_file)?;
            let updated = Vehicle::from(client.update_vehicle(id, &payload).await?);
            if !global.quiet {
                eprintln!("Vehicle updated: {} (id {})", updated.label(), updated.id);
            }
            Ok(())
        }

        VehiclesCommand::Delete { id } => {
            session::restore(client, store).await?;
            session::require_roles(store, MANAGEMENT_ROLES)?;
            if !util::confirm(&format!("Delete vehicle {id}? This is destructive."), global.yes)? {
                return Ok(());
            }
            client.delete_vehicle(id).await?;
            if !global.quiet {
                eprintln!("Vehicle {id} deleted");
            }
            Ok(())
        }
    }
}
