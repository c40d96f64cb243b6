//! Rental command handlers.
//!
//! Listing your own rentals needs only a login; acting on someone
//! else's rental or driving the status lifecycle is staff work and
//! passes through the access gate on every invocation.

use tabled::Tabled;

use rentley_api::ApiClient;
use rentley_core::{Rental, Role, SessionStore};

use crate::cli::{GlobalOpts, RentalsArgs, RentalsCommand};
use crate::error::CliError;
use crate::output;

use super::{session, util};

/// Roles permitted to manage rentals beyond their own.
const STAFF_ROLES: &[Role] = &[Role::Administrator, Role::Manager, Role::Staff];

#[derive(Tabled)]
struct RentalRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "VEHICLE")]
    vehicle: String,
    #[tabled(rename = "PICKUP")]
    pickup: String,
    #[tabled(rename = "RETURN")]
    ret: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

fn to_row(r: &Rental) -> RentalRow {
    RentalRow {
        id: r.id,
        vehicle: r.vehicle_label.clone().unwrap_or_else(|| "-".into()),
        pickup: r
            .planned_pickup
            .map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d %H:%M").to_string()),
        ret: r
            .planned_return
            .map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d %H:%M").to_string()),
        status: r.status_label(),
        amount: r.total_amount.map_or_else(|| "-".into(), output::money),
    }
}

fn detail(r: &Rental) -> String {
    let mut lines = vec![format!("Rental:   #{}", r.id)];
    if let Some(ref vehicle) = r.vehicle_label {
        let registration = r.vehicle_registration.as_deref().unwrap_or("-");
        lines.push(format!("Vehicle:  {vehicle} ({registration})"));
    }
    if let Some(ref customer) = r.customer_name {
        lines.push(format!("Customer: {customer}"));
    }
    if let Some(pickup) = r.planned_pickup {
        let location = r.pickup_location.as_deref().unwrap_or("-");
        lines.push(format!("Pickup:   {pickup}  @ {location}"));
    }
    if let Some(ret) = r.planned_return {
        let location = r.return_location.as_deref().unwrap_or("-");
        lines.push(format!("Return:   {ret}  @ {location}"));
    }
    lines.push(format!("Status:   {}", r.status_label()));
    if let Some(amount) = r.total_amount {
        lines.push(format!("Amount:   {}", output::money(amount)));
    }
    if let Some(ref notes) = r.notes {
        lines.push(format!("Notes:    {notes}"));
    }
    lines.join("\n")
}

async fn fetch_rental(client: &ApiClient, id: i64) -> Result<Rental, CliError> {
    match client.get_rental(id).await {
        Ok(dto) => Ok(Rental::from(dto)),
        Err(err) if err.is_not_found() => Err(CliError::NotFound {
            resource_type: "rental".into(),
            identifier: id.to_string(),
            list_command: "rentals list".into(),
        }),
        Err(err) => Err(err.into()),
    }
}

pub async fn handle(
    client: &ApiClient,
    store: &SessionStore,
    args: RentalsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RentalsCommand::List { user } => {
            session::restore(client, store).await?;

            let dtos = match user {
                Some(user_id) => {
                    session::require_roles(store, STAFF_ROLES)?;
                    client.user_rentals(user_id).await?
                }
                None => client.my_rentals().await?,
            };
            let rentals: Vec<Rental> = dtos.into_iter().map(Rental::from).collect();

            let out = output::render_list(&global.output, &rentals, to_row, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RentalsCommand::Get { id } => {
            session::restore(client, store).await?;
            let rental = fetch_rental(client, id).await?;
            let out = output::render_single(&global.output, &rental, detail, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RentalsCommand::Cancel { id } => {
            session::restore(client, store).await?;
            if !util::confirm(&format!("Cancel rental {id}?"), global.yes)? {
                return Ok(());
            }
            client.cancel_rental(id).await?;
            if !global.quiet {
                eprintln!("Rental {id} cancelled");
            }
            Ok(())
        }

        RentalsCommand::Complete { id } => {
            session::restore(client, store).await?;
            session::require_roles(store, STAFF_ROLES)?;
            let rental = Rental::from(client.complete_rental(id).await?);
            if !global.quiet {
                eprintln!("Rental {id} completed (status: {})", rental.status_label());
            }
            Ok(())
        }

        RentalsCommand::SetStatus { id, status } => {
            session::restore(client, store).await?;
            session::require_roles(store, STAFF_ROLES)?;

            // Authoritative-first: the local view changes only after the
            // server acknowledges the transition.
            let rental = Rental::from(client.update_rental_status(id, status.id()).await?);
            if !global.quiet {
                eprintln!("Rental {id} is now {}", rental.status_label());
            }
            Ok(())
        }
    }
}
